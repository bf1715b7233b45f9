//! Declared month and paid-leave reference period models.
//!
//! This module contains the [`PayMonth`] type (the month being declared) and
//! the [`ReferencePeriod`] type (the June to May paid-leave accounting year).

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month being declared.
///
/// # Example
///
/// ```
/// use pajemploi_engine::models::PayMonth;
/// use chrono::NaiveDate;
///
/// let month = PayMonth::new(2026, 2).unwrap();
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert_eq!(month.days().count(), 28);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayMonth {
    year: i32,
    month: u32,
}

impl PayMonth {
    /// Creates a month, rejecting month numbers outside 1-12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or(EngineError::InvalidMonth { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 for January.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Iterates every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }

    /// Checks if a date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month, or this month at the end of the supported range.
    pub fn next(&self) -> Self {
        self.first_day()
            .checked_add_months(Months::new(1))
            .map(Self::containing)
            .unwrap_or(*self)
    }

    /// The preceding month, or this month at the start of the supported range.
    pub fn previous(&self) -> Self {
        self.first_day()
            .checked_sub_months(Months::new(1))
            .map(Self::containing)
            .unwrap_or(*self)
    }
}

impl std::fmt::Display for PayMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A paid-leave reference period, 1 June of year Y to 31 May of year Y+1.
///
/// Periods are exactly twelve months long, inclusive of both bounds, and
/// never overlap their neighbours.
///
/// # Example
///
/// ```
/// use pajemploi_engine::models::ReferencePeriod;
/// use chrono::NaiveDate;
///
/// let period = ReferencePeriod::containing(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2026, 5, 31).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferencePeriod {
    /// First day of the period (1 June).
    pub start: NaiveDate,
    /// Last day of the period (31 May).
    pub end: NaiveDate,
}

impl ReferencePeriod {
    /// The reference period starting on 1 June of `year`.
    pub fn starting_in(year: i32) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(year, 6, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(year + 1, 5, 31).unwrap_or(NaiveDate::MAX),
        }
    }

    /// The reference period containing `date`.
    ///
    /// June to December start a period in the same year; January to May
    /// belong to the period that started the previous June.
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= 6 {
            Self::starting_in(date.year())
        } else {
            Self::starting_in(date.year() - 1)
        }
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> Self {
        Self::starting_in(self.start.year() - 1)
    }

    /// Checks if a date falls within the period (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
