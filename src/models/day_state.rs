//! Per-day attendance state model.
//!
//! A [`ChildCalendar`] maps dates to a [`DayState`] for one child. Dates with
//! no entry are worked days, so the calendar only stores exceptions.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An ordered set of dates.
pub type DateSet = BTreeSet<NaiveDate>;

/// The attendance state of one day for one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// The child was in care; the implicit state of any date without an entry.
    Worked,
    /// Unpaid day off.
    Off,
    /// The employee was on sick leave; deducted from the monthly salary.
    Sick,
    /// Paid leave ("congés payés") consumed from the accrued balance.
    PaidLeave,
    /// Day outside the contractual schedule (e.g. a week not covered).
    ContractOff,
}

/// Parses a `YYYY-MM-DD` date key.
///
/// # Example
///
/// ```
/// use pajemploi_engine::models::parse_iso_date;
///
/// assert!(parse_iso_date("2026-02-02").is_ok());
/// assert!(parse_iso_date("2026-02-30").is_err());
/// assert!(parse_iso_date("02/02/2026").is_err());
/// ```
pub fn parse_iso_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| EngineError::InvalidDate {
        value: value.to_string(),
    })
}

/// Expands an all-day calendar event into the dates it covers.
///
/// Calendar providers report all-day events with an exclusive end date. An
/// end on or before the start is treated as a single-day event.
///
/// # Example
///
/// ```
/// use pajemploi_engine::models::expand_all_day_event;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
/// assert_eq!(expand_all_day_event(start, end).len(), 3);
/// assert_eq!(expand_all_day_event(start, start).len(), 1);
/// ```
pub fn expand_all_day_event(start: NaiveDate, end_exclusive: NaiveDate) -> Vec<NaiveDate> {
    if end_exclusive <= start {
        return vec![start];
    }
    start
        .iter_days()
        .take_while(|d| *d < end_exclusive)
        .collect()
}

/// The derived date sets fed to the calculation modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySets {
    /// Dates in the [`DayState::Off`] state.
    pub days_off: DateSet,
    /// Dates in the [`DayState::Sick`] state.
    pub sick_leave: DateSet,
    /// Dates in the [`DayState::PaidLeave`] state.
    pub paid_leave: DateSet,
    /// Dates in the [`DayState::ContractOff`] state.
    pub contract_off: DateSet,
}

impl DaySets {
    /// Every date that is not worked for majored-hours and allowance purposes:
    /// days off, paid leave and contract-off days. Sick days stay separate
    /// because they also drive the salary deduction.
    pub fn off_like(&self) -> DateSet {
        self.days_off
            .iter()
            .chain(&self.paid_leave)
            .chain(&self.contract_off)
            .copied()
            .collect()
    }
}

/// Day states for a single child.
///
/// # Example
///
/// ```
/// use pajemploi_engine::models::{ChildCalendar, DayState};
/// use chrono::NaiveDate;
///
/// let mut calendar = ChildCalendar::default();
/// let monday = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
/// assert_eq!(calendar.state(monday), DayState::Worked);
///
/// calendar.set_state(monday, DayState::Sick);
/// assert_eq!(calendar.state(monday), DayState::Sick);
/// assert!(calendar.day_sets().sick_leave.contains(&monday));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<NaiveDate, DayState>",
    into = "BTreeMap<NaiveDate, DayState>"
)]
pub struct ChildCalendar {
    states: BTreeMap<NaiveDate, DayState>,
}

impl From<BTreeMap<NaiveDate, DayState>> for ChildCalendar {
    fn from(mut states: BTreeMap<NaiveDate, DayState>) -> Self {
        states.retain(|_, state| *state != DayState::Worked);
        Self { states }
    }
}

impl From<ChildCalendar> for BTreeMap<NaiveDate, DayState> {
    fn from(calendar: ChildCalendar) -> Self {
        calendar.states
    }
}

impl ChildCalendar {
    /// Builds a calendar from `YYYY-MM-DD` keyed entries, failing fast on a
    /// malformed key.
    pub fn from_iso_entries<'a, I>(entries: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (&'a str, DayState)>,
    {
        let mut calendar = Self::default();
        for (key, state) in entries {
            calendar.set_state(parse_iso_date(key)?, state);
        }
        Ok(calendar)
    }

    /// The state of `date`; dates without an entry are worked.
    pub fn state(&self, date: NaiveDate) -> DayState {
        self.states.get(&date).copied().unwrap_or(DayState::Worked)
    }

    /// Sets the state of `date`, replacing any previous state.
    pub fn set_state(&mut self, date: NaiveDate, state: DayState) {
        if state == DayState::Worked {
            self.states.remove(&date);
        } else {
            self.states.insert(date, state);
        }
    }

    /// Iterates the explicit (non-worked) entries in date order.
    pub fn entries(&self) -> impl Iterator<Item = (NaiveDate, DayState)> + '_ {
        self.states.iter().map(|(date, state)| (*date, *state))
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true when every day is worked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Splits the calendar into one date set per state.
    pub fn day_sets(&self) -> DaySets {
        let mut sets = DaySets::default();
        for (date, state) in &self.states {
            let set = match state {
                DayState::Worked => continue,
                DayState::Off => &mut sets.days_off,
                DayState::Sick => &mut sets.sick_leave,
                DayState::PaidLeave => &mut sets.paid_leave,
                DayState::ContractOff => &mut sets.contract_off,
            };
            set.insert(*date);
        }
        sets
    }

    /// Merges dates imported from an external calendar as days off.
    ///
    /// Dates the child already has an explicit state for are left untouched.
    /// Returns the number of dates that changed.
    pub fn merge_external_days_off<I>(&mut self, dates: I) -> usize
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut merged = 0;
        for date in dates {
            if !self.states.contains_key(&date) {
                self.states.insert(date, DayState::Off);
                merged += 1;
            }
        }
        merged
    }

    /// Toggles the Monday to Friday span of the week containing `day` as
    /// contract-off.
    ///
    /// If all five days already are contract-off they revert to worked;
    /// otherwise all five become contract-off.
    pub fn toggle_week_contract_off(&mut self, day: NaiveDate) {
        let week: Vec<NaiveDate> = monday_of(day)
            .iter_days()
            .take_while(|d| d.weekday() != Weekday::Sat)
            .collect();

        let all_contract_off = week
            .iter()
            .all(|d| self.state(*d) == DayState::ContractOff);
        let target = if all_contract_off {
            DayState::Worked
        } else {
            DayState::ContractOff
        };

        for date in week {
            self.set_state(date, target);
        }
    }
}

/// The Monday of the week containing `date`.
pub(crate) fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = Days::new(u64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_days(offset).unwrap_or(NaiveDate::MIN)
}
