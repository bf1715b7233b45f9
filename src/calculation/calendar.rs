//! Calendar arithmetic for the contractual schedule.
//!
//! This module provides the per-day hours schedule, the Monday-start month
//! grid, ISO week keys, and the month-level counts the declaration is built
//! from (normal hours, sick-leave hours, worked days).

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::WeeklySchedule;
use crate::models::{DateSet, PayMonth, monday_of};

use super::bank_holidays::BankHolidayCache;

/// Contractual hours for `date`: Monday to Thursday and Friday rates from the
/// schedule, zero on weekends. Bank holidays are not considered here.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::hours_for_day;
/// use pajemploi_engine::config::WeeklySchedule;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let schedule = WeeklySchedule::default();
/// let monday = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
/// let friday = NaiveDate::from_ymd_opt(2026, 2, 6).unwrap();
/// let saturday = NaiveDate::from_ymd_opt(2026, 2, 7).unwrap();
/// assert_eq!(hours_for_day(monday, &schedule), Decimal::new(925, 2));
/// assert_eq!(hours_for_day(friday, &schedule), Decimal::new(875, 2));
/// assert_eq!(hours_for_day(saturday, &schedule), Decimal::ZERO);
/// ```
pub fn hours_for_day(date: NaiveDate, schedule: &WeeklySchedule) -> Decimal {
    match date.weekday() {
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => {
            schedule.monday_to_thursday_hours
        }
        Weekday::Fri => schedule.friday_hours,
        Weekday::Sat | Weekday::Sun => Decimal::ZERO,
    }
}

/// Monday to Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// ISO week key of `date`, formatted `YYYY-Www` with the ISO week-year.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::week_key;
/// use chrono::NaiveDate;
///
/// assert_eq!(week_key(NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()), "2026-W06");
/// // 29 December 2025 belongs to the first ISO week of 2026.
/// assert_eq!(week_key(NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()), "2026-W01");
/// ```
pub fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// The date of the cell.
    pub date: NaiveDate,
    /// The cell belongs to the displayed month.
    pub is_current_month: bool,
    /// Monday to Friday.
    pub is_business_day: bool,
    /// The cell may be edited from this month's view.
    pub is_toggleable: bool,
}

/// One Monday to Sunday row of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarWeek {
    /// Seven cells, Monday first.
    pub days: Vec<CalendarDay>,
}

/// Builds the Monday-start display grid for `month`.
///
/// Leading and trailing weeks are padded with days of the adjacent months.
/// Leading days of the previous month stay toggleable; trailing days of the
/// next month do not.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::calendar_grid;
/// use pajemploi_engine::models::PayMonth;
///
/// // February 2026 starts on a Sunday: the first row is 26 January to 1 February.
/// let grid = calendar_grid(PayMonth::new(2026, 2).unwrap());
/// assert_eq!(grid.len(), 5);
/// assert!(grid[0].days[0].is_toggleable);
/// assert!(!grid[0].days[0].is_current_month);
/// ```
pub fn calendar_grid(month: PayMonth) -> Vec<CalendarWeek> {
    let first = month.first_day();
    let last = month.last_day();
    let grid_start = monday_of(first);
    let grid_end = monday_of(last)
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);

    let cells: Vec<CalendarDay> = grid_start
        .iter_days()
        .take_while(|d| *d <= grid_end)
        .map(|date| {
            let is_current_month = month.contains(date);
            CalendarDay {
                date,
                is_current_month,
                is_business_day: is_business_day(date),
                is_toggleable: is_current_month || date < first,
            }
        })
        .collect();

    cells
        .chunks(7)
        .map(|week| CalendarWeek {
            days: week.to_vec(),
        })
        .collect()
}

/// Contractual hours of `month`, skipping weekends and bank holidays.
///
/// This is the divisor of the hourly rate used for the sick-leave deduction.
pub fn normal_hours_in_month(
    month: PayMonth,
    schedule: &WeeklySchedule,
    holidays: &BankHolidayCache,
) -> Decimal {
    month
        .days()
        .filter(|d| is_business_day(*d) && !holidays.is_bank_holiday(*d))
        .map(|d| hours_for_day(d, schedule))
        .sum()
}

/// Scheduled hours of the sick dates falling in `month`. Weekend dates
/// contribute nothing.
pub fn sick_leave_hours(month: PayMonth, sick_days: &DateSet, schedule: &WeeklySchedule) -> Decimal {
    sick_days
        .range(month.first_day()..=month.last_day())
        .map(|d| hours_for_day(*d, schedule))
        .sum()
}

/// Business days of `month` in neither `off_like` nor `sick_days`.
///
/// Bank holidays still count: allowances are owed per day in care, unlike
/// [`normal_hours_in_month`] which drops them.
pub fn worked_days_count(month: PayMonth, off_like: &DateSet, sick_days: &DateSet) -> u32 {
    month
        .days()
        .filter(|d| is_business_day(*d) && !off_like.contains(d) && !sick_days.contains(d))
        .count() as u32
}
