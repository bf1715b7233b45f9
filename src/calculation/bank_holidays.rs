//! French bank holiday ("jours fériés") computation.
//!
//! This module provides the pure [`bank_holidays_for_year`] function and the
//! [`BankHolidayCache`] memoising it per year for a caller that asks
//! repeatedly.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::models::DateSet;

/// Easter Sunday for `year`, by the Meeus/Jones/Butcher Gregorian algorithm.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::easter_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_date(2026), NaiveDate::from_ymd_opt(2026, 4, 5));
/// assert_eq!(easter_date(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
/// ```
pub fn easter_date(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// The French bank holidays of `year`.
///
/// Eight fixed dates (1 Jan, 1 May, 8 May, 14 Jul, 15 Aug, 1 Nov, 11 Nov,
/// 25 Dec) and three relative to Easter Sunday: Easter Monday (+1),
/// Ascension (+39) and Whit Monday (+50). A year outside chrono's range
/// yields an empty set.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::bank_holidays_for_year;
/// use chrono::NaiveDate;
///
/// let holidays = bank_holidays_for_year(2026);
/// assert_eq!(holidays.len(), 11);
/// assert!(holidays.contains(&NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()));
/// ```
pub fn bank_holidays_for_year(year: i32) -> DateSet {
    const FIXED: [(u32, u32); 8] = [
        (1, 1),   // Jour de l'an
        (5, 1),   // Fête du travail
        (5, 8),   // Victoire 1945
        (7, 14),  // Fête nationale
        (8, 15),  // Assomption
        (11, 1),  // Toussaint
        (11, 11), // Armistice
        (12, 25), // Noël
    ];

    let mut holidays: DateSet = FIXED
        .iter()
        .filter_map(|(month, day)| NaiveDate::from_ymd_opt(year, *month, *day))
        .collect();

    if let Some(easter) = easter_date(year) {
        holidays.extend(
            [1, 39, 50]
                .into_iter()
                .filter_map(|offset| easter.checked_add_days(Days::new(offset))),
        );
    }

    holidays
}

/// Per-year memoisation of [`bank_holidays_for_year`].
///
/// Holiday sets never change for a given year, so entries are never
/// invalidated. The cache is owned by its caller and uses interior
/// mutability so lookups only need a shared reference.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::BankHolidayCache;
/// use chrono::NaiveDate;
///
/// let cache = BankHolidayCache::new();
/// assert!(cache.is_bank_holiday(NaiveDate::from_ymd_opt(2026, 7, 14).unwrap()));
/// assert!(!cache.is_bank_holiday(NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()));
/// ```
#[derive(Debug, Default)]
pub struct BankHolidayCache {
    years: RefCell<HashMap<i32, DateSet>>,
}

impl BankHolidayCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The holidays of `year`, computed on first use.
    pub fn for_year(&self, year: i32) -> DateSet {
        self.years
            .borrow_mut()
            .entry(year)
            .or_insert_with(|| bank_holidays_for_year(year))
            .clone()
    }

    /// Checks if `date` is a bank holiday.
    pub fn is_bank_holiday(&self, date: NaiveDate) -> bool {
        self.years
            .borrow_mut()
            .entry(date.year())
            .or_insert_with(|| bank_holidays_for_year(date.year()))
            .contains(&date)
    }

    /// Every holiday between `start` and `end`, both inclusive.
    pub fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> DateSet {
        (start.year()..=end.year())
            .flat_map(|year| self.for_year(year))
            .filter(|d| *d >= start && *d <= end)
            .collect()
    }

    /// Number of years computed so far.
    pub fn cached_years(&self) -> usize {
        self.years.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_easter_known_years() {
        assert_eq!(easter_date(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_date(2025), Some(date(2025, 4, 20)));
        assert_eq!(easter_date(2026), Some(date(2026, 4, 5)));
        assert_eq!(easter_date(2008), Some(date(2008, 3, 23)));
        assert_eq!(easter_date(2038), Some(date(2038, 4, 25)));
    }

    #[test]
    fn test_fixed_holidays_2026() {
        let holidays = bank_holidays_for_year(2026);
        for (m, d) in [(1, 1), (5, 1), (5, 8), (7, 14), (8, 15), (11, 1), (11, 11), (12, 25)] {
            assert!(holidays.contains(&date(2026, m, d)), "missing {}-{}", m, d);
        }
    }

    #[test]
    fn test_easter_relative_holidays_2026() {
        let holidays = bank_holidays_for_year(2026);
        assert!(holidays.contains(&date(2026, 4, 6))); // Lundi de Pâques
        assert!(holidays.contains(&date(2026, 5, 14))); // Ascension
        assert!(holidays.contains(&date(2026, 5, 25))); // Lundi de Pentecôte
        assert!(!holidays.contains(&date(2026, 4, 5)));
    }

    #[test]
    fn test_ascension_on_labour_day_collapses() {
        // Easter 2008 is 23 March, so Ascension falls on 1 May.
        let holidays = bank_holidays_for_year(2008);
        assert_eq!(holidays.len(), 10);
        assert!(holidays.contains(&date(2008, 5, 1)));
    }

    #[test]
    fn test_cache_memoises_per_year() {
        let cache = BankHolidayCache::new();
        assert_eq!(cache.cached_years(), 0);

        assert!(cache.is_bank_holiday(date(2026, 1, 1)));
        assert!(cache.is_bank_holiday(date(2026, 12, 25)));
        assert_eq!(cache.cached_years(), 1);

        assert_eq!(cache.for_year(2026), bank_holidays_for_year(2026));
        assert_eq!(cache.cached_years(), 1);
    }

    #[test]
    fn test_holidays_between_spans_years() {
        let cache = BankHolidayCache::new();
        let holidays = cache.holidays_between(date(2025, 12, 1), date(2026, 1, 31));
        assert_eq!(
            holidays,
            DateSet::from([date(2025, 12, 25), date(2026, 1, 1)])
        );
        assert_eq!(cache.cached_years(), 2);
    }

    #[test]
    fn test_holidays_between_bounds_are_inclusive() {
        let cache = BankHolidayCache::new();
        let holidays = cache.holidays_between(date(2026, 5, 1), date(2026, 5, 8));
        assert_eq!(holidays, DateSet::from([date(2026, 5, 1), date(2026, 5, 8)]));
    }

    proptest! {
        #[test]
        fn prop_eleven_holidays_unless_ascension_collides(year in 1900i32..2200) {
            let holidays = bank_holidays_for_year(year);
            let easter = easter_date(year).unwrap();
            let ascension = easter + Days::new(39);
            let collides = ascension == date(year, 5, 1) || ascension == date(year, 5, 8);

            prop_assert_eq!(holidays.len(), if collides { 10 } else { 11 });
            prop_assert!(holidays.iter().all(|d| d.year() == year));
        }

        #[test]
        fn prop_easter_is_a_sunday_in_march_or_april(year in 1583i32..4000) {
            let easter = easter_date(year).unwrap();
            prop_assert_eq!(easter.weekday(), chrono::Weekday::Sun);
            prop_assert!(easter >= date(year, 3, 22) && easter <= date(year, 4, 25));
        }
    }
}
