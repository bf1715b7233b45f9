//! Multi-child day-state reconciliation.
//!
//! A [`Household`] holds one [`ChildCalendar`] per child. In "view all" mode a
//! date shows a single state only when every child agrees on it; otherwise it
//! is [`CellState::Mixed`] and per-child detail is needed.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::day_state::{ChildCalendar, DayState};
use super::declaration_result::PaidLeaveCounters;

/// The aggregate state of one date across every child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "snake_case")]
pub enum CellState {
    /// Every child has the same state.
    Agreed(DayState),
    /// At least two children disagree.
    Mixed,
}

/// Day states for every child, keyed by child name.
///
/// # Example
///
/// ```
/// use pajemploi_engine::models::{CellState, DayState, Household};
/// use chrono::NaiveDate;
///
/// let mut household = Household::with_children(["Axelle", "Brune"]);
/// let monday = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
/// assert_eq!(household.display_state(monday), CellState::Agreed(DayState::Worked));
///
/// household.set_state("Axelle", monday, DayState::Sick).unwrap();
/// assert_eq!(household.display_state(monday), CellState::Mixed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Household {
    calendars: BTreeMap<String, ChildCalendar>,
}

impl Household {
    /// Creates a household where every child works every day.
    pub fn with_children<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            calendars: names
                .into_iter()
                .map(|name| (name.into(), ChildCalendar::default()))
                .collect(),
        }
    }

    /// Adds or replaces a child's calendar.
    pub fn insert(&mut self, name: impl Into<String>, calendar: ChildCalendar) {
        self.calendars.insert(name.into(), calendar);
    }

    /// The calendar of one child.
    pub fn calendar(&self, name: &str) -> EngineResult<&ChildCalendar> {
        self.calendars
            .get(name)
            .ok_or_else(|| EngineError::ChildNotFound {
                name: name.to_string(),
            })
    }

    fn calendar_mut(&mut self, name: &str) -> EngineResult<&mut ChildCalendar> {
        self.calendars
            .get_mut(name)
            .ok_or_else(|| EngineError::ChildNotFound {
                name: name.to_string(),
            })
    }

    /// Iterates the children's names in order.
    pub fn children(&self) -> impl Iterator<Item = &str> {
        self.calendars.keys().map(String::as_str)
    }

    /// The state of `date` in "view all" mode.
    ///
    /// A household with no children shows every date as worked.
    pub fn display_state(&self, date: NaiveDate) -> CellState {
        let mut states = self.calendars.values().map(|c| c.state(date));
        let Some(first) = states.next() else {
            return CellState::Agreed(DayState::Worked);
        };
        if states.all(|s| s == first) {
            CellState::Agreed(first)
        } else {
            CellState::Mixed
        }
    }

    /// Sets the state of `date` for a single child.
    pub fn set_state(&mut self, name: &str, date: NaiveDate, state: DayState) -> EngineResult<()> {
        self.calendar_mut(name)?.set_state(date, state);
        Ok(())
    }

    /// Broadcasts `state` for `date` to every child.
    ///
    /// Paid leave is downgraded to off for a child with nothing left to take
    /// (`available + acquiring == 0`). A child missing from `counters` has no
    /// balance.
    pub fn set_state_all(
        &mut self,
        date: NaiveDate,
        state: DayState,
        counters: &BTreeMap<String, PaidLeaveCounters>,
    ) {
        for (name, calendar) in &mut self.calendars {
            let assignable = counters.get(name).map_or(0, PaidLeaveCounters::assignable);
            let effective = if state == DayState::PaidLeave && assignable == 0 {
                debug!(child = %name, %date, "No paid leave balance, marking day off");
                DayState::Off
            } else {
                state
            };
            calendar.set_state(date, effective);
        }
    }

    /// Toggles the Monday to Friday span containing `day` as contract-off for
    /// one child.
    pub fn toggle_week_contract_off(&mut self, name: &str, day: NaiveDate) -> EngineResult<()> {
        self.calendar_mut(name)?.toggle_week_contract_off(day);
        Ok(())
    }

    /// Merges externally imported days off into every child's calendar.
    ///
    /// Returns the total number of child-dates that changed.
    pub fn merge_external_days_off(&mut self, dates: &[NaiveDate]) -> usize {
        self.calendars
            .values_mut()
            .map(|calendar| calendar.merge_external_days_off(dates.iter().copied()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateSet, ReferencePeriod};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn counters(available: u32, acquiring: u32) -> PaidLeaveCounters {
        PaidLeaveCounters {
            acquired_previous: available,
            taken_in_current: 0,
            available,
            acquiring,
            auto_saturdays: DateSet::new(),
            current_period: ReferencePeriod::starting_in(2025),
            previous_period: ReferencePeriod::starting_in(2024),
        }
    }

    fn two_children() -> Household {
        Household::with_children(["Axelle", "Brune"])
    }

    #[test]
    fn test_display_state_agreed_when_all_match() {
        let mut household = two_children();
        household.set_state("Axelle", date(2026, 2, 2), DayState::Off).unwrap();
        household.set_state("Brune", date(2026, 2, 2), DayState::Off).unwrap();

        assert_eq!(
            household.display_state(date(2026, 2, 2)),
            CellState::Agreed(DayState::Off)
        );
        assert_eq!(
            household.display_state(date(2026, 2, 3)),
            CellState::Agreed(DayState::Worked)
        );
    }

    #[test]
    fn test_display_state_mixed_on_disagreement() {
        let mut household = two_children();
        household.set_state("Axelle", date(2026, 2, 2), DayState::Off).unwrap();
        household.set_state("Brune", date(2026, 2, 2), DayState::Sick).unwrap();
        assert_eq!(household.display_state(date(2026, 2, 2)), CellState::Mixed);
    }

    #[test]
    fn test_display_state_empty_household() {
        let household = Household::default();
        assert_eq!(
            household.display_state(date(2026, 2, 2)),
            CellState::Agreed(DayState::Worked)
        );
    }

    #[test]
    fn test_set_state_unknown_child() {
        let mut household = two_children();
        match household.set_state("Chloé", date(2026, 2, 2), DayState::Off) {
            Err(EngineError::ChildNotFound { name }) => assert_eq!(name, "Chloé"),
            other => panic!("Expected ChildNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_set_state_all_broadcasts() {
        let mut household = two_children();
        household.set_state_all(date(2026, 2, 2), DayState::Sick, &BTreeMap::new());
        assert_eq!(
            household.display_state(date(2026, 2, 2)),
            CellState::Agreed(DayState::Sick)
        );
    }

    #[test]
    fn test_set_state_all_downgrades_paid_leave_without_balance() {
        let mut household = two_children();
        let balances = BTreeMap::from([
            ("Axelle".to_string(), counters(5, 0)),
            ("Brune".to_string(), counters(0, 0)),
        ]);

        household.set_state_all(date(2026, 2, 2), DayState::PaidLeave, &balances);

        assert_eq!(
            household.calendar("Axelle").unwrap().state(date(2026, 2, 2)),
            DayState::PaidLeave
        );
        assert_eq!(
            household.calendar("Brune").unwrap().state(date(2026, 2, 2)),
            DayState::Off
        );
        assert_eq!(household.display_state(date(2026, 2, 2)), CellState::Mixed);
    }

    #[test]
    fn test_set_state_all_accruing_balance_allows_paid_leave() {
        let mut household = two_children();
        let balances = BTreeMap::from([
            ("Axelle".to_string(), counters(0, 2)),
            ("Brune".to_string(), counters(0, 2)),
        ]);

        household.set_state_all(date(2026, 2, 2), DayState::PaidLeave, &balances);
        assert_eq!(
            household.display_state(date(2026, 2, 2)),
            CellState::Agreed(DayState::PaidLeave)
        );
    }

    #[test]
    fn test_set_state_all_missing_counters_means_no_balance() {
        let mut household = two_children();
        household.set_state_all(date(2026, 2, 2), DayState::PaidLeave, &BTreeMap::new());
        assert_eq!(
            household.display_state(date(2026, 2, 2)),
            CellState::Agreed(DayState::Off)
        );
    }

    #[test]
    fn test_toggle_week_contract_off_targets_one_child() {
        let mut household = two_children();
        household
            .toggle_week_contract_off("Brune", date(2026, 2, 2))
            .unwrap();

        assert!(household.calendar("Axelle").unwrap().is_empty());
        assert_eq!(household.calendar("Brune").unwrap().len(), 5);
        assert_eq!(household.display_state(date(2026, 2, 4)), CellState::Mixed);
    }

    #[test]
    fn test_merge_external_days_off_counts_changes() {
        let mut household = two_children();
        household.set_state("Axelle", date(2026, 2, 2), DayState::Sick).unwrap();

        let changed = household.merge_external_days_off(&[date(2026, 2, 2), date(2026, 2, 3)]);

        assert_eq!(changed, 3);
        assert_eq!(household.display_state(date(2026, 2, 2)), CellState::Mixed);
        assert_eq!(
            household.display_state(date(2026, 2, 3)),
            CellState::Agreed(DayState::Off)
        );
    }

    #[test]
    fn test_serialize_cell_state() {
        let json = serde_json::to_string(&CellState::Agreed(DayState::PaidLeave)).unwrap();
        assert_eq!(json, r#"{"kind":"agreed","state":"paid_leave"}"#);
        let json = serde_json::to_string(&CellState::Mixed).unwrap();
        assert_eq!(json, r#"{"kind":"mixed"}"#);
    }
}
