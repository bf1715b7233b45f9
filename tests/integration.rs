//! Integration tests for the payroll declaration engine.
//!
//! This test suite runs whole months through the engine:
//! - February 2026 with no absences, with sick days, and fully off
//! - Majored hours across month boundaries and bank holiday weeks
//! - Paid-leave counters and the August payout
//! - Multi-child reconciliation and external calendar imports
//! - The form filler payload
//! - Error cases

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use pajemploi_engine::calculation::round_to_cents;
use pajemploi_engine::config::ConfigLoader;
use pajemploi_engine::engine::PayrollEngine;
use pajemploi_engine::error::EngineError;
use pajemploi_engine::models::{
    CellState, ChildCalendar, DayState, DeclarationResult, Household, PayMonth,
    expand_all_day_event,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_engine() -> PayrollEngine {
    PayrollEngine::new(ConfigLoader::load("./config/pajemploi").expect("Failed to load config"))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month(y: i32, m: u32) -> PayMonth {
    PayMonth::new(y, m).unwrap()
}

fn declare(child: &str, calendar: &ChildCalendar, y: i32, m: u32) -> DeclarationResult {
    create_test_engine()
        .declare(child, calendar, month(y, m))
        .unwrap()
        .declaration
}

// =============================================================================
// February 2026 Scenarios
// =============================================================================

#[test]
fn test_february_no_absences() {
    let d = declare("Axelle", &ChildCalendar::default(), 2026, 2);

    assert_eq!(d.monthly_salary, decimal("658.13"));
    assert_eq!(d.worked_days, 20);
    assert_eq!(d.majored_hours_count, decimal("3"));
    assert_eq!(round_to_cents(d.majored_hours_amount), decimal("12.87"));
    assert_eq!(round_to_cents(d.total_salary), decimal("671.00"));
    assert_eq!(d.maintenance_allowance, decimal("80"));
    assert_eq!(d.meal_allowance, decimal("80"));
    assert_eq!(d.conges_payes, Decimal::ZERO);
}

#[test]
fn test_february_two_sick_days() {
    let calendar = ChildCalendar::from_iso_entries([
        ("2026-02-02", DayState::Sick),
        ("2026-02-03", DayState::Sick),
    ])
    .unwrap();
    let d = declare("Axelle", &calendar, 2026, 2);

    assert_eq!(d.sick_leave_days, 2);
    assert_eq!(d.sick_leave_hours, decimal("18.5"));
    assert_eq!(round_to_cents(d.sick_leave_deduction), decimal("66.53"));
    assert_eq!(round_to_cents(d.adjusted_salary), decimal("591.60"));
    assert_eq!(d.worked_days, 18);
    assert_eq!(d.majored_hours_count, decimal("2.25"));
}

#[test]
fn test_february_all_days_off() {
    let mut calendar = ChildCalendar::default();
    for day in month(2026, 2).days() {
        calendar.set_state(day, DayState::Off);
    }
    let d = declare("Axelle", &calendar, 2026, 2);

    assert_eq!(d.worked_days, 0);
    assert_eq!(d.majored_hours_count, Decimal::ZERO);
    assert_eq!(d.total_salary, d.monthly_salary);
    assert_eq!(d.total_salary, decimal("658.13"));
}

#[test]
fn test_february_second_child_rates() {
    let d = declare("Brune", &ChildCalendar::default(), 2026, 2);

    assert_eq!(d.monthly_salary, decimal("691.88"));
    assert_eq!(d.majored_hours_amount, decimal("13.53"));
    assert_eq!(d.total_salary, decimal("705.41"));
}

// =============================================================================
// Majored Hours Across Months
// =============================================================================

#[test]
fn test_majored_hours_march_april_may_2026() {
    let calendar = ChildCalendar::default();
    assert_eq!(declare("Axelle", &calendar, 2026, 3).majored_hours_count, decimal("3"));
    assert_eq!(declare("Axelle", &calendar, 2026, 4).majored_hours_count, decimal("2.25"));
    assert_eq!(declare("Axelle", &calendar, 2026, 5).majored_hours_count, decimal("0.75"));
}

#[test]
fn test_absence_in_march_tail_affects_april() {
    // 30 March to 3 April 2026 is credited to April.
    let calendar = ChildCalendar::from_iso_entries([("2026-03-30", DayState::Off)]).unwrap();

    assert_eq!(declare("Axelle", &calendar, 2026, 3).majored_hours_count, decimal("3"));
    assert_eq!(declare("Axelle", &calendar, 2026, 4).majored_hours_count, decimal("1.5"));
}

#[test]
fn test_worked_days_keep_bank_holidays_but_normal_hours_drop_them() {
    let engine = create_test_engine();
    let report = engine
        .declare("Axelle", &ChildCalendar::default(), month(2026, 5))
        .unwrap();

    // All 21 weekdays of May 2026 earn allowances, four of them bank holidays.
    assert_eq!(report.declaration.worked_days, 21);
    let sick_step = report
        .audit_steps
        .iter()
        .find(|s| s.rule_id == "sick_leave_deduction")
        .unwrap();
    assert_eq!(sick_step.input["normal_hours"], "155.75");
}

#[test]
fn test_sick_day_in_may_uses_reduced_normal_hours() {
    let calendar = ChildCalendar::from_iso_entries([("2026-05-18", DayState::Sick)]).unwrap();
    let d = declare("Axelle", &calendar, 2026, 5);

    // 658.13 / 155.75 × 9.25
    let expected = decimal("658.13") / decimal("155.75") * decimal("9.25");
    assert_eq!(d.sick_leave_deduction, expected);
    assert_eq!(d.majored_hours_count, Decimal::ZERO);
}

// =============================================================================
// Paid Leave
// =============================================================================

#[test]
fn test_counters_after_paid_leave_friday() {
    let engine = create_test_engine();
    let calendar = ChildCalendar::from_iso_entries([
        ("2025-07-03", DayState::PaidLeave),
        ("2025-07-04", DayState::PaidLeave),
    ])
    .unwrap();

    let counters = engine
        .paid_leave_counters("Axelle", &calendar, month(2025, 9))
        .unwrap();

    // Contract from 2 September 2024: 39 worked weeks, 25 days acquired.
    assert_eq!(counters.acquired_previous, 25);
    assert!(counters.auto_saturdays.contains(&date(2025, 7, 5)));
    assert_eq!(counters.taken_in_current, 3);
    assert_eq!(counters.available, 22);
}

#[test]
fn test_paid_leave_counts_as_worked_for_accrual() {
    let engine = create_test_engine();
    let mut calendar = ChildCalendar::default();
    for day in 7..=11 {
        calendar.set_state(date(2025, 7, day), DayState::PaidLeave);
    }
    let with_leave = engine
        .paid_leave_counters("Axelle", &calendar, month(2025, 9))
        .unwrap();
    let without = engine
        .paid_leave_counters("Axelle", &ChildCalendar::default(), month(2025, 9))
        .unwrap();

    assert_eq!(with_leave.acquiring, without.acquiring);
    assert_eq!(with_leave.taken_in_current, 6);
}

#[test]
fn test_august_payout_and_other_months() {
    let calendar = ChildCalendar::default();

    let august = declare("Axelle", &calendar, 2026, 8);
    // June 2025 to May 2026 fully worked: 52 weeks, capped at 30 days.
    assert_eq!(august.conges_payes_days_acquired, 30);
    assert_eq!(august.conges_payes, decimal("893.5875"));
    assert_eq!(august.majored_hours_count, decimal("3"));
    assert_eq!(round_to_cents(august.total_salary), decimal("1564.59"));

    let july = declare("Axelle", &calendar, 2026, 7);
    assert_eq!(july.conges_payes_days_acquired, 30);
    assert_eq!(july.conges_payes, Decimal::ZERO);
}

// =============================================================================
// Multi-Child Reconciliation
// =============================================================================

#[test]
fn test_household_reconciliation_and_broadcast() {
    let engine = create_test_engine();
    let mut household = Household::with_children(["Axelle", "Brune"]);

    engine.set_state_all(&mut household, date(2026, 2, 16), DayState::PaidLeave, month(2026, 2));
    assert_eq!(
        household.display_state(date(2026, 2, 16)),
        CellState::Agreed(DayState::PaidLeave)
    );

    household
        .set_state("Brune", date(2026, 2, 17), DayState::Sick)
        .unwrap();
    assert_eq!(household.display_state(date(2026, 2, 17)), CellState::Mixed);

    let reports = engine.declare_household(&household, month(2026, 2)).unwrap();
    assert_eq!(reports[0].declaration.worked_days, 19);
    assert_eq!(reports[1].declaration.worked_days, 18);
    assert_eq!(reports[1].declaration.sick_leave_days, 1);
}

#[test]
fn test_external_all_day_event_becomes_days_off() {
    let engine = create_test_engine();
    let mut household = Household::with_children(["Axelle", "Brune"]);
    household
        .set_state("Axelle", date(2026, 2, 10), DayState::Sick)
        .unwrap();

    // An all-day event from 9 to 11 February, end exclusive.
    let dates = expand_all_day_event(date(2026, 2, 9), date(2026, 2, 12));
    let changed = household.merge_external_days_off(&dates);
    assert_eq!(changed, 5);

    assert_eq!(
        household.display_state(date(2026, 2, 9)),
        CellState::Agreed(DayState::Off)
    );
    assert_eq!(household.display_state(date(2026, 2, 10)), CellState::Mixed);

    let reports = engine.declare_household(&household, month(2026, 2)).unwrap();
    assert_eq!(reports[0].declaration.worked_days, 17);
    assert_eq!(reports[0].declaration.sick_leave_days, 1);
    assert_eq!(reports[1].declaration.worked_days, 17);
}

#[test]
fn test_contract_off_week_toggle() {
    let engine = create_test_engine();
    let mut household = Household::with_children(["Axelle", "Brune"]);
    household
        .toggle_week_contract_off("Axelle", date(2026, 2, 23))
        .unwrap();

    let reports = engine.declare_household(&household, month(2026, 2)).unwrap();
    assert_eq!(reports[0].declaration.worked_days, 15);
    assert_eq!(reports[0].declaration.majored_hours_count, decimal("2.25"));
    assert_eq!(reports[0].declaration.adjusted_salary, decimal("658.13"));
    assert_eq!(reports[1].declaration.worked_days, 20);
}

// =============================================================================
// Form Filler Payload
// =============================================================================

#[test]
fn test_declaration_batch_payload_shape() {
    let engine = create_test_engine();
    let household = Household::with_children(["Axelle", "Brune"]);
    let batch = engine.declaration_batch(&household, month(2026, 2)).unwrap();

    let json: Value = serde_json::to_value(&batch).unwrap();
    let declarations = json["declarations"].as_array().unwrap();
    assert_eq!(declarations.len(), 2);

    let axelle = &declarations[0];
    assert_eq!(axelle["childName"], "Axelle");
    assert_eq!(axelle["workedDays"], 20);
    assert_eq!(axelle["majoredHoursCount"].as_f64().unwrap(), 3.0);
    assert_eq!(axelle["monthlySalary"].as_f64().unwrap(), 658.13);
    assert!(axelle["totalSalary"].is_number());
    assert_eq!(axelle.as_object().unwrap().len(), 14);
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn test_unknown_child_is_rejected() {
    let engine = create_test_engine();
    let result = engine.declare("Chloé", &ChildCalendar::default(), month(2026, 2));
    assert!(matches!(result, Err(EngineError::ChildNotFound { .. })));
}

#[test]
fn test_malformed_iso_key_is_rejected() {
    let result = ChildCalendar::from_iso_entries([("2026-02-30", DayState::Off)]);
    match result {
        Err(EngineError::InvalidDate { value }) => assert_eq!(value, "2026-02-30"),
        other => panic!("Expected InvalidDate, got {:?}", other),
    }
}

#[test]
fn test_invalid_month_is_rejected() {
    assert!(matches!(
        PayMonth::new(2026, 13),
        Err(EngineError::InvalidMonth { .. })
    ));
}
