//! Monthly declaration assembly.
//!
//! This module chains the calculation rules into the [`DeclarationResult`]
//! declared on the portal for one child and one month.

use rust_decimal::Decimal;

use crate::config::RegimeConfig;
use crate::models::{AuditStep, ChildContract, DaySets, DeclarationResult, PayMonth};

use super::allowances::calculate_allowances;
use super::bank_holidays::BankHolidayCache;
use super::calendar::{normal_hours_in_month, worked_days_count};
use super::conges_payes::calculate_conges_payes;
use super::majored_hours::compute_majored_hours;
use super::sick_leave::calculate_sick_leave;

/// A declaration together with the audit steps that produced it.
#[derive(Debug, Clone)]
pub struct DeclarationCalculation {
    /// The declaration record.
    pub declaration: DeclarationResult,
    /// The rules applied, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the declaration of `contract` for `month`.
///
/// Days off, paid leave and contract-off days all break majored weeks and
/// reduce the worked days alike; sick days do too and additionally drive the
/// salary deduction. `acquired_paid_leave_days` are the days acquired over
/// the previous reference period, paid out in the payout month.
///
/// The inputs are not modified and the result only depends on them.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::{BankHolidayCache, compute_declaration};
/// use pajemploi_engine::config::RegimeConfig;
/// use pajemploi_engine::models::{ChildContract, DaySets, PayMonth};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = ChildContract::new(
///     "Axelle",
///     Decimal::new(390, 2),
///     Decimal::new(429, 2),
///     NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
/// ).unwrap();
///
/// let calculation = compute_declaration(
///     &contract,
///     PayMonth::new(2026, 2).unwrap(),
///     &DaySets::default(),
///     25,
///     &RegimeConfig::default(),
///     &BankHolidayCache::new(),
///     1,
/// );
/// let declaration = calculation.declaration;
/// assert_eq!(declaration.worked_days, 20);
/// assert_eq!(declaration.total_salary, Decimal::new(67100, 2));
/// ```
pub fn compute_declaration(
    contract: &ChildContract,
    month: PayMonth,
    days: &DaySets,
    acquired_paid_leave_days: u32,
    config: &RegimeConfig,
    holidays: &BankHolidayCache,
    start_step_number: u32,
) -> DeclarationCalculation {
    let mut audit_steps = Vec::new();
    let mut current_step = start_step_number;

    // Step 1: Smoothed monthly salary
    let monthly_salary = contract.monthly_salary(config);
    audit_steps.push(AuditStep {
        step_number: current_step,
        rule_id: "monthly_salary".to_string(),
        rule_name: "Monthly Salary".to_string(),
        input: serde_json::json!({
            "child": contract.name,
            "net_hourly_rate": contract.net_hourly_rate.normalize().to_string(),
            "normal_hours_per_week": config.normal_hours_per_week().normalize().to_string(),
            "weeks_per_year": config.weeks_per_year.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_salary": monthly_salary.normalize().to_string()
        }),
        reasoning: format!(
            "€{} × {}h × {} weeks / 12 = €{}",
            contract.net_hourly_rate.normalize(),
            config.normal_hours_per_week().normalize(),
            config.weeks_per_year.normalize(),
            monthly_salary.normalize()
        ),
    });
    current_step += 1;

    // Step 2: Majored hours, with every non-worked state but sickness folded together
    let off_like = days.off_like();
    let majored = compute_majored_hours(
        month,
        &off_like,
        &days.sick_leave,
        contract.majored_hour_rate,
        config,
        holidays,
        current_step,
    );
    audit_steps.push(majored.audit_step);
    current_step += 1;

    // Step 3: Sick leave deduction at the month's effective hourly rate
    let normal_hours = normal_hours_in_month(month, &config.schedule, holidays);
    let sick = calculate_sick_leave(
        month,
        &days.sick_leave,
        monthly_salary,
        normal_hours,
        &config.schedule,
        current_step,
    );
    audit_steps.push(sick.audit_step);
    current_step += 1;

    // Step 4: Daily allowances
    let worked_days = worked_days_count(month, &off_like, &days.sick_leave);
    let allowances = calculate_allowances(worked_days, &config.allowances, current_step);
    audit_steps.push(allowances.audit_step);
    current_step += 1;

    // Step 5: Paid leave payout
    let conges = calculate_conges_payes(
        contract,
        month,
        acquired_paid_leave_days,
        config,
        current_step,
    );
    audit_steps.push(conges.audit_step);
    current_step += 1;

    // Step 6: Total
    let total_salary = sick.adjusted_salary + majored.amount + conges.amount;
    audit_steps.push(AuditStep {
        step_number: current_step,
        rule_id: "total_salary".to_string(),
        rule_name: "Total Salary".to_string(),
        input: serde_json::json!({
            "adjusted_salary": sick.adjusted_salary.normalize().to_string(),
            "majored_hours_amount": majored.amount.normalize().to_string(),
            "conges_payes": conges.amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_salary": total_salary.normalize().to_string()
        }),
        reasoning: format!(
            "€{} + €{} + €{} = €{}",
            sick.adjusted_salary.round_dp(2).normalize(),
            majored.amount.normalize(),
            conges.amount.round_dp(2).normalize(),
            total_salary.round_dp(2).normalize()
        ),
    });

    let declaration = DeclarationResult {
        child_name: contract.name.clone(),
        monthly_salary,
        majored_hours_count: majored.count,
        majored_hours_amount: majored.amount,
        sick_leave_days: sick.days,
        sick_leave_hours: sick.hours,
        sick_leave_deduction: sick.deduction,
        adjusted_salary: sick.adjusted_salary,
        conges_payes: conges.amount,
        conges_payes_days_acquired: acquired_paid_leave_days,
        total_salary,
        worked_days,
        maintenance_allowance: allowances.maintenance.amount,
        meal_allowance: allowances.meal.amount,
    };

    DeclarationCalculation {
        declaration,
        audit_steps,
    }
}

/// Rounds a declared amount to the cent, halves away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
