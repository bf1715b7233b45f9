//! Daily allowance calculation.
//!
//! This module provides the maintenance ("indemnité d'entretien") and meal
//! ("indemnité de repas") allowances, both paid per day the child was in care.

use rust_decimal::Decimal;

use crate::config::AllowanceRates;
use crate::models::AuditStep;

/// A single allowance line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowancePayment {
    /// Allowance identifier, `maintenance` or `meal`.
    pub allowance_type: String,
    /// Days paid.
    pub units: Decimal,
    /// Rate per day.
    pub rate: Decimal,
    /// `units × rate`.
    pub amount: Decimal,
}

/// The result of calculating the daily allowances, including the audit step.
#[derive(Debug, Clone)]
pub struct AllowancesResult {
    /// Maintenance allowance for the worked days.
    pub maintenance: AllowancePayment,
    /// Meal allowance for the worked days.
    pub meal: AllowancePayment,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the daily allowances for `worked_days`.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::calculate_allowances;
/// use pajemploi_engine::config::AllowanceRates;
/// use rust_decimal::Decimal;
///
/// let result = calculate_allowances(20, &AllowanceRates::default(), 1);
/// assert_eq!(result.maintenance.amount, Decimal::from(80));
/// assert_eq!(result.meal.amount, Decimal::from(80));
/// ```
pub fn calculate_allowances(
    worked_days: u32,
    rates: &AllowanceRates,
    step_number: u32,
) -> AllowancesResult {
    let units = Decimal::from(worked_days);
    let maintenance = AllowancePayment {
        allowance_type: "maintenance".to_string(),
        units,
        rate: rates.maintenance_per_day,
        amount: units * rates.maintenance_per_day,
    };
    let meal = AllowancePayment {
        allowance_type: "meal".to_string(),
        units,
        rate: rates.meal_per_day,
        amount: units * rates.meal_per_day,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_allowances".to_string(),
        rule_name: "Daily Allowances".to_string(),
        input: serde_json::json!({
            "worked_days": worked_days,
            "maintenance_per_day": rates.maintenance_per_day.normalize().to_string(),
            "meal_per_day": rates.meal_per_day.normalize().to_string()
        }),
        output: serde_json::json!({
            "maintenance": maintenance.amount.normalize().to_string(),
            "meal": meal.amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} days × €{} maintenance = €{}; {} days × €{} meal = €{}",
            worked_days,
            rates.maintenance_per_day.normalize(),
            maintenance.amount.normalize(),
            worked_days,
            rates.meal_per_day.normalize(),
            meal.amount.normalize()
        ),
    };

    AllowancesResult {
        maintenance,
        meal,
        audit_step,
    }
}
