//! Paid leave payout ("indemnité de congés payés").
//!
//! The payout is declared once a year, in August, for the days acquired over
//! the previous reference period. Two legal methods are computed and the one
//! more favourable to the employee is paid:
//!
//! - the "10% rule": a tenth of twelve monthly salaries;
//! - "maintien de salaire": the pay the employee would have earned working
//!   during the leave, normal and majored hours included.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RegimeConfig;
use crate::models::{AuditStep, ChildContract, PayMonth};

/// The payout method retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    /// Ten percent of the annual salary.
    TenPercent,
    /// Salary maintained over the leave weeks.
    SalaryMaintenance,
}

/// The result of the paid leave payout calculation.
#[derive(Debug, Clone)]
pub struct CongesPayesResult {
    /// The amount paid this month.
    pub amount: Decimal,
    /// The "10% rule" amount, zero outside the payout month.
    pub ten_percent: Decimal,
    /// The "maintien de salaire" amount, zero outside the payout month.
    pub salary_maintenance: Decimal,
    /// The method retained, `None` when nothing is paid.
    pub method: Option<PayoutMethod>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the paid leave payout for `month`.
///
/// Nothing is paid outside the configured payout month or when no days were
/// acquired.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::calculate_conges_payes;
/// use pajemploi_engine::config::RegimeConfig;
/// use pajemploi_engine::models::{ChildContract, PayMonth};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = ChildContract::new(
///     "Axelle",
///     Decimal::new(390, 2),
///     Decimal::new(429, 2),
///     NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
/// ).unwrap();
/// let config = RegimeConfig::default();
///
/// let july = calculate_conges_payes(&contract, PayMonth::new(2026, 7).unwrap(), 30, &config, 1);
/// assert_eq!(july.amount, Decimal::ZERO);
///
/// let august = calculate_conges_payes(&contract, PayMonth::new(2026, 8).unwrap(), 30, &config, 1);
/// // 5 weeks × (45h × €3.90 + 0.75h × €4.29)
/// assert_eq!(august.amount, Decimal::new(8935875, 4));
/// ```
pub fn calculate_conges_payes(
    contract: &ChildContract,
    month: PayMonth,
    acquired_days: u32,
    config: &RegimeConfig,
    step_number: u32,
) -> CongesPayesResult {
    let rules = &config.paid_leave;

    if month.month() != rules.payout_month || acquired_days == 0 {
        let reasoning = if month.month() != rules.payout_month {
            format!(
                "{} is not the payout month ({:02}) - no paid leave payout",
                month, rules.payout_month
            )
        } else {
            "No paid leave days acquired - no paid leave payout".to_string()
        };

        let audit_step = AuditStep {
            step_number,
            rule_id: "conges_payes".to_string(),
            rule_name: "Paid Leave Payout".to_string(),
            input: serde_json::json!({
                "month": month.to_string(),
                "payout_month": rules.payout_month,
                "acquired_days": acquired_days
            }),
            output: serde_json::json!({
                "paid": false,
                "amount": "0"
            }),
            reasoning,
        };

        return CongesPayesResult {
            amount: Decimal::ZERO,
            ten_percent: Decimal::ZERO,
            salary_maintenance: Decimal::ZERO,
            method: None,
            audit_step,
        };
    }

    let monthly_salary = contract.monthly_salary(config);
    let ten_percent = monthly_salary * Decimal::from(12) * rules.ten_percent_rate;

    let equivalent_weeks = Decimal::from(acquired_days) / rules.working_days_per_week;
    let salary_maintenance = equivalent_weeks
        * config.normal_hours_per_week()
        * contract.net_hourly_rate
        + equivalent_weeks * config.majored_hours_per_week() * contract.majored_hour_rate;

    let (amount, method) = if salary_maintenance > ten_percent {
        (salary_maintenance, PayoutMethod::SalaryMaintenance)
    } else {
        (ten_percent, PayoutMethod::TenPercent)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "conges_payes".to_string(),
        rule_name: "Paid Leave Payout".to_string(),
        input: serde_json::json!({
            "month": month.to_string(),
            "acquired_days": acquired_days,
            "monthly_salary": monthly_salary.normalize().to_string(),
            "net_hourly_rate": contract.net_hourly_rate.normalize().to_string(),
            "majored_hour_rate": contract.majored_hour_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "paid": true,
            "ten_percent": ten_percent.normalize().to_string(),
            "salary_maintenance": salary_maintenance.normalize().to_string(),
            "method": method,
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "10% rule: €{} × 12 × {} = €{}; maintien: {} days / {} = {} weeks = €{}; paying the higher €{}",
            monthly_salary.normalize(),
            rules.ten_percent_rate.normalize(),
            ten_percent.normalize(),
            acquired_days,
            rules.working_days_per_week.normalize(),
            equivalent_weeks.round_dp(4).normalize(),
            salary_maintenance.round_dp(2).normalize(),
            amount.round_dp(2).normalize()
        ),
    };

    CongesPayesResult {
        amount,
        ten_percent,
        salary_maintenance,
        method: Some(method),
        audit_step,
    }
}
