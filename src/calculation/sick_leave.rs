//! Sick leave deduction.
//!
//! Sick days are unpaid: the scheduled hours of each sick day are deducted
//! from the smoothed monthly salary at the month's effective hourly rate.

use rust_decimal::Decimal;

use crate::config::WeeklySchedule;
use crate::models::{AuditStep, DateSet, PayMonth};

use super::calendar::sick_leave_hours;

/// The result of the sick leave deduction.
#[derive(Debug, Clone)]
pub struct SickLeaveResult {
    /// Sick dates falling in the month, weekends included.
    pub days: u32,
    /// Scheduled hours lost to sick leave.
    pub hours: Decimal,
    /// `monthly_salary / normal_hours`, zero when the month has no normal hours.
    pub hourly_rate: Decimal,
    /// `hourly_rate × hours`.
    pub deduction: Decimal,
    /// `monthly_salary - deduction`.
    pub adjusted_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the sick leave deduction for `month`.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::calculate_sick_leave;
/// use pajemploi_engine::config::WeeklySchedule;
/// use pajemploi_engine::models::{DateSet, PayMonth};
/// use rust_decimal::Decimal;
///
/// let result = calculate_sick_leave(
///     PayMonth::new(2026, 2).unwrap(),
///     &DateSet::new(),
///     Decimal::new(65813, 2),
///     Decimal::from(183),
///     &WeeklySchedule::default(),
///     1,
/// );
/// assert_eq!(result.deduction, Decimal::ZERO);
/// assert_eq!(result.adjusted_salary, Decimal::new(65813, 2));
/// ```
pub fn calculate_sick_leave(
    month: PayMonth,
    sick_days: &DateSet,
    monthly_salary: Decimal,
    normal_hours: Decimal,
    schedule: &WeeklySchedule,
    step_number: u32,
) -> SickLeaveResult {
    let days = sick_days
        .range(month.first_day()..=month.last_day())
        .count() as u32;
    let hours = sick_leave_hours(month, sick_days, schedule);
    let hourly_rate = if normal_hours > Decimal::ZERO {
        monthly_salary / normal_hours
    } else {
        Decimal::ZERO
    };
    let deduction = hourly_rate * hours;
    let adjusted_salary = monthly_salary - deduction;

    let reasoning = if hours.is_zero() {
        "No sick leave hours this month - salary unchanged".to_string()
    } else {
        format!(
            "€{} / {}h = €{}/h; {}h sick × €{}/h = €{} deducted",
            monthly_salary.normalize(),
            normal_hours.normalize(),
            hourly_rate.round_dp(4).normalize(),
            hours.normalize(),
            hourly_rate.round_dp(4).normalize(),
            deduction.round_dp(2).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "sick_leave_deduction".to_string(),
        rule_name: "Sick Leave Deduction".to_string(),
        input: serde_json::json!({
            "month": month.to_string(),
            "sick_days": days,
            "monthly_salary": monthly_salary.normalize().to_string(),
            "normal_hours": normal_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "sick_hours": hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "deduction": deduction.normalize().to_string(),
            "adjusted_salary": adjusted_salary.normalize().to_string()
        }),
        reasoning,
    };

    SickLeaveResult {
        days,
        hours,
        hourly_rate,
        deduction,
        adjusted_salary,
        audit_step,
    }
}
