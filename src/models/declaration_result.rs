//! Declaration result models.
//!
//! This module contains the [`DeclarationResult`] record handed to the results
//! display and the portal form filler, the [`PaidLeaveCounters`] shown next to
//! it, and the [`AuditStep`] trail recording how each figure was obtained.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::day_state::DateSet;
use super::pay_month::ReferencePeriod;

/// The monthly declaration for one child.
///
/// The field set is the contract with the portal form filler: camelCase keys,
/// plain JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationResult {
    /// The child this declaration is for.
    pub child_name: String,
    /// Smoothed monthly salary before deductions.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_salary: Decimal,
    /// Majored hours attributed to the month (0.75 per qualifying week).
    #[serde(with = "rust_decimal::serde::float")]
    pub majored_hours_count: Decimal,
    /// Majored hours paid at the majored rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub majored_hours_amount: Decimal,
    /// Sick-leave dates falling in the month.
    pub sick_leave_days: u32,
    /// Scheduled hours lost to sick leave.
    #[serde(with = "rust_decimal::serde::float")]
    pub sick_leave_hours: Decimal,
    /// Amount deducted from the salary for sick leave.
    #[serde(with = "rust_decimal::serde::float")]
    pub sick_leave_deduction: Decimal,
    /// Monthly salary minus the sick-leave deduction.
    #[serde(with = "rust_decimal::serde::float")]
    pub adjusted_salary: Decimal,
    /// Paid-leave payout ("congés payés"), non-zero only in the payout month.
    #[serde(with = "rust_decimal::serde::float")]
    pub conges_payes: Decimal,
    /// Paid-leave days acquired over the previous reference period.
    pub conges_payes_days_acquired: u32,
    /// Adjusted salary plus majored hours plus paid-leave payout.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_salary: Decimal,
    /// Business days of the month actually worked.
    pub worked_days: u32,
    /// Maintenance allowance for the worked days.
    #[serde(with = "rust_decimal::serde::float")]
    pub maintenance_allowance: Decimal,
    /// Meal allowance for the worked days.
    #[serde(with = "rust_decimal::serde::float")]
    pub meal_allowance: Decimal,
}

/// Paid-leave balances for one child as of a displayed month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidLeaveCounters {
    /// Days acquired over the previous reference period (at most 30).
    pub acquired_previous: u32,
    /// Days consumed in the current reference period, auto-consumed
    /// Saturdays included.
    pub taken_in_current: u32,
    /// `max(0, acquired_previous - taken_in_current)`.
    pub available: u32,
    /// Days accruing in the current period up to the displayed month, net of
    /// leave taken beyond the previous period's balance.
    pub acquiring: u32,
    /// Saturdays consumed alongside a paid-leave Friday.
    pub auto_saturdays: DateSet,
    /// The reference period containing the displayed month.
    pub current_period: ReferencePeriod,
    /// The reference period before it.
    pub previous_period: ReferencePeriod,
}

impl PaidLeaveCounters {
    /// Days that may still be assigned as paid leave.
    pub fn assignable(&self) -> u32 {
        self.available + self.acquiring
    }
}

/// A single step in the audit trail recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A declaration together with the paid-leave counters and audit trail that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationReport {
    /// The declaration record.
    pub declaration: DeclarationResult,
    /// Paid-leave balances as of the declared month.
    pub counters: PaidLeaveCounters,
    /// Every rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// The payload handed to the portal form filler.
///
/// # Example
///
/// ```
/// use pajemploi_engine::models::DeclarationBatch;
///
/// let batch = DeclarationBatch { declarations: vec![] };
/// assert_eq!(serde_json::to_string(&batch).unwrap(), r#"{"declarations":[]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationBatch {
    /// One declaration per child.
    pub declarations: Vec<DeclarationResult>,
}
