//! Paid leave ("congés payés") accrual.
//!
//! Paid leave accrues over a June to May reference period at 2.5 days per
//! four worked weeks and is taken during the following period. This module
//! computes the worked weeks, the accrued days, the Saturdays consumed
//! alongside a Friday off, and the counters shown next to the calendar.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::{PaidLeaveRules, RegimeConfig};
use crate::models::{
    AuditStep, ChildContract, DateSet, DaySets, PaidLeaveCounters, PayMonth, ReferencePeriod,
    monday_of,
};

use super::bank_holidays::BankHolidayCache;

/// The result of assembling a child's paid-leave counters.
#[derive(Debug, Clone)]
pub struct PaidLeaveCountersResult {
    /// The counters as of the displayed month.
    pub counters: PaidLeaveCounters,
    /// Worked weeks over the previous reference period.
    pub previous_worked_weeks: Decimal,
    /// Worked weeks of the current reference period up to the displayed month.
    pub current_worked_weeks: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the worked fraction of every week whose Monday falls in
/// `[start, end]`.
///
/// The whole Monday to Friday span of each week is evaluated, even past
/// `end`. A day counts as worked unless it is off, sick or contract-off, so
/// paid leave and bank holidays accrue like worked days. Each week
/// contributes `worked days / 5`.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::compute_worked_weeks;
/// use pajemploi_engine::models::DaySets;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
/// let mut days = DaySets::default();
/// days.sick_leave.insert(NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
/// assert_eq!(compute_worked_weeks(start, end, &days), Decimal::new(38, 1));
/// ```
pub fn compute_worked_weeks(start: NaiveDate, end: NaiveDate, days: &DaySets) -> Decimal {
    let mut monday = monday_of(start);
    if monday < start {
        monday = monday + Days::new(7);
    }

    let five = Decimal::from(5);
    let mut total = Decimal::ZERO;
    while monday <= end {
        let worked = monday
            .iter_days()
            .take(5)
            .filter(|d| {
                !days.days_off.contains(d)
                    && !days.sick_leave.contains(d)
                    && !days.contract_off.contains(d)
            })
            .count();
        total += Decimal::from(worked as u32) / five;
        monday = monday + Days::new(7);
    }
    total
}

/// Paid-leave days accrued for `worked_weeks`:
/// `min(ceil(worked_weeks / 4 × 2.5), 30)`, zero for non-positive input.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::compute_acquired_paid_leave;
/// use pajemploi_engine::config::PaidLeaveRules;
/// use rust_decimal::Decimal;
///
/// let rules = PaidLeaveRules::default();
/// assert_eq!(compute_acquired_paid_leave(Decimal::from(4), &rules), 3);
/// assert_eq!(compute_acquired_paid_leave(Decimal::from(52), &rules), 30);
/// ```
pub fn compute_acquired_paid_leave(worked_weeks: Decimal, rules: &PaidLeaveRules) -> u32 {
    if worked_weeks <= Decimal::ZERO {
        return 0;
    }
    let accrued = (worked_weeks / Decimal::from(4) * rules.days_per_four_weeks).ceil();
    accrued
        .to_u32()
        .unwrap_or(rules.annual_cap_days)
        .min(rules.annual_cap_days)
}

/// Saturdays consumed alongside a paid-leave Friday.
///
/// Paid leave is counted in Monday to Saturday "jours ouvrables". Walking the
/// paid-leave dates of `[start, end]` in order with a running balance starting
/// at `acquired_previous`, each date consumes one day. A Friday also consumes
/// the following Saturday when at least one day remains after the Friday and
/// the Saturday still falls within the period. A bank holiday Saturday is never
/// consumed, nor is one already recorded as paid leave.
pub fn compute_paid_leave_saturday_days(
    paid_leave: &DateSet,
    bank_holidays: &DateSet,
    acquired_previous: u32,
    start: NaiveDate,
    end: NaiveDate,
) -> DateSet {
    let mut saturdays = DateSet::new();
    if start > end {
        return saturdays;
    }

    let mut remaining = acquired_previous;
    for date in paid_leave.range(start..=end) {
        remaining = remaining.saturating_sub(1);
        if date.weekday() != Weekday::Fri || remaining < 1 {
            continue;
        }
        let Some(saturday) = date.succ_opt() else {
            continue;
        };
        if saturday > end
            || bank_holidays.contains(&saturday)
            || paid_leave.contains(&saturday)
        {
            continue;
        }
        saturdays.insert(saturday);
        remaining -= 1;
    }
    saturdays
}

/// Paid-leave days taken in `[start, end]`: explicit dates within the bounds
/// plus the auto-consumed Saturdays within them. A date is counted once.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::count_paid_leave_taken_in_period;
/// use pajemploi_engine::models::{DateSet, ReferencePeriod};
/// use chrono::NaiveDate;
///
/// let period = ReferencePeriod::starting_in(2025);
/// let paid = DateSet::from([
///     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
/// ]);
/// assert_eq!(count_paid_leave_taken_in_period(period.start, period.end, &paid, &DateSet::new()), 1);
/// ```
pub fn count_paid_leave_taken_in_period(
    start: NaiveDate,
    end: NaiveDate,
    paid_leave: &DateSet,
    auto_saturdays: &DateSet,
) -> u32 {
    if start > end {
        return 0;
    }
    let explicit = paid_leave.range(start..=end).count();
    let saturdays = auto_saturdays
        .range(start..=end)
        .filter(|saturday| !paid_leave.contains(saturday))
        .count();
    (explicit + saturdays) as u32
}

/// Assembles the paid-leave counters of one child as of `month`.
///
/// Days acquired over the previous reference period are counted from the
/// later of the period start and the contract start. Leave taken covers the
/// whole current period. Days still accruing run from the current period
/// start (or contract start) to the end of `month`, reduced by any leave
/// taken beyond the previous period's balance.
pub fn paid_leave_counters(
    contract: &ChildContract,
    days: &DaySets,
    month: PayMonth,
    config: &RegimeConfig,
    holidays: &BankHolidayCache,
    step_number: u32,
) -> PaidLeaveCountersResult {
    let rules = &config.paid_leave;
    let current_period = ReferencePeriod::containing(month.first_day());
    let previous_period = current_period.previous();

    let previous_start = previous_period.start.max(contract.contract_start_date);
    let previous_worked_weeks = compute_worked_weeks(previous_start, previous_period.end, days);
    let acquired_previous = compute_acquired_paid_leave(previous_worked_weeks, rules);

    let auto_saturdays = compute_paid_leave_saturday_days(
        &days.paid_leave,
        &holidays.holidays_between(current_period.start, current_period.end),
        acquired_previous,
        current_period.start,
        current_period.end,
    );
    let taken_in_current = count_paid_leave_taken_in_period(
        current_period.start,
        current_period.end,
        &days.paid_leave,
        &auto_saturdays,
    );
    let available = acquired_previous.saturating_sub(taken_in_current);

    let current_start = current_period.start.max(contract.contract_start_date);
    let current_worked_weeks = compute_worked_weeks(current_start, month.last_day(), days);
    let accrued = compute_acquired_paid_leave(current_worked_weeks, rules);
    let overdrawn = taken_in_current.saturating_sub(acquired_previous);
    let acquiring = accrued.saturating_sub(overdrawn);

    let audit_step = AuditStep {
        step_number,
        rule_id: "paid_leave_accrual".to_string(),
        rule_name: "Paid Leave Accrual".to_string(),
        input: serde_json::json!({
            "child": contract.name,
            "month": month.to_string(),
            "contract_start_date": contract.contract_start_date.to_string(),
            "previous_period": previous_period,
            "current_period": current_period,
            "paid_leave_dates": days.paid_leave.len()
        }),
        output: serde_json::json!({
            "previous_worked_weeks": previous_worked_weeks.normalize().to_string(),
            "acquired_previous": acquired_previous,
            "auto_saturdays": auto_saturdays.len(),
            "taken_in_current": taken_in_current,
            "available": available,
            "current_worked_weeks": current_worked_weeks.normalize().to_string(),
            "acquiring": acquiring
        }),
        reasoning: format!(
            "{} worked weeks from {} give {} days; {} taken leaves {} available; {} worked weeks this period accrue {} ({} net)",
            previous_worked_weeks.normalize(),
            previous_start,
            acquired_previous,
            taken_in_current,
            available,
            current_worked_weeks.normalize(),
            accrued,
            acquiring
        ),
    };

    PaidLeaveCountersResult {
        counters: PaidLeaveCounters {
            acquired_previous,
            taken_in_current,
            available,
            acquiring,
            auto_saturdays,
            current_period,
            previous_period,
        },
        previous_worked_weeks,
        current_worked_weeks,
        audit_step,
    }
}
