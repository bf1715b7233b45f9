//! Majored hours ("heures majorées") calculation.
//!
//! The weekly schedule runs 45.75 hours, 0.75 above the 45 hour threshold.
//! Every fully worked Monday to Friday week therefore earns 0.75 majored
//! hours, credited to a single month.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RegimeConfig;
use crate::models::{AuditStep, DateSet, PayMonth};

use super::bank_holidays::BankHolidayCache;
use super::calendar::{calendar_grid, week_key};

/// The result of the majored hours calculation.
#[derive(Debug, Clone)]
pub struct MajoredHoursResult {
    /// Week keys (`YYYY-Www`) credited to the month.
    pub qualifying_weeks: Vec<String>,
    /// Majored hours credited to the month.
    pub count: Decimal,
    /// `count × majored_hour_rate`.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Lists the ISO weeks whose majored hours belong to `month`.
///
/// A week qualifies when it has five business days, none of them in
/// `off_like` or `sick_days` and none a bank holiday. A qualifying week
/// straddling two months belongs to the later one.
pub fn qualifying_weeks(
    month: PayMonth,
    off_like: &DateSet,
    sick_days: &DateSet,
    holidays: &BankHolidayCache,
) -> Vec<String> {
    let mut weeks: BTreeMap<String, Vec<chrono::NaiveDate>> = BTreeMap::new();
    for week in calendar_grid(month) {
        for day in week.days.iter().filter(|d| d.is_business_day) {
            weeks.entry(week_key(day.date)).or_default().push(day.date);
        }
    }

    weeks
        .into_iter()
        .filter(|(_, days)| days.len() == 5)
        .filter(|(_, days)| {
            days.iter().all(|d| {
                !off_like.contains(d) && !sick_days.contains(d) && !holidays.is_bank_holiday(*d)
            })
        })
        .filter(|(_, days)| {
            days.iter()
                .max()
                .is_some_and(|last| PayMonth::containing(*last) == month)
        })
        .map(|(key, _)| key)
        .collect()
}

/// Computes the majored hours credited to `month`.
///
/// # Example
///
/// ```
/// use pajemploi_engine::calculation::{BankHolidayCache, compute_majored_hours};
/// use pajemploi_engine::config::RegimeConfig;
/// use pajemploi_engine::models::{DateSet, PayMonth};
/// use rust_decimal::Decimal;
///
/// let result = compute_majored_hours(
///     PayMonth::new(2026, 2).unwrap(),
///     &DateSet::new(),
///     &DateSet::new(),
///     Decimal::new(429, 2),
///     &RegimeConfig::default(),
///     &BankHolidayCache::new(),
///     1,
/// );
/// assert_eq!(result.count, Decimal::from(3));
/// assert_eq!(result.amount, Decimal::new(1287, 2));
/// ```
pub fn compute_majored_hours(
    month: PayMonth,
    off_like: &DateSet,
    sick_days: &DateSet,
    majored_hour_rate: Decimal,
    config: &RegimeConfig,
    holidays: &BankHolidayCache,
    step_number: u32,
) -> MajoredHoursResult {
    let weeks = qualifying_weeks(month, off_like, sick_days, holidays);
    let per_week = config.majored_hours_per_week();
    let count = Decimal::from(weeks.len() as u32) * per_week;
    let amount = count * majored_hour_rate;

    debug!(month = %month, weeks = weeks.len(), "Majored hours computed");

    let audit_step = AuditStep {
        step_number,
        rule_id: "majored_hours".to_string(),
        rule_name: "Majored Hours".to_string(),
        input: serde_json::json!({
            "month": month.to_string(),
            "majored_hours_per_week": per_week.normalize().to_string(),
            "majored_hour_rate": majored_hour_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "qualifying_weeks": &weeks,
            "count": count.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} fully worked weeks × {}h = {}h; {}h × €{} = €{}",
            weeks.len(),
            per_week.normalize(),
            count.normalize(),
            count.normalize(),
            majored_hour_rate.normalize(),
            amount.normalize()
        ),
    };

    MajoredHoursResult {
        qualifying_weeks: weeks,
        count,
        amount,
        audit_step,
    }
}
