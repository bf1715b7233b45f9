//! Configuration types for the Pajemploi regime.
//!
//! These structures are deserialized from `regime.yaml` and `contracts.yaml`.
//! Every field has a default matching the regime currently declared on the
//! portal, so a partial file only overrides what it names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ChildContract;

/// Contractual working hours per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklySchedule {
    /// Hours worked on each of Monday to Thursday.
    pub monday_to_thursday_hours: Decimal,
    /// Hours worked on Friday.
    pub friday_hours: Decimal,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            monday_to_thursday_hours: Decimal::new(925, 2),
            friday_hours: Decimal::new(875, 2),
        }
    }
}

impl WeeklySchedule {
    /// Total hours of a full Monday to Friday week (45.75 by default).
    pub fn hours_per_week(&self) -> Decimal {
        self.monday_to_thursday_hours * Decimal::from(4) + self.friday_hours
    }
}

/// Fixed per-day allowance rates, in euros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowanceRates {
    /// Maintenance allowance ("indemnité d'entretien") per worked day.
    pub maintenance_per_day: Decimal,
    /// Meal allowance ("indemnité de repas") per worked day.
    pub meal_per_day: Decimal,
}

impl Default for AllowanceRates {
    fn default() -> Self {
        Self {
            maintenance_per_day: Decimal::from(4),
            meal_per_day: Decimal::from(4),
        }
    }
}

/// Paid-leave ("congés payés") accrual and payout parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaidLeaveRules {
    /// Days accrued for every four worked weeks.
    pub days_per_four_weeks: Decimal,
    /// Legal annual maximum of accrued days.
    pub annual_cap_days: u32,
    /// Paid leave is counted in "jours ouvrables", six per week.
    pub working_days_per_week: Decimal,
    /// Rate of the "10% rule" payout method.
    pub ten_percent_rate: Decimal,
    /// Calendar month (1-12) in which the payout is declared.
    pub payout_month: u32,
}

impl Default for PaidLeaveRules {
    fn default() -> Self {
        Self {
            days_per_four_weeks: Decimal::new(25, 1),
            annual_cap_days: 30,
            working_days_per_week: Decimal::from(6),
            ten_percent_rate: Decimal::new(10, 2),
            payout_month: 8,
        }
    }
}

/// The complete regime configuration.
///
/// # Example
///
/// ```
/// use pajemploi_engine::config::RegimeConfig;
/// use rust_decimal::Decimal;
///
/// let config = RegimeConfig::default();
/// assert_eq!(config.hours_per_week(), Decimal::new(4575, 2));
/// assert_eq!(config.normal_hours_per_week(), Decimal::from(45));
/// assert_eq!(config.majored_hours_per_week(), Decimal::new(75, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeConfig {
    /// Human-readable name of the regime.
    pub name: String,
    /// Daily hours schedule.
    pub schedule: WeeklySchedule,
    /// Weekly hours above which hours are majored.
    pub majored_threshold_hours: Decimal,
    /// Paid weeks per year used to smooth the monthly salary.
    pub weeks_per_year: Decimal,
    /// Per-day allowance rates.
    pub allowances: AllowanceRates,
    /// Paid-leave rules.
    pub paid_leave: PaidLeaveRules,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            name: "Pajemploi".to_string(),
            schedule: WeeklySchedule::default(),
            majored_threshold_hours: Decimal::from(45),
            weeks_per_year: Decimal::from(45),
            allowances: AllowanceRates::default(),
            paid_leave: PaidLeaveRules::default(),
        }
    }
}

impl RegimeConfig {
    /// Contractual hours of a full week.
    pub fn hours_per_week(&self) -> Decimal {
        self.schedule.hours_per_week()
    }

    /// Weekly hours paid at the normal net rate.
    pub fn normal_hours_per_week(&self) -> Decimal {
        self.hours_per_week().min(self.majored_threshold_hours)
    }

    /// Weekly hours paid at the majored rate; also the majored hours credited
    /// for every fully worked week.
    pub fn majored_hours_per_week(&self) -> Decimal {
        (self.hours_per_week() - self.majored_threshold_hours).max(Decimal::ZERO)
    }
}

/// Contracts configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
    /// One contract per child in care.
    pub children: Vec<ChildContract>,
}
