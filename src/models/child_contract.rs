//! Child contract model.
//!
//! One [`ChildContract`] exists per child in care. Its shape is shared with the
//! settings screen that edits and persists it, so it serializes with camelCase
//! keys and plain JSON numbers. Deserialized contracts are validated like
//! those built with [`ChildContract::new`].

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::RegimeConfig;
use crate::error::{EngineError, EngineResult};

/// The employment contract for one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ContractRecord")]
pub struct ChildContract {
    /// The child's name, used as the identifier across the engine.
    pub name: String,
    /// Net hourly rate for normal hours, in euros.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_hourly_rate: Decimal,
    /// Net hourly rate for majored hours, in euros.
    #[serde(with = "rust_decimal::serde::float")]
    pub majored_hour_rate: Decimal,
    /// First day of the contract; no paid leave accrues before it.
    pub contract_start_date: NaiveDate,
}

/// The persisted shape of a contract, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractRecord {
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    net_hourly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    majored_hour_rate: Decimal,
    contract_start_date: NaiveDate,
}

impl TryFrom<ContractRecord> for ChildContract {
    type Error = EngineError;

    fn try_from(record: ContractRecord) -> EngineResult<Self> {
        Self::new(
            record.name,
            record.net_hourly_rate,
            record.majored_hour_rate,
            record.contract_start_date,
        )
    }
}

impl ChildContract {
    /// Creates a validated contract.
    ///
    /// # Example
    ///
    /// ```
    /// use pajemploi_engine::models::ChildContract;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
    /// assert!(ChildContract::new("Axelle", Decimal::new(390, 2), Decimal::new(429, 2), start).is_ok());
    /// assert!(ChildContract::new("Axelle", Decimal::ZERO, Decimal::new(429, 2), start).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        net_hourly_rate: Decimal,
        majored_hour_rate: Decimal,
        contract_start_date: NaiveDate,
    ) -> EngineResult<Self> {
        let contract = Self {
            name: name.into(),
            net_hourly_rate,
            majored_hour_rate,
            contract_start_date,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Rejects contracts that must not enter the calculation pipeline.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidContract {
                field: "name".to_string(),
                message: "cannot be blank".to_string(),
            });
        }
        if self.net_hourly_rate <= Decimal::ZERO {
            return Err(EngineError::InvalidContract {
                field: "net_hourly_rate".to_string(),
                message: format!("must be positive, got {}", self.net_hourly_rate),
            });
        }
        if self.majored_hour_rate <= Decimal::ZERO {
            return Err(EngineError::InvalidContract {
                field: "majored_hour_rate".to_string(),
                message: format!("must be positive, got {}", self.majored_hour_rate),
            });
        }
        Ok(())
    }

    /// The smoothed monthly salary ("salaire mensualisé").
    ///
    /// `net_hourly_rate × normal hours per week × weeks per year / 12`,
    /// rounded to the cent with halves rounded away from zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pajemploi_engine::config::RegimeConfig;
    /// use pajemploi_engine::models::ChildContract;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let contract = ChildContract::new(
    ///     "Axelle",
    ///     Decimal::new(390, 2),
    ///     Decimal::new(429, 2),
    ///     NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
    /// ).unwrap();
    /// // 3.90 × 45 × 45 / 12 = 658.125
    /// assert_eq!(contract.monthly_salary(&RegimeConfig::default()), Decimal::new(65813, 2));
    /// ```
    pub fn monthly_salary(&self, config: &RegimeConfig) -> Decimal {
        (self.net_hourly_rate * config.normal_hours_per_week() * config.weeks_per_year
            / Decimal::from(12))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
