//! Configuration loading for the payroll declaration engine.
//!
//! This module loads the regime parameters and the child contracts from YAML
//! files in a configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use pajemploi_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pajemploi").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AllowanceRates, ContractsConfig, PaidLeaveRules, RegimeConfig, WeeklySchedule};
