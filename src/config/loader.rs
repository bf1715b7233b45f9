//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the regime and
//! the child contracts from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::ChildContract;

use super::types::{ContractsConfig, RegimeConfig};

/// Loads and provides access to the regime configuration and contracts.
///
/// # Directory Structure
///
/// ```text
/// config/pajemploi/
/// ├── regime.yaml     # Schedule, thresholds, allowance and paid-leave rules
/// └── contracts.yaml  # One contract per child
/// ```
///
/// # Example
///
/// ```no_run
/// use pajemploi_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pajemploi").unwrap();
/// let contract = loader.get_contract("Axelle").unwrap();
/// println!("Monthly salary: {}", contract.monthly_salary(loader.regime()));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    regime: RegimeConfig,
    contracts: Vec<ChildContract>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a file is missing, is not valid YAML, or if any
    /// contract fails validation. Invalid contracts surface as a parse error
    /// of `contracts.yaml`.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let regime = Self::load_yaml::<RegimeConfig>(&path.join("regime.yaml"))?;
        let contracts = Self::load_yaml::<ContractsConfig>(&path.join("contracts.yaml"))?;

        Self::from_parts(regime, contracts.children)
    }

    /// Builds a loader from in-memory parts, validating every contract.
    pub fn from_parts(regime: RegimeConfig, contracts: Vec<ChildContract>) -> EngineResult<Self> {
        for contract in &contracts {
            contract.validate()?;
        }

        debug!(
            regime = %regime.name,
            contracts = contracts.len(),
            "Loaded payroll configuration"
        );

        Ok(Self { regime, contracts })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the regime configuration.
    pub fn regime(&self) -> &RegimeConfig {
        &self.regime
    }

    /// Returns all contracts in file order.
    pub fn contracts(&self) -> &[ChildContract] {
        &self.contracts
    }

    /// Gets a contract by child name.
    pub fn get_contract(&self, name: &str) -> EngineResult<&ChildContract> {
        self.contracts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| EngineError::ChildNotFound {
                name: name.to_string(),
            })
    }
}
