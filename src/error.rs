//! Error types for the payroll declaration engine.
//!
//! The calculation core is made of total functions; errors only surface at the
//! edges: loading configuration, validating contracts and parsing caller input.

use thiserror::Error;

/// The main error type for the payroll declaration engine.
///
/// # Example
///
/// ```
/// use pajemploi_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/regime.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/regime.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A child contract was rejected before entering the calculation pipeline.
    #[error("Invalid contract field '{field}': {message}")]
    InvalidContract {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid month {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
    },

    /// A date key was not a well-formed `YYYY-MM-DD` string.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// No calendar exists for the named child.
    #[error("Child not found: {name}")]
    ChildNotFound {
        /// The child name that was looked up.
        name: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/regime.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/regime.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_contract_displays_field_and_message() {
        let error = EngineError::InvalidContract {
            field: "net_hourly_rate".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid contract field 'net_hourly_rate': must be positive"
        );
    }

    #[test]
    fn test_invalid_month_displays_year_and_month() {
        let error = EngineError::InvalidMonth {
            year: 2026,
            month: 13,
        };
        assert_eq!(error.to_string(), "Invalid month 2026-13");
    }

    #[test]
    fn test_invalid_date_displays_value() {
        let error = EngineError::InvalidDate {
            value: "2026-02-30".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date '2026-02-30': expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_child_not_found_displays_name() {
        let error = EngineError::ChildNotFound {
            name: "Axelle".to_string(),
        };
        assert_eq!(error.to_string(), "Child not found: Axelle");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_month() -> EngineResult<()> {
            Err(EngineError::InvalidMonth {
                year: 2026,
                month: 0,
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_month()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
