//! # Error Types
//!
//! Structured error types for fincalc_core. Every calculator rejects bad input
//! up front instead of producing `NaN` or infinity, so callers can show a
//! placeholder or a short inline message next to the offending field.
//!
//! ## Example
//!
//! ```rust
//! use fincalc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_principal(principal: f64) -> CalcResult<()> {
//!     if principal <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "principal".to_string(),
//!             value: principal.to_string(),
//!             reason: "Principal must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fincalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (negative, non-finite, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Inputs were valid but no answer exists (e.g. no APR inside the search bracket)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Settings file could not be read or is inconsistent
    #[error("Config error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } | CalcError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Reject NaN and infinities.
pub fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    Ok(())
}

/// Require `value > 0`.
pub fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

/// Require `value >= 0`.
pub fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

/// Require a percentage in `[0, max]`.
pub fn require_percent(field: &str, value: f64, max: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value < 0.0 || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Percentage must be between 0 and {}", max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("principal", "-5", "Principal must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("record_date").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::calculation_failed("APR", "no root").error_code(),
            "CALCULATION_FAILED"
        );
        assert_eq!(CalcError::config_error("a.toml", "bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_field_accessor() {
        let err = CalcError::invalid_input("apr_percent", "-1", "negative");
        assert_eq!(err.field(), Some("apr_percent"));
        assert_eq!(CalcError::calculation_failed("x", "y").field(), None);
    }

    #[test]
    fn test_validation_helpers() {
        assert!(require_positive("p", 1.0).is_ok());
        assert!(require_positive("p", 0.0).is_err());
        assert!(require_positive("p", f64::NAN).is_err());
        assert!(require_non_negative("p", 0.0).is_ok());
        assert!(require_non_negative("p", -0.01).is_err());
        assert!(require_percent("rate", 100.0, 100.0).is_ok());
        assert!(require_percent("rate", 100.5, 100.0).is_err());
        assert!(require_finite("x", f64::INFINITY).is_err());
    }
}
