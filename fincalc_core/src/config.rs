//! # Settings
//!
//! Global settings shared by every calculator: display formatting, solver
//! limits and projection caps. Settings are read from a TOML file; any key
//! that is missing falls back to its default.
//!
//! ## Example
//!
//! ```rust
//! use fincalc_core::config::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//! [display]
//! currency_symbol = "€"
//!
//! [solver]
//! max_iterations = 80
//! "#).unwrap();
//!
//! assert_eq!(settings.display.currency_symbol, "€");
//! assert_eq!(settings.display.decimals, 2);
//! assert_eq!(settings.solver.max_iterations, 80);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default bisection iteration cap
pub const DEFAULT_MAX_ITERATIONS: u32 = 60;

/// Default bisection tolerance on the target value
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Root settings container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How numbers are rendered
    pub display: DisplaySettings,

    /// Bisection limits
    pub solver: SolverSettings,

    /// Caps for year-by-year and month-by-month projections
    pub projection: ProjectionSettings,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;
        let settings: Settings = toml::from_str(&text)
            .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;
        settings
            .validate()
            .map_err(|e| CalcError::config_error(path.display().to_string(), e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: Settings = toml::from_str(text)
            .map_err(|e| CalcError::SerializationError { reason: e.to_string() })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject caps and tolerances that would make the solvers useless.
    pub fn validate(&self) -> CalcResult<()> {
        if self.solver.max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "solver.max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        if self.solver.tolerance.is_nan() || self.solver.tolerance <= 0.0 {
            return Err(CalcError::invalid_input(
                "solver.tolerance",
                self.solver.tolerance.to_string(),
                "Tolerance must be positive",
            ));
        }
        if self.projection.max_years == 0 || self.projection.max_months == 0 {
            return Err(CalcError::invalid_input(
                "projection",
                format!("{}y/{}m", self.projection.max_years, self.projection.max_months),
                "Projection caps must be positive",
            ));
        }
        if self.display.decimals > 8 {
            return Err(CalcError::invalid_input(
                "display.decimals",
                self.display.decimals.to_string(),
                "At most 8 decimals are supported",
            ));
        }
        Ok(())
    }
}

/// Number formatting options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Symbol placed before currency amounts
    pub currency_symbol: String,

    /// Decimal places for currency amounts
    pub decimals: usize,

    /// Shown in place of a value that could not be computed
    pub placeholder: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: "$".to_string(),
            decimals: 2,
            placeholder: "—".to_string(),
        }
    }
}

/// Bisection limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub max_iterations: u32,
    pub tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Iteration caps for compounding projections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    /// Cap for year-by-year projections (FIRE)
    pub max_years: u32,

    /// Cap for month-by-month projections (savings goal, loan payoff)
    pub max_months: u32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        ProjectionSettings {
            max_years: 100,
            max_months: 1200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.display.currency_symbol, "$");
        assert_eq!(settings.solver.max_iterations, 60);
        assert_eq!(settings.solver.tolerance, 1e-7);
        assert_eq!(settings.projection.max_months, 1200);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_section() {
        let settings = Settings::from_toml_str("[projection]\nmax_years = 50\n").unwrap();
        assert_eq!(settings.projection.max_years, 50);
        assert_eq!(settings.projection.max_months, 1200);
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let err = Settings::from_toml_str("[solver]\nmax_iterations = 0\n").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = Settings::from_toml_str("[display\n").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/fincalc.toml")).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
