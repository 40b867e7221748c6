//! # Rate Types
//!
//! Lightweight newtype wrappers that keep "7 percent" and "0.005833 per month"
//! from being mixed up. They serialize as bare numbers so JSON stays clean.
//!
//! ## Example
//!
//! ```rust
//! use fincalc_core::rates::{MonthlyRate, Percent};
//!
//! let apr = Percent(6.0);
//! let monthly: MonthlyRate = apr.into();
//! assert!((monthly.0 - 0.005).abs() < 1e-12);
//! assert!((apr.fraction() - 0.06).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// Months in a year; every annual rate in this crate compounds monthly.
pub const MONTHS_PER_YEAR: f64 = 12.0;

// ============================================================================
// Rates
// ============================================================================

/// A rate expressed in percent (7.0 == 7 %)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// The rate as a plain fraction (7 % → 0.07)
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Build from a plain fraction (0.07 → 7 %)
    pub fn from_fraction(fraction: f64) -> Self {
        Percent(fraction * 100.0)
    }
}

/// A periodic monthly rate as a plain fraction (0.005 == 0.5 % per month)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyRate(pub f64);

impl MonthlyRate {
    /// Annualize back to a nominal APR in percent (`r·12·100`)
    pub fn to_apr(self) -> Percent {
        Percent(self.0 * MONTHS_PER_YEAR * 100.0)
    }

    /// Effective annual rate in percent, `(1+r)^12 − 1`
    pub fn effective_annual(self) -> Percent {
        Percent::from_fraction((1.0 + self.0).powf(MONTHS_PER_YEAR) - 1.0)
    }
}

impl From<Percent> for MonthlyRate {
    /// Nominal APR → monthly rate (`apr/100/12`)
    fn from(apr: Percent) -> Self {
        MonthlyRate(apr.fraction() / MONTHS_PER_YEAR)
    }
}
