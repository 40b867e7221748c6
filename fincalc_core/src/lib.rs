//! # fincalc_core - Personal Finance Calculation Engine
//!
//! `fincalc_core` provides single-purpose financial calculators (loans, APR,
//! FIRE, retirement, currency exchange, oil futures, tax and more) behind a
//! clean, JSON-friendly API. Every calculator is a pure function from an
//! input record to a result record.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Estimates only**: Results are advisory; domain rules of thumb are simplified
//!
//! ## Quick Start
//!
//! ```rust
//! use fincalc_core::calculations::{evaluate, CalculationItem, CalculationOutput};
//! use fincalc_core::Settings;
//!
//! let item = CalculationItem::from_json(
//!     r#"{ "type": "Loan", "principal": 300000.0, "apr_percent": 7.0, "term_months": 360 }"#,
//! ).unwrap();
//!
//! if let CalculationOutput::Loan(result) = evaluate(&item, &Settings::default()).unwrap() {
//!     assert!((result.monthly_payment - 1995.91).abs() < 0.01);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculators and the tagged `CalculationItem` wrapper
//! - [`equations`] - Shared amortization, solver and projection kernels
//! - [`config`] - Solver, projection and display settings (TOML)
//! - [`format`] - Currency and percent formatting for display
//! - [`rates`] - Percent and monthly-rate newtypes
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod format;
pub mod rates;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, CalculationItem, CalculationOutput};
pub use config::Settings;
pub use errors::{CalcError, CalcResult};
