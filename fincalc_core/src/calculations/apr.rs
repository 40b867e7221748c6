//! # APR From Fees
//!
//! The payment is set by the note rate on the full loan amount, but the
//! borrower only receives `loan_amount − fees`. The APR is the rate at which
//! that payment stream is worth exactly the amount financed, found by
//! bisection over monthly rates in `[0, 1]`.
//!
//! ```rust
//! use fincalc_core::calculations::apr::{calculate, AprInput};
//! use fincalc_core::config::Settings;
//!
//! let input = AprInput {
//!     label: "Refi".to_string(),
//!     loan_amount: 300_000.0,
//!     note_rate_percent: 7.0,
//!     term_months: 360,
//!     fees: 6_000.0,
//! };
//! let result = calculate(&input, &Settings::default()).unwrap();
//! assert!(result.apr_percent > 7.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::equations::{amortized_payment, monthly_rate, solve_monthly_rate};
use crate::errors::{require_non_negative, require_percent, require_positive, CalcError, CalcResult};
use crate::rates::MonthlyRate;

/// Input parameters for the APR calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AprInput {
    #[serde(default)]
    pub label: String,

    /// Face amount of the loan
    pub loan_amount: f64,

    /// Contract (note) rate in percent
    pub note_rate_percent: f64,

    /// Number of monthly payments
    pub term_months: u32,

    /// Up-front fees deducted from the amount financed
    #[serde(default)]
    pub fees: f64,
}

impl AprInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("loan_amount", self.loan_amount)?;
        require_percent("note_rate_percent", self.note_rate_percent, 100.0)?;
        if self.term_months == 0 {
            return Err(CalcError::invalid_input("term_months", "0", "Term must be at least one month"));
        }
        require_non_negative("fees", self.fees)?;
        if self.fees >= self.loan_amount {
            return Err(CalcError::invalid_input(
                "fees",
                self.fees.to_string(),
                "Fees must be less than the loan amount",
            ));
        }
        Ok(())
    }
}

/// Results from the APR calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AprResult {
    /// Payment at the note rate on the full loan amount
    pub monthly_payment: f64,

    /// `loan_amount − fees`
    pub amount_financed: f64,

    /// Solved annual percentage rate (`r·12·100`)
    pub apr_percent: f64,

    /// `apr_percent − note_rate_percent`
    pub apr_spread_percent: f64,

    /// Effective annual rate implied by the solved monthly rate
    pub effective_annual_percent: f64,

    /// Total of payments minus the amount financed
    pub finance_charge: f64,

    /// Bisection iterations used
    pub iterations: u32,

    /// Whether the solver met its tolerance
    pub converged: bool,
}

/// Solve the APR implied by the fees.
pub fn calculate(input: &AprInput, settings: &Settings) -> CalcResult<AprResult> {
    input.validate()?;

    let n = input.term_months;
    let monthly_payment = amortized_payment(input.loan_amount, monthly_rate(input.note_rate_percent), n);
    let amount_financed = input.loan_amount - input.fees;

    let outcome = solve_monthly_rate(monthly_payment, amount_financed, n, &settings.solver)?;
    let rate = MonthlyRate(outcome.root);
    let apr_percent = rate.to_apr().0;

    tracing::debug!(
        label = %input.label,
        apr_percent,
        iterations = outcome.iterations,
        "APR solved"
    );

    Ok(AprResult {
        monthly_payment,
        amount_financed,
        apr_percent,
        apr_spread_percent: apr_percent - input.note_rate_percent,
        effective_annual_percent: rate.effective_annual().0,
        finance_charge: monthly_payment * f64::from(n) - amount_financed,
        iterations: outcome.iterations,
        converged: outcome.converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::present_value;

    fn refi() -> AprInput {
        AprInput {
            label: "Refi".to_string(),
            loan_amount: 300_000.0,
            note_rate_percent: 7.0,
            term_months: 360,
            fees: 6_000.0,
        }
    }

    #[test]
    fn test_no_fees_matches_note_rate() {
        let mut input = refi();
        input.fees = 0.0;
        let result = calculate(&input, &Settings::default()).unwrap();
        assert!((result.apr_percent - 7.0).abs() < 1e-6);
        assert!(result.apr_spread_percent.abs() < 1e-6);
    }

    #[test]
    fn test_fees_raise_apr() {
        let result = calculate(&refi(), &Settings::default()).unwrap();
        // 2 % of points on a 30-year loan adds roughly 0.2 points of APR
        assert!(result.apr_percent > 7.15 && result.apr_percent < 7.25);
        assert!(result.converged);
        assert!(result.iterations <= 60);
    }

    #[test]
    fn test_solved_rate_reproduces_amount_financed() {
        let result = calculate(&refi(), &Settings::default()).unwrap();
        let r = result.apr_percent / 12.0 / 100.0;
        let pv = present_value(result.monthly_payment, r, 360);
        assert!((pv - result.amount_financed).abs() < 1e-6);
    }

    #[test]
    fn test_finance_charge() {
        let result = calculate(&refi(), &Settings::default()).unwrap();
        let expected = result.monthly_payment * 360.0 - 294_000.0;
        assert!((result.finance_charge - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_note_rate_with_fees() {
        let input = AprInput {
            label: String::new(),
            loan_amount: 12_000.0,
            note_rate_percent: 0.0,
            term_months: 12,
            fees: 500.0,
        };
        let result = calculate(&input, &Settings::default()).unwrap();
        assert!(result.apr_percent > 0.0);
    }

    #[test]
    fn test_rejects_fees_exceeding_loan() {
        let mut input = refi();
        input.fees = 300_000.0;
        let err = calculate(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), Some("fees"));
    }
}
