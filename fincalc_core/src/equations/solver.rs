//! # Bisection Solver
//!
//! Bounded bisection for monotone functions. Used to back out the monthly
//! rate implied by a payment stream (APR with fees).
//!
//! The search stops as soon as `|f(mid) − target|` falls below the
//! tolerance, or after `max_iterations` halvings, whichever comes first.

use serde::{Deserialize, Serialize};

use super::amortization::present_value;
use crate::config::SolverSettings;
use crate::errors::{CalcError, CalcResult};

/// Result of a bisection search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOutcome {
    /// Best estimate of the root
    pub root: f64,
    /// Iterations actually performed
    pub iterations: u32,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
}

/// Whether `f` rises or falls across the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Monotonic {
    Increasing,
    Decreasing,
}

/// Find `x ∈ [lo, hi]` with `f(x) ≈ target` for a monotone `f`.
///
/// The caller is responsible for the bracket actually containing the
/// target; see [`solve_monthly_rate`] for a checked wrapper.
pub fn bisect<F>(f: F, lo: f64, hi: f64, target: f64, direction: Monotonic, settings: &SolverSettings) -> SolverOutcome
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = (lo, hi);
    let mut mid = (lo + hi) / 2.0;

    for iteration in 1..=settings.max_iterations {
        mid = (lo + hi) / 2.0;
        let value = f(mid);
        let diff = value - target;

        if diff.abs() < settings.tolerance {
            tracing::debug!(iteration, root = mid, "bisection converged");
            return SolverOutcome {
                root: mid,
                iterations: iteration,
                converged: true,
            };
        }

        let go_right = match direction {
            Monotonic::Increasing => diff < 0.0,
            Monotonic::Decreasing => diff > 0.0,
        };
        if go_right {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    tracing::warn!(
        max_iterations = settings.max_iterations,
        root = mid,
        "bisection hit iteration cap before tolerance"
    );
    SolverOutcome {
        root: mid,
        iterations: settings.max_iterations,
        converged: false,
    }
}

/// Lower edge of the monthly-rate search bracket
pub const RATE_BRACKET_LO: f64 = 0.0;

/// Upper edge of the monthly-rate search bracket (100 % per month)
pub const RATE_BRACKET_HI: f64 = 1.0;

/// Solve for the monthly rate `r ∈ [0, 1]` at which `n` payments of
/// `payment` have a present value equal to `financed`.
///
/// ```rust
/// use fincalc_core::config::SolverSettings;
/// use fincalc_core::equations::{amortized_payment, monthly_rate, solve_monthly_rate};
///
/// let payment = amortized_payment(10_000.0, monthly_rate(6.0), 36);
/// let outcome = solve_monthly_rate(payment, 10_000.0, 36, &SolverSettings::default()).unwrap();
/// assert!((outcome.root * 12.0 * 100.0 - 6.0).abs() < 1e-6);
/// ```
pub fn solve_monthly_rate(payment: f64, financed: f64, n: u32, settings: &SolverSettings) -> CalcResult<SolverOutcome> {
    if n == 0 {
        return Err(CalcError::invalid_input("term_months", "0", "Term must be at least one month"));
    }
    if !(payment > 0.0 && financed > 0.0) {
        return Err(CalcError::invalid_input(
            "amount_financed",
            financed.to_string(),
            "Payment and amount financed must be positive",
        ));
    }

    // PV falls as the rate rises, so the bracket ends give the PV range
    let pv_at_lo = present_value(payment, RATE_BRACKET_LO, n);
    let pv_at_hi = present_value(payment, RATE_BRACKET_HI, n);

    if financed > pv_at_lo + settings.tolerance {
        return Err(CalcError::calculation_failed(
            "APR",
            format!(
                "Amount financed {:.2} exceeds total of payments {:.2}; rate would be negative",
                financed, pv_at_lo
            ),
        ));
    }
    if financed < pv_at_hi {
        return Err(CalcError::calculation_failed(
            "APR",
            "Implied rate exceeds 100% per month",
        ));
    }

    let outcome = bisect(
        |r| present_value(payment, r, n),
        RATE_BRACKET_LO,
        RATE_BRACKET_HI,
        financed,
        Monotonic::Decreasing,
        settings,
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::amortization::{amortized_payment, monthly_rate};

    #[test]
    fn test_bisect_sqrt_two() {
        let outcome = bisect(|x| x * x, 0.0, 2.0, 2.0, Monotonic::Increasing, &SolverSettings::default());
        assert!((outcome.root - std::f64::consts::SQRT_2).abs() < 1e-7);
        assert!(outcome.converged);
    }

    #[test]
    fn test_bisect_respects_iteration_cap() {
        let settings = SolverSettings {
            max_iterations: 3,
            tolerance: 1e-12,
        };
        let outcome = bisect(|x| x, 0.0, 1.0, 0.3, Monotonic::Increasing, &settings);
        assert_eq!(outcome.iterations, 3);
        assert!(!outcome.converged);
    }

    #[test]
    fn test_recovers_note_rate_without_fees() {
        let r = monthly_rate(7.0);
        let payment = amortized_payment(300_000.0, r, 360);
        let outcome = solve_monthly_rate(payment, 300_000.0, 360, &SolverSettings::default()).unwrap();
        assert!((outcome.root - r).abs() < 1e-10);
    }

    #[test]
    fn test_fees_raise_rate() {
        let r = monthly_rate(7.0);
        let payment = amortized_payment(300_000.0, r, 360);
        let outcome = solve_monthly_rate(payment, 294_000.0, 360, &SolverSettings::default()).unwrap();
        assert!(outcome.root > r);
        let pv = present_value(payment, outcome.root, 360);
        assert!((pv - 294_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_solution() {
        // 12 payments of 100 financing exactly 1200 → 0 %
        let outcome = solve_monthly_rate(100.0, 1200.0, 12, &SolverSettings::default()).unwrap();
        assert!(outcome.root < 1e-9);
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = solve_monthly_rate(100.0, 1300.0, 12, &SolverSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_rejects_absurd_rate() {
        let err = solve_monthly_rate(100.0, 50.0, 12, &SolverSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_rejects_zero_term() {
        assert!(solve_monthly_rate(100.0, 50.0, 0, &SolverSettings::default()).is_err());
    }
}
