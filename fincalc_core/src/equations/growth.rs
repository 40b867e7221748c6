//! # Compounding Projections
//!
//! Period-by-period growth with a fixed contribution:
//!
//! ```text
//! balance_{k+1} = balance_k · (1 + rate) + contribution
//! ```
//!
//! The loop stops when the balance reaches the target or when the period
//! cap is hit. The cap keeps a zero-growth, zero-contribution projection
//! from spinning forever.

use serde::{Deserialize, Serialize};

/// Outcome of a capped projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Periods simulated (0 if the start already met the target)
    pub periods: u32,
    /// Balance after the last simulated period
    pub final_balance: f64,
    /// Whether the target was reached within the cap
    pub reached: bool,
    /// Balance at the end of each simulated period
    pub balances: Vec<f64>,
}

/// One growth step.
#[inline]
pub fn grow(balance: f64, rate: f64, contribution: f64) -> f64 {
    balance * (1.0 + rate) + contribution
}

/// Project until `target` is reached or `max_periods` have elapsed.
///
/// ```rust
/// use fincalc_core::equations::project_until;
///
/// // 0 % growth, 100 per period, from 0 to 1000 → 10 periods
/// let p = project_until(0.0, 0.0, 100.0, 1000.0, 500);
/// assert!(p.reached);
/// assert_eq!(p.periods, 10);
/// ```
pub fn project_until(start: f64, rate: f64, contribution: f64, target: f64, max_periods: u32) -> Projection {
    let mut balance = start;
    let mut balances = Vec::new();

    if balance >= target {
        return Projection {
            periods: 0,
            final_balance: balance,
            reached: true,
            balances,
        };
    }

    for period in 1..=max_periods {
        balance = grow(balance, rate, contribution);
        balances.push(balance);
        if balance >= target {
            tracing::debug!(period, balance, target, "projection reached target");
            return Projection {
                periods: period,
                final_balance: balance,
                reached: true,
                balances,
            };
        }
    }

    tracing::warn!(max_periods, balance, target, "projection hit period cap without reaching target");
    Projection {
        periods: max_periods,
        final_balance: balance,
        reached: false,
        balances,
    }
}

/// Project for exactly `periods` steps with no target.
pub fn project_for(start: f64, rate: f64, contribution: f64, periods: u32) -> Projection {
    let mut balance = start;
    let mut balances = Vec::with_capacity(periods as usize);
    for _ in 0..periods {
        balance = grow(balance, rate, contribution);
        balances.push(balance);
    }
    Projection {
        periods,
        final_balance: balance,
        reached: true,
        balances,
    }
}
