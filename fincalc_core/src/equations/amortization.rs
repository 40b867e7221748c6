//! # Time-Value-of-Money Formulas
//!
//! Closed-form annuity formulas shared by the loan, APR, DSCR and savings
//! calculators.
//!
//! ## Notation
//!
//! - `P` = Principal (present value)
//! - `r` = Periodic (monthly) rate as a fraction
//! - `n` = Number of periods
//! - `A` = Level payment per period
//!
//! Every formula has an explicit `r = 0` branch; the general form divides by
//! zero there. Growth factors go through `ln_1p`/`exp_m1` so tiny rates keep
//! their precision.

use serde::{Deserialize, Serialize};

/// Monthly rate from a nominal APR in percent: `r = apr/100/12`
#[inline]
pub fn monthly_rate(apr_percent: f64) -> f64 {
    apr_percent / 100.0 / 12.0
}

/// Level payment that amortizes `P` over `n` periods at rate `r`.
///
/// # Formula
/// - `r = 0`: `A = P/n`
/// - otherwise: `A = P·r·(1+r)^n / ((1+r)^n − 1)`
///
/// ```rust
/// use fincalc_core::equations::{amortized_payment, monthly_rate};
///
/// let payment = amortized_payment(300_000.0, monthly_rate(7.0), 360);
/// assert!((payment - 1995.91).abs() < 0.01);
/// ```
#[inline]
pub fn amortized_payment(principal: f64, r: f64, n: u32) -> f64 {
    let n_f = f64::from(n);
    if r == 0.0 {
        return principal / n_f;
    }
    let growth_minus_one = compound_growth_minus_one(r, n_f);
    principal * r * (growth_minus_one + 1.0) / growth_minus_one
}

/// `(1+r)^n − 1` without cancellation for small `r`
#[inline]
fn compound_growth_minus_one(r: f64, n: f64) -> f64 {
    (n * r.ln_1p()).exp_m1()
}

/// Present value of `n` level payments of `A` at rate `r`.
///
/// # Formula
/// - `r = 0`: `PV = A·n`
/// - otherwise: `PV = A·(1 − (1+r)^−n)/r`
#[inline]
pub fn present_value(payment: f64, r: f64, n: u32) -> f64 {
    let n_f = f64::from(n);
    if r == 0.0 {
        return payment * n_f;
    }
    payment * -compound_growth_minus_one(r, -n_f) / r
}

/// Future value of `n` end-of-period payments of `A` at rate `r`.
///
/// # Formula
/// - `r = 0`: `FV = A·n`
/// - otherwise: `FV = A·((1+r)^n − 1)/r`
#[inline]
pub fn future_value_of_annuity(payment: f64, r: f64, n: u32) -> f64 {
    let n_f = f64::from(n);
    if r == 0.0 {
        return payment * n_f;
    }
    payment * compound_growth_minus_one(r, n_f) / r
}

/// Future value of a lump sum: `PV·(1+r)^n`
#[inline]
pub fn future_value_of_lump_sum(present: f64, r: f64, n: u32) -> f64 {
    present * (1.0 + r).powf(f64::from(n))
}

/// Outstanding balance after `k` of `n` level payments.
///
/// # Formula
/// `B_k = P·(1 − (1+r)^(k−n)) / (1 − (1+r)^−n)`, which reduces to `P·(n−k)/n`
/// at `r = 0`. Both exponents are non-positive.
pub fn remaining_balance(principal: f64, r: f64, n: u32, k: u32) -> f64 {
    if k >= n {
        return 0.0;
    }
    let left = f64::from(n - k);
    let n_f = f64::from(n);
    if r == 0.0 {
        return principal * left / n_f;
    }
    let log_growth = r.ln_1p();
    principal * (-left * log_growth).exp_m1() / (-n_f * log_growth).exp_m1()
}

/// `(total_paid, total_interest)` for a level-payment loan.
#[inline]
pub fn loan_totals(principal: f64, payment: f64, n: u32) -> (f64, f64) {
    let total_paid = payment * f64::from(n);
    (total_paid, total_paid - principal)
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based period number
    pub period: u32,
    /// Amount paid this period
    pub payment: f64,
    /// Portion of the payment applied to principal
    pub principal: f64,
    /// Portion of the payment that is interest
    pub interest: f64,
    /// Balance after this payment
    pub balance: f64,
}

/// Schedule of the `n` level payments that retire `principal`.
///
/// Balances come from [`remaining_balance`], so the schedule always has
/// exactly `n` rows and ends on a zero balance.
pub fn level_schedule(principal: f64, r: f64, n: u32) -> Vec<AmortizationRow> {
    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = principal;

    for period in 1..=n {
        let next = remaining_balance(principal, r, n, period);
        let interest = balance * r;
        let principal_part = balance - next;
        rows.push(AmortizationRow {
            period,
            payment: principal_part + interest,
            principal: principal_part,
            interest,
            balance: next,
        });
        balance = next;
    }

    rows
}

/// Remainder below this is settled with the current payment
const SETTLE_THRESHOLD: f64 = 0.005;

/// Build the period-by-period schedule, applying `extra` principal each
/// period on top of the level `payment`.
///
/// Stops when the balance reaches zero or after `max_periods` rows. A
/// remainder under half a cent is folded into the current payment so the
/// balance lands exactly on zero.
pub fn amortization_schedule(principal: f64, r: f64, payment: f64, extra: f64, max_periods: u32) -> Vec<AmortizationRow> {
    let mut rows = Vec::new();
    let mut balance = principal;
    let mut period = 0;

    while balance > 0.0 && period < max_periods {
        period += 1;
        let interest = balance * r;
        let mut paid = payment + extra;
        // A payment that doesn't cover interest never pays the loan down
        if paid < interest * (1.0 - 1e-12) {
            tracing::warn!(period, interest, paid, "payment does not cover interest; schedule stopped");
            break;
        }
        let principal_part = if paid >= balance + interest - SETTLE_THRESHOLD {
            paid = balance + interest;
            balance
        } else {
            (paid - interest).max(0.0)
        };
        balance -= principal_part;
        rows.push(AmortizationRow {
            period,
            payment: paid,
            principal: principal_part,
            interest,
            balance,
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert!((monthly_rate(12.0) - 0.01).abs() < 1e-15);
        assert_eq!(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn test_mortgage_example() {
        // 300k at 7 % for 30 years
        let payment = amortized_payment(300_000.0, monthly_rate(7.0), 360);
        assert!((payment - 1995.91).abs() < 0.005);
    }

    #[test]
    fn test_zero_rate_payment() {
        let payment = amortized_payment(200_000.0, 0.0, 120);
        assert!((payment - 1666.666_666_666_7).abs() < 1e-9);
    }

    #[test]
    fn test_present_value_inverts_payment() {
        let r = monthly_rate(5.5);
        let payment = amortized_payment(25_000.0, r, 60);
        let pv = present_value(payment, r, 60);
        assert!((pv - 25_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_future_value_of_annuity() {
        // 100/month for 12 months at 0 % = 1200
        assert_eq!(future_value_of_annuity(100.0, 0.0, 12), 1200.0);
        // at 1 %/month: 100 * (1.01^12 - 1)/0.01 = 1268.25
        assert!((future_value_of_annuity(100.0, 0.01, 12) - 1268.25).abs() < 0.01);
    }

    #[test]
    fn test_remaining_balance_endpoints() {
        let r = monthly_rate(6.0);
        assert!((remaining_balance(100_000.0, r, 360, 0) - 100_000.0).abs() < 1e-6);
        assert!(remaining_balance(100_000.0, r, 360, 360) < 1e-6);
        assert!((remaining_balance(12_000.0, 0.0, 12, 6) - 6_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_pays_off() {
        let r = monthly_rate(6.0);
        let payment = amortized_payment(10_000.0, r, 24);
        let rows = amortization_schedule(10_000.0, r, payment, 0.0, 1000);
        assert_eq!(rows.len(), 24);
        assert_eq!(rows.last().unwrap().balance, 0.0);
        let principal_sum: f64 = rows.iter().map(|row| row.principal).sum();
        assert!((principal_sum - 10_000.0).abs() < 1e-6);
        // Interest portion shrinks every month
        assert!(rows[0].interest > rows[23].interest);
    }

    #[test]
    fn test_level_schedule_has_one_row_per_period() {
        let cases = [
            (250_000.0, 0.0, 360),
            (99_999.99, 7.0, 600),
            (300_000.0, 3.3, 480),
            (1_000.0, 99.0, 480),
            (2_000_000.0, 75.0, 600),
            (50.0, 12.0, 1),
        ];
        for (principal, apr, n) in cases {
            let rows = level_schedule(principal, monthly_rate(apr), n);
            assert_eq!(rows.len(), n as usize, "{principal} at {apr}% over {n}");
            assert_eq!(rows.last().unwrap().balance, 0.0);
            let principal_sum: f64 = rows.iter().map(|row| row.principal).sum();
            assert!((principal_sum - principal).abs() <= 1e-6 * principal);
            let payment = amortized_payment(principal, monthly_rate(apr), n);
            assert!(rows.iter().all(|row| (row.payment - payment).abs() <= 1e-6 * payment));
        }
    }

    #[test]
    fn test_schedule_settles_sub_cent_remainder() {
        // Three payments of 333.332 would leave 0.004 owing
        let rows = amortization_schedule(1_000.0, 0.0, 333.332, 0.0, 1000);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].balance, 0.0);
        assert!((rows[2].payment - 333.336).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_extra_payment_shortens() {
        let r = monthly_rate(6.0);
        let payment = amortized_payment(10_000.0, r, 24);
        let rows = amortization_schedule(10_000.0, r, payment, 200.0, 1000);
        assert!(rows.len() < 24);
    }

    #[test]
    fn test_schedule_stops_when_payment_below_interest() {
        let rows = amortization_schedule(10_000.0, 0.05, 100.0, 0.0, 1000);
        assert!(rows.is_empty());
    }
}
