//! # Amortized Loan Calculation
//!
//! Level monthly payment, total paid and total interest for a fixed-rate
//! loan, with an optional amortization schedule and extra-payment payoff
//! analysis.
//!
//! ## Example
//!
//! ```rust
//! use fincalc_core::calculations::loan::{calculate, LoanInput};
//! use fincalc_core::config::Settings;
//!
//! let input = LoanInput::from_years("Mortgage", 300_000.0, 7.0, 30);
//! let result = calculate(&input, &Settings::default()).unwrap();
//!
//! assert!((result.monthly_payment - 1995.91).abs() < 0.01);
//! assert!(result.total_interest > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::equations::{amortization_schedule, amortized_payment, level_schedule, loan_totals, monthly_rate, AmortizationRow};
use crate::errors::{require_non_negative, require_percent, require_positive, CalcError, CalcResult};

/// Highest APR accepted, in percent
pub const MAX_APR_PERCENT: f64 = 100.0;

/// Longest term accepted (50 years)
pub const MAX_TERM_MONTHS: u32 = 600;

/// Input parameters for an amortized loan.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Mortgage",
///   "principal": 300000.0,
///   "apr_percent": 7.0,
///   "term_months": 360,
///   "extra_monthly_payment": 200.0,
///   "include_schedule": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// User label (e.g., "Mortgage", "Car loan")
    #[serde(default)]
    pub label: String,

    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual rate in percent
    pub apr_percent: f64,

    /// Number of monthly payments
    pub term_months: u32,

    /// Additional principal paid every month
    #[serde(default)]
    pub extra_monthly_payment: f64,

    /// Return the month-by-month schedule in the result
    #[serde(default)]
    pub include_schedule: bool,
}

impl LoanInput {
    /// Convenience constructor taking the term in years.
    pub fn from_years(label: impl Into<String>, principal: f64, apr_percent: f64, years: u32) -> Self {
        LoanInput {
            label: label.into(),
            principal,
            apr_percent,
            term_months: years.saturating_mul(12),
            extra_monthly_payment: 0.0,
            include_schedule: false,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("principal", self.principal)?;
        require_percent("apr_percent", self.apr_percent, MAX_APR_PERCENT)?;
        if self.term_months == 0 {
            return Err(CalcError::invalid_input(
                "term_months",
                "0",
                "Term must be at least one month",
            ));
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(CalcError::invalid_input(
                "term_months",
                self.term_months.to_string(),
                format!("Term exceeds {} months", MAX_TERM_MONTHS),
            ));
        }
        require_non_negative("extra_monthly_payment", self.extra_monthly_payment)?;
        Ok(())
    }

    /// Monthly periodic rate as a fraction.
    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.apr_percent)
    }
}

/// Totals for one year of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    /// 1-based loan year
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    /// Balance at the end of the year
    pub ending_balance: f64,
}

/// Effect of paying extra principal each month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentEffect {
    /// Months until payoff with the extra payment
    pub payoff_months: u32,
    /// Months shaved off the original term
    pub months_saved: u32,
    /// Total interest with the extra payment
    pub total_interest: f64,
    /// Interest avoided compared to the level schedule
    pub interest_saved: f64,
}

/// Results from a loan calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "monthly_payment": 1995.91,
///   "total_paid": 718527.52,
///   "total_interest": 418527.52,
///   "monthly_rate": 0.005833,
///   "schedule": [],
///   "yearly_summary": [],
///   "extra_payment": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Level monthly payment
    pub monthly_payment: f64,

    /// `monthly_payment · term_months`
    pub total_paid: f64,

    /// `total_paid − principal`
    pub total_interest: f64,

    /// Monthly rate used
    pub monthly_rate: f64,

    /// Month-by-month schedule (empty unless requested)
    #[serde(default)]
    pub schedule: Vec<AmortizationRow>,

    /// Year-by-year totals of the level schedule
    pub yearly_summary: Vec<YearSummary>,

    /// Present when `extra_monthly_payment > 0`
    pub extra_payment: Option<ExtraPaymentEffect>,
}

impl LoanResult {
    /// Share of total payments that goes to interest, in percent
    pub fn interest_share_percent(&self) -> f64 {
        if self.total_paid > 0.0 {
            self.total_interest / self.total_paid * 100.0
        } else {
            0.0
        }
    }
}

/// Roll a monthly schedule up into calendar-less loan years.
pub fn summarize_by_year(rows: &[AmortizationRow]) -> Vec<YearSummary> {
    rows.chunks(12)
        .enumerate()
        .map(|(i, chunk)| YearSummary {
            year: i as u32 + 1,
            principal_paid: chunk.iter().map(|r| r.principal).sum(),
            interest_paid: chunk.iter().map(|r| r.interest).sum(),
            ending_balance: chunk.last().map(|r| r.balance).unwrap_or(0.0),
        })
        .collect()
}

/// Calculate payment, totals and (optionally) the schedule for a loan.
///
/// # Returns
///
/// * `Ok(LoanResult)` - Payment and totals
/// * `Err(CalcError)` - Principal ≤ 0, negative APR, or zero term
pub fn calculate(input: &LoanInput, settings: &Settings) -> CalcResult<LoanResult> {
    input.validate()?;

    let r = input.monthly_rate();
    let n = input.term_months;
    let monthly_payment = amortized_payment(input.principal, r, n);
    let (total_paid, total_interest) = loan_totals(input.principal, monthly_payment, n);

    let schedule = level_schedule(input.principal, r, n);
    let yearly_summary = summarize_by_year(&schedule);

    let extra_payment = if input.extra_monthly_payment > 0.0 {
        let cap = n.max(settings.projection.max_months);
        let accelerated = amortization_schedule(input.principal, r, monthly_payment, input.extra_monthly_payment, cap);
        let payoff_months = accelerated.len() as u32;
        let accelerated_interest: f64 = accelerated.iter().map(|row| row.interest).sum();
        Some(ExtraPaymentEffect {
            payoff_months,
            months_saved: n.saturating_sub(payoff_months),
            total_interest: accelerated_interest,
            interest_saved: (total_interest - accelerated_interest).max(0.0),
        })
    } else {
        None
    };

    tracing::debug!(
        label = %input.label,
        monthly_payment,
        total_interest,
        "loan calculated"
    );

    Ok(LoanResult {
        monthly_payment,
        total_paid,
        total_interest,
        monthly_rate: r,
        schedule: if input.include_schedule { schedule } else { Vec::new() },
        yearly_summary,
        extra_payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mortgage() -> LoanInput {
        LoanInput::from_years("Mortgage", 300_000.0, 7.0, 30)
    }

    #[test]
    fn test_mortgage_payment() {
        let result = calculate(&mortgage(), &Settings::default()).unwrap();
        // 300k at 7 % over 30 years ≈ 1995.91/month
        assert!((result.monthly_payment - 1995.91).abs() < 0.005);
        assert!((result.total_paid - result.monthly_payment * 360.0).abs() < 1e-6);
        assert!((result.total_interest - (result.total_paid - 300_000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_loan() {
        let input = LoanInput::from_years("Family loan", 200_000.0, 0.0, 10);
        let result = calculate(&input, &Settings::default()).unwrap();
        assert!((result.monthly_payment - 1666.67).abs() < 0.005);
        assert!(result.total_interest.abs() < 1e-6);
    }

    #[test]
    fn test_yearly_summary() {
        let result = calculate(&mortgage(), &Settings::default()).unwrap();
        assert_eq!(result.yearly_summary.len(), 30);
        let first = result.yearly_summary[0];
        // Early years are interest-heavy
        assert!(first.interest_paid > first.principal_paid);
        assert!(result.yearly_summary[29].ending_balance.abs() < 1e-6);
        assert!(result.schedule.is_empty());
    }

    #[test]
    fn test_schedule_on_request() {
        let mut input = LoanInput::from_years("Car", 25_000.0, 5.0, 5);
        input.include_schedule = true;
        let result = calculate(&input, &Settings::default()).unwrap();
        assert_eq!(result.schedule.len(), 60);
        assert!((result.schedule[0].interest - 25_000.0 * 0.05 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_length_matches_term() {
        for (principal, apr, months) in [(250_000.0, 0.0, 360), (99_999.99, 7.0, 600), (1_000.0, 99.0, 480)] {
            let input = LoanInput {
                label: String::new(),
                principal,
                apr_percent: apr,
                term_months: months,
                extra_monthly_payment: 0.0,
                include_schedule: true,
            };
            let result = calculate(&input, &Settings::default()).unwrap();
            assert_eq!(result.schedule.len(), months as usize);
            assert_eq!(result.yearly_summary.len(), (months as usize).div_ceil(12));
            assert_eq!(result.schedule.last().unwrap().balance, 0.0);
        }
    }

    #[test]
    fn test_extra_payment_saves_interest() {
        let mut input = mortgage();
        input.extra_monthly_payment = 200.0;
        let result = calculate(&input, &Settings::default()).unwrap();
        let extra = result.extra_payment.expect("extra payment analysis");
        assert!(extra.payoff_months < 360);
        assert_eq!(extra.months_saved, 360 - extra.payoff_months);
        assert!(extra.interest_saved > 0.0);
        assert!(extra.total_interest < result.total_interest);
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let mut input = mortgage();
        input.principal = 0.0;
        let err = calculate(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), Some("principal"));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let mut input = mortgage();
        input.apr_percent = -1.0;
        assert!(calculate(&input, &Settings::default()).is_err());
    }

    #[test]
    fn test_rejects_zero_term() {
        let mut input = mortgage();
        input.term_months = 0;
        let err = calculate(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), Some("term_months"));
    }

    #[test]
    fn test_huge_year_count_is_rejected() {
        let input = LoanInput::from_years("Forever", 10_000.0, 5.0, u32::MAX);
        assert_eq!(input.term_months, u32::MAX);
        let err = calculate(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), Some("term_months"));
    }

    #[test]
    fn test_interest_share() {
        let result = calculate(&mortgage(), &Settings::default()).unwrap();
        let share = result.interest_share_percent();
        assert!(share > 55.0 && share < 60.0);
    }

    #[test]
    fn test_input_json_defaults() {
        let input: LoanInput =
            serde_json::from_str(r#"{"principal": 1000.0, "apr_percent": 5.0, "term_months": 12}"#).unwrap();
        assert_eq!(input.extra_monthly_payment, 0.0);
        assert!(!input.include_schedule);
        assert!(input.label.is_empty());
    }
}
