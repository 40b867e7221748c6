//! # Currency Exchange Markup
//!
//! Compares a provider's exchange rate with the mid-market rate and shows
//! what the spread and the fee really cost.
//!
//! Rates are quoted as units of the target currency per one unit of the
//! source currency. The fee is charged in the source currency.
//!
//! ```rust
//! use fincalc_core::calculations::currency::{calculate, CurrencyInput};
//!
//! let input = CurrencyInput {
//!     label: String::new(),
//!     amount: 1_000.0,
//!     mid_market_rate: 0.92,
//!     offered_rate: 0.89,
//!     fee: 5.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.markup_percent - 3.26).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyInput {
    #[serde(default)]
    pub label: String,
    /// Amount to convert, in the source currency
    pub amount: f64,
    /// Interbank rate (target per source)
    pub mid_market_rate: f64,
    /// Rate the provider gives (target per source)
    pub offered_rate: f64,
    /// Flat fee in the source currency, deducted before conversion
    #[serde(default)]
    pub fee: f64,
}

impl CurrencyInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("amount", self.amount)?;
        require_positive("mid_market_rate", self.mid_market_rate)?;
        require_positive("offered_rate", self.offered_rate)?;
        require_non_negative("fee", self.fee)?;
        if self.fee >= self.amount {
            return Err(CalcError::invalid_input(
                "fee",
                self.fee.to_string(),
                "Fee must be smaller than the amount",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyResult {
    /// `amount · mid_market_rate`
    pub converted_at_mid: f64,
    /// What the recipient actually gets: `(amount − fee) · offered_rate`
    pub converted_at_offered: f64,
    /// `(mid − offered) / mid`, in percent; negative if the offer beats mid
    pub markup_percent: f64,
    /// Cost of the rate spread, in the target currency
    pub spread_cost: f64,
    /// The fee expressed in the target currency at mid
    pub fee_in_target: f64,
    /// `converted_at_mid − converted_at_offered`
    pub total_cost: f64,
    /// Target received per source unit sent, all costs included
    pub effective_rate: f64,
    /// `total_cost / converted_at_mid`, in percent
    pub total_cost_percent: f64,
}

/// Markup of an offered rate over the mid-market rate, in percent.
pub fn markup_percent(mid_market_rate: f64, offered_rate: f64) -> f64 {
    (mid_market_rate - offered_rate) / mid_market_rate * 100.0
}

pub fn calculate(input: &CurrencyInput) -> CalcResult<CurrencyResult> {
    input.validate()?;

    let converted_at_mid = input.amount * input.mid_market_rate;
    let after_fee = input.amount - input.fee;
    let converted_at_offered = after_fee * input.offered_rate;
    let fee_in_target = input.fee * input.mid_market_rate;
    let spread_cost = after_fee * (input.mid_market_rate - input.offered_rate);
    let total_cost = converted_at_mid - converted_at_offered;

    Ok(CurrencyResult {
        converted_at_mid,
        converted_at_offered,
        markup_percent: markup_percent(input.mid_market_rate, input.offered_rate),
        spread_cost,
        fee_in_target,
        total_cost,
        effective_rate: converted_at_offered / input.amount,
        total_cost_percent: total_cost / converted_at_mid * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_to_eur() -> CurrencyInput {
        CurrencyInput {
            label: "USD→EUR".to_string(),
            amount: 1_000.0,
            mid_market_rate: 0.92,
            offered_rate: 0.89,
            fee: 5.0,
        }
    }

    #[test]
    fn test_cost_breakdown_adds_up() {
        let result = calculate(&usd_to_eur()).unwrap();
        assert!((result.converted_at_mid - 920.0).abs() < 1e-9);
        assert!((result.converted_at_offered - 995.0 * 0.89).abs() < 1e-9);
        assert!((result.spread_cost + result.fee_in_target - result.total_cost).abs() < 1e-9);
    }

    #[test]
    fn test_markup() {
        let result = calculate(&usd_to_eur()).unwrap();
        assert!((result.markup_percent - 3.0 / 0.92).abs() < 1e-9);
        assert!(result.effective_rate < 0.89);
    }

    #[test]
    fn test_no_markup_no_fee() {
        let mut input = usd_to_eur();
        input.offered_rate = 0.92;
        input.fee = 0.0;
        let result = calculate(&input).unwrap();
        assert!(result.total_cost.abs() < 1e-9);
        assert!(result.markup_percent.abs() < 1e-12);
    }

    #[test]
    fn test_rejects_zero_rate() {
        let mut input = usd_to_eur();
        input.mid_market_rate = 0.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("mid_market_rate"));
    }
}
