//! # International Transfer Comparison
//!
//! Ranks transfer providers by the total cost of sending an amount abroad,
//! counting the flat fee, any percentage fee and the exchange-rate markup.
//!
//! The built-in provider table is illustrative only. Real quotes change
//! daily; pass `providers` to compare actual offers.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::calculations::currency::markup_percent;
use crate::errors::{require_non_negative, require_percent, require_positive, CalcError, CalcResult};
use crate::rates::Percent;

/// One provider's pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderQuote {
    pub name: String,
    /// Flat fee in the source currency
    #[serde(default)]
    pub fixed_fee: f64,
    /// Fee as a percentage of the amount sent
    #[serde(default)]
    pub percent_fee: f64,
    /// Markup of the provider's rate below mid-market, in percent
    #[serde(default)]
    pub fx_markup_percent: f64,
}

impl ProviderQuote {
    pub fn new(name: impl Into<String>, fixed_fee: f64, percent_fee: f64, fx_markup_percent: f64) -> Self {
        ProviderQuote {
            name: name.into(),
            fixed_fee,
            percent_fee,
            fx_markup_percent,
        }
    }

    /// Fees deducted from `amount` before conversion, in the source currency.
    pub fn fees(&self, amount: f64) -> f64 {
        self.fixed_fee + amount * Percent(self.percent_fee).fraction()
    }

    /// Rate this provider pays out, given the mid-market rate.
    pub fn offered_rate(&self, mid_market_rate: f64) -> f64 {
        mid_market_rate * (1.0 - Percent(self.fx_markup_percent).fraction())
    }

    fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::missing_field("providers[].name"));
        }
        require_non_negative("fixed_fee", self.fixed_fee)?;
        require_percent("percent_fee", self.percent_fee, 100.0)?;
        require_percent("fx_markup_percent", self.fx_markup_percent, 100.0)?;
        Ok(())
    }
}

/// Typical pricing shapes: a high-street bank, a money-transfer service,
/// an online specialist and a card network.
pub static DEFAULT_PROVIDERS: Lazy<Vec<ProviderQuote>> = Lazy::new(|| {
    vec![
        ProviderQuote::new("Retail bank wire", 45.0, 0.0, 3.0),
        ProviderQuote::new("Money transfer service", 4.99, 0.0, 1.5),
        ProviderQuote::new("Online FX specialist", 1.0, 0.45, 0.0),
        ProviderQuote::new("Credit card", 0.0, 3.0, 0.2),
    ]
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTransferInput {
    #[serde(default)]
    pub label: String,
    /// Amount to send, in the source currency
    pub amount: f64,
    /// Target currency per source unit
    pub mid_market_rate: f64,
    /// Quotes to compare; the built-in table when empty
    #[serde(default)]
    pub providers: Vec<ProviderQuote>,
}

impl WireTransferInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("amount", self.amount)?;
        require_positive("mid_market_rate", self.mid_market_rate)?;
        for provider in &self.providers {
            provider.validate()?;
        }
        Ok(())
    }

    /// The quotes actually compared.
    pub fn effective_providers(&self) -> &[ProviderQuote] {
        if self.providers.is_empty() {
            DEFAULT_PROVIDERS.as_slice()
        } else {
            self.providers.as_slice()
        }
    }
}

/// One provider's outcome, in the target currency unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCost {
    pub name: String,
    /// Fees in the source currency
    pub fees: f64,
    pub offered_rate: f64,
    /// Markup actually implied by the offered rate, in percent
    pub markup_percent: f64,
    pub amount_received: f64,
    /// Shortfall against converting the full amount at mid-market
    pub total_cost: f64,
    pub total_cost_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTransferResult {
    /// What the full amount is worth at mid-market
    pub converted_at_mid: f64,
    /// Cheapest first; ties broken by name
    pub ranked: Vec<ProviderCost>,
    pub cheapest: String,
    /// Total cost of the most expensive option minus the cheapest
    pub savings_vs_most_expensive: f64,
}

pub fn calculate(input: &WireTransferInput) -> CalcResult<WireTransferResult> {
    input.validate()?;

    let converted_at_mid = input.amount * input.mid_market_rate;
    let mut ranked: Vec<ProviderCost> = input
        .effective_providers()
        .iter()
        .map(|provider| {
            let fees = provider.fees(input.amount).min(input.amount);
            let offered_rate = provider.offered_rate(input.mid_market_rate);
            let amount_received = (input.amount - fees) * offered_rate;
            let total_cost = converted_at_mid - amount_received;
            ProviderCost {
                name: provider.name.clone(),
                fees,
                offered_rate,
                markup_percent: markup_percent(input.mid_market_rate, offered_rate),
                amount_received,
                total_cost,
                total_cost_percent: total_cost / converted_at_mid * 100.0,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.total_cost
            .total_cmp(&b.total_cost)
            .then_with(|| a.name.cmp(&b.name))
    });

    let (cheapest, savings_vs_most_expensive) = match (ranked.first(), ranked.last()) {
        (Some(best), Some(worst)) => (best.name.clone(), worst.total_cost - best.total_cost),
        _ => (String::new(), 0.0),
    };

    tracing::debug!(label = %input.label, %cheapest, providers = ranked.len(), "transfer providers ranked");

    Ok(WireTransferResult {
        converted_at_mid,
        ranked,
        cheapest,
        savings_vs_most_expensive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(providers: Vec<ProviderQuote>) -> WireTransferInput {
        WireTransferInput {
            label: "Rent".to_string(),
            amount: 2_000.0,
            mid_market_rate: 0.92,
            providers,
        }
    }

    #[test]
    fn test_default_table_ranking() {
        let result = calculate(&transfer(Vec::new())).unwrap();
        assert_eq!(result.ranked.len(), DEFAULT_PROVIDERS.len());
        assert_eq!(result.cheapest, "Online FX specialist");
        assert_eq!(result.ranked.last().unwrap().name, "Retail bank wire");
        for pair in result.ranked.windows(2) {
            assert!(pair[0].total_cost <= pair[1].total_cost);
        }
        assert!(result.savings_vs_most_expensive > 0.0);
    }

    #[test]
    fn test_custom_quote_costs() {
        let result = calculate(&transfer(vec![ProviderQuote::new("Only", 10.0, 1.0, 2.0)])).unwrap();
        let only = &result.ranked[0];
        // fees = 10 + 20 = 30; rate = 0.92 · 0.98
        assert!((only.fees - 30.0).abs() < 1e-9);
        assert!((only.amount_received - 1_970.0 * 0.9016).abs() < 1e-9);
        assert!((only.markup_percent - 2.0).abs() < 1e-9);
        assert_eq!(result.savings_vs_most_expensive, 0.0);
    }

    #[test]
    fn test_ties_break_by_name() {
        let result = calculate(&transfer(vec![
            ProviderQuote::new("Zeta", 5.0, 0.0, 0.0),
            ProviderQuote::new("Alpha", 5.0, 0.0, 0.0),
        ]))
        .unwrap();
        assert_eq!(result.ranked[0].name, "Alpha");
    }

    #[test]
    fn test_rejects_unnamed_provider() {
        let err = calculate(&transfer(vec![ProviderQuote::new("  ", 0.0, 0.0, 0.0)])).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }
}
