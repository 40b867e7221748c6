//! # Progressive Income Tax Estimate
//!
//! Applies a marginal bracket schedule to taxable income (gross minus
//! deductions) and reports the tax owed per bracket.
//!
//! The built-in schedule mirrors the shape of a US single-filer table
//! (2024 thresholds). It is an illustration, not tax advice: credits,
//! payroll taxes, state taxes and filing status are not modelled. Pass
//! `brackets` to use another schedule.
//!
//! ## Example
//!
//! ```rust
//! use fincalc_core::calculations::tax::{calculate, TaxInput};
//!
//! let input = TaxInput::new("Salary", 100_000.0);
//! let result = calculate(&input).unwrap();
//!
//! assert!((result.taxable_income - 85_400.0).abs() < 1e-9);
//! assert!((result.tax - 13_841.0).abs() < 1e-6);
//! assert_eq!(result.marginal_rate_percent, 22.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_percent, CalcError, CalcResult};
use crate::rates::Percent;

/// Standard deduction applied when `deductions` is not given
pub const DEFAULT_STANDARD_DEDUCTION: f64 = 14_600.0;

/// One bracket: income above `lower_bound` is taxed at `rate_percent`
/// up to the next bracket's lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: f64,
    pub rate_percent: f64,
}

impl TaxBracket {
    pub const fn new(lower_bound: f64, rate_percent: f64) -> Self {
        TaxBracket { lower_bound, rate_percent }
    }
}

pub static DEFAULT_BRACKETS: Lazy<Vec<TaxBracket>> = Lazy::new(|| {
    vec![
        TaxBracket::new(0.0, 10.0),
        TaxBracket::new(11_600.0, 12.0),
        TaxBracket::new(47_150.0, 22.0),
        TaxBracket::new(100_525.0, 24.0),
        TaxBracket::new(191_950.0, 32.0),
        TaxBracket::new(243_725.0, 35.0),
        TaxBracket::new(609_350.0, 37.0),
    ]
});

/// Input parameters for a tax estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Salary",
///   "gross_income": 100000.0,
///   "deductions": 20000.0,
///   "brackets": [
///     { "lower_bound": 0.0, "rate_percent": 10.0 },
///     { "lower_bound": 50000.0, "rate_percent": 20.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxInput {
    #[serde(default)]
    pub label: String,

    /// Annual income before deductions
    pub gross_income: f64,

    /// Total deductions; the standard deduction when `None`
    #[serde(default)]
    pub deductions: Option<f64>,

    /// Schedule to apply; the built-in one when empty
    #[serde(default)]
    pub brackets: Vec<TaxBracket>,
}

impl TaxInput {
    pub fn new(label: impl Into<String>, gross_income: f64) -> Self {
        TaxInput {
            label: label.into(),
            gross_income,
            deductions: None,
            brackets: Vec::new(),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("gross_income", self.gross_income)?;
        if let Some(deductions) = self.deductions {
            require_non_negative("deductions", deductions)?;
        }
        validate_brackets(&self.brackets)
    }

    pub fn effective_deductions(&self) -> f64 {
        self.deductions.unwrap_or(DEFAULT_STANDARD_DEDUCTION)
    }

    pub fn effective_brackets(&self) -> &[TaxBracket] {
        if self.brackets.is_empty() {
            DEFAULT_BRACKETS.as_slice()
        } else {
            self.brackets.as_slice()
        }
    }
}

/// Lower bounds must be non-negative and strictly ascending.
fn validate_brackets(brackets: &[TaxBracket]) -> CalcResult<()> {
    for bracket in brackets {
        require_non_negative("brackets[].lower_bound", bracket.lower_bound)?;
        require_percent("brackets[].rate_percent", bracket.rate_percent, 100.0)?;
    }
    for pair in brackets.windows(2) {
        if pair[1].lower_bound <= pair[0].lower_bound {
            return Err(CalcError::invalid_input(
                "brackets[].lower_bound",
                pair[1].lower_bound.to_string(),
                "Bracket lower bounds must be strictly ascending",
            ));
        }
    }
    Ok(())
}

/// Tax owed inside one bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketTax {
    pub lower_bound: f64,
    /// `None` for the top bracket
    pub upper_bound: Option<f64>,
    pub rate_percent: f64,
    pub taxable_in_bracket: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub deductions: f64,
    pub taxable_income: f64,
    pub tax: f64,
    /// `tax / gross_income`, in percent
    pub effective_rate_percent: f64,
    /// Rate on the next dollar of taxable income
    pub marginal_rate_percent: f64,
    /// Only brackets that hold part of the income
    pub breakdown: Vec<BracketTax>,
    pub after_tax_income: f64,
}

/// Tax on `taxable_income` under `brackets`, split per bracket.
pub fn apply_brackets(taxable_income: f64, brackets: &[TaxBracket]) -> Vec<BracketTax> {
    brackets
        .iter()
        .enumerate()
        .filter(|(_, bracket)| taxable_income > bracket.lower_bound)
        .map(|(i, bracket)| {
            let upper_bound = brackets.get(i + 1).map(|next| next.lower_bound);
            let top = upper_bound.map_or(taxable_income, |upper| upper.min(taxable_income));
            let taxable_in_bracket = top - bracket.lower_bound;
            BracketTax {
                lower_bound: bracket.lower_bound,
                upper_bound,
                rate_percent: bracket.rate_percent,
                taxable_in_bracket,
                tax: taxable_in_bracket * Percent(bracket.rate_percent).fraction(),
            }
        })
        .collect()
}

fn marginal_rate(taxable_income: f64, brackets: &[TaxBracket]) -> f64 {
    brackets
        .iter()
        .rev()
        .find(|bracket| taxable_income >= bracket.lower_bound)
        .map_or(0.0, |bracket| bracket.rate_percent)
}

pub fn calculate(input: &TaxInput) -> CalcResult<TaxResult> {
    input.validate()?;

    let deductions = input.effective_deductions();
    let brackets = input.effective_brackets();
    let taxable_income = (input.gross_income - deductions).max(0.0);

    let breakdown = apply_brackets(taxable_income, brackets);
    let tax: f64 = breakdown.iter().map(|row| row.tax).sum();
    let effective_rate_percent = if input.gross_income > 0.0 {
        tax / input.gross_income * 100.0
    } else {
        0.0
    };

    tracing::debug!(label = %input.label, taxable_income, tax, "tax estimated");

    Ok(TaxResult {
        deductions,
        taxable_income,
        tax,
        effective_rate_percent,
        marginal_rate_percent: marginal_rate(taxable_income, brackets),
        breakdown,
        after_tax_income: input.gross_income - tax,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let result = calculate(&TaxInput::new("Salary", 100_000.0)).unwrap();
        // 1160 + 4266 + 8415
        assert!((result.tax - 13_841.0).abs() < 1e-6);
        assert_eq!(result.breakdown.len(), 3);
        assert_eq!(result.breakdown[2].upper_bound, Some(100_525.0));
        assert!((result.effective_rate_percent - 13.841).abs() < 1e-9);
        assert!((result.after_tax_income - 86_159.0).abs() < 1e-6);
    }

    #[test]
    fn test_breakdown_sums_to_taxable() {
        let result = calculate(&TaxInput::new("High earner", 750_000.0)).unwrap();
        let covered: f64 = result.breakdown.iter().map(|row| row.taxable_in_bracket).sum();
        assert!((covered - result.taxable_income).abs() < 1e-6);
        assert_eq!(result.breakdown.last().unwrap().upper_bound, None);
        assert_eq!(result.marginal_rate_percent, 37.0);
    }

    #[test]
    fn test_income_below_deduction() {
        let result = calculate(&TaxInput::new("Part-time", 10_000.0)).unwrap();
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.tax, 0.0);
        assert!(result.breakdown.is_empty());
        assert_eq!(result.marginal_rate_percent, 10.0);
    }

    #[test]
    fn test_custom_brackets_and_deductions() {
        let input = TaxInput {
            label: String::new(),
            gross_income: 80_000.0,
            deductions: Some(0.0),
            brackets: vec![TaxBracket::new(0.0, 10.0), TaxBracket::new(50_000.0, 20.0)],
        };
        let result = calculate(&input).unwrap();
        assert!((result.tax - 11_000.0).abs() < 1e-9);
        assert_eq!(result.marginal_rate_percent, 20.0);
    }

    #[test]
    fn test_zero_income() {
        let result = calculate(&TaxInput::new(String::new(), 0.0)).unwrap();
        assert_eq!(result.effective_rate_percent, 0.0);
    }

    #[test]
    fn test_rejects_unsorted_brackets() {
        let mut input = TaxInput::new(String::new(), 50_000.0);
        input.brackets = vec![TaxBracket::new(10_000.0, 20.0), TaxBracket::new(10_000.0, 10.0)];
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.field(), Some("brackets[].lower_bound"));
    }

    #[test]
    fn test_rejects_rate_over_100() {
        let mut input = TaxInput::new(String::new(), 50_000.0);
        input.brackets = vec![TaxBracket::new(0.0, 120.0)];
        assert!(calculate(&input).is_err());
    }
}
