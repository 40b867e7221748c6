//! # Debt Service Coverage Ratio
//!
//! DSCR = net operating income ÷ annual debt service. Lenders on income
//! property typically want at least 1.25; below 1.0 the property does not
//! cover its own mortgage.
//!
//! ```rust
//! use fincalc_core::calculations::dscr::{calculate, DscrInput, DscrRating};
//!
//! let input = DscrInput {
//!     label: "Fourplex".to_string(),
//!     net_operating_income: 60_000.0,
//!     loan_amount: 600_000.0,
//!     apr_percent: 6.5,
//!     term_months: 360,
//!     target_dscr: 1.25,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.rating, DscrRating::Strong);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{amortized_payment, monthly_rate, present_value};
use crate::errors::{require_non_negative, require_percent, require_positive, CalcError, CalcResult};

/// Common lender minimum
pub const DEFAULT_TARGET_DSCR: f64 = 1.25;

fn default_target_dscr() -> f64 {
    DEFAULT_TARGET_DSCR
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DscrInput {
    #[serde(default)]
    pub label: String,
    /// Annual NOI (rents minus operating expenses, before debt)
    pub net_operating_income: f64,
    pub loan_amount: f64,
    pub apr_percent: f64,
    pub term_months: u32,
    #[serde(default = "default_target_dscr")]
    pub target_dscr: f64,
}

impl DscrInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("net_operating_income", self.net_operating_income)?;
        require_positive("loan_amount", self.loan_amount)?;
        require_percent("apr_percent", self.apr_percent, 100.0)?;
        if self.term_months == 0 {
            return Err(CalcError::invalid_input("term_months", "0", "Term must be at least one month"));
        }
        require_positive("target_dscr", self.target_dscr)?;
        Ok(())
    }
}

/// Coarse coverage bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DscrRating {
    /// ≥ 1.25
    Strong,
    /// ≥ 1.0
    Adequate,
    /// < 1.0: income does not cover the debt
    Negative,
}

impl DscrRating {
    pub fn from_ratio(dscr: f64) -> Self {
        if dscr >= 1.25 {
            DscrRating::Strong
        } else if dscr >= 1.0 {
            DscrRating::Adequate
        } else {
            DscrRating::Negative
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DscrRating::Strong => "Meets typical lender minimums",
            DscrRating::Adequate => "Covers debt with a thin cushion",
            DscrRating::Negative => "Income does not cover debt service",
        }
    }
}

impl std::fmt::Display for DscrRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DscrRating::Strong => "Strong",
            DscrRating::Adequate => "Adequate",
            DscrRating::Negative => "Negative",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DscrResult {
    pub monthly_payment: f64,
    pub annual_debt_service: f64,
    pub dscr: f64,
    pub rating: DscrRating,
    /// Largest loan whose debt service keeps DSCR at the target
    pub max_loan_amount: f64,
    /// NOI left after debt service
    pub cash_flow_after_debt: f64,
}

pub fn calculate(input: &DscrInput) -> CalcResult<DscrResult> {
    input.validate()?;

    let r = monthly_rate(input.apr_percent);
    let monthly_payment = amortized_payment(input.loan_amount, r, input.term_months);
    let annual_debt_service = monthly_payment * 12.0;
    let dscr = input.net_operating_income / annual_debt_service;

    let max_monthly_payment = input.net_operating_income / input.target_dscr / 12.0;
    let max_loan_amount = present_value(max_monthly_payment, r, input.term_months);

    tracing::debug!(label = %input.label, dscr, "DSCR calculated");

    Ok(DscrResult {
        monthly_payment,
        annual_debt_service,
        dscr,
        rating: DscrRating::from_ratio(dscr),
        max_loan_amount,
        cash_flow_after_debt: input.net_operating_income - annual_debt_service,
    })
}
