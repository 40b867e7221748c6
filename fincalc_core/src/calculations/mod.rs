//! # Financial Calculators
//!
//! Each calculator follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, with `validate()`)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ...) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Calculators that run a solver or a projection also take [`Settings`]
//! for their iteration and horizon caps.
//!
//! ## Available Calculations
//!
//! - [`loan`] - Amortized loan payment, totals and schedule
//! - [`apr`] - APR including up-front fees
//! - [`fire`] - FIRE number and years to financial independence
//! - [`retirement`] - Retirement savings projection and shortfall
//! - [`savings_goal`] - Time to reach a savings goal
//! - [`currency`] - Exchange-rate markup and fee cost
//! - [`wire_transfer`] - International transfer provider comparison
//! - [`oil`] - Crude oil futures P/L and crack spread
//! - [`margin`] - Profit margin, markup and break-even
//! - [`dscr`] - Debt service coverage ratio
//! - [`tax`] - Progressive income-tax estimate
//! - [`dividend`] - Dividend income and ex-dividend date

pub mod apr;
pub mod currency;
pub mod dividend;
pub mod dscr;
pub mod fire;
pub mod loan;
pub mod margin;
pub mod oil;
pub mod retirement;
pub mod savings_goal;
pub mod tax;
pub mod wire_transfer;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::errors::CalcResult;

// Re-export commonly used types
pub use apr::{AprInput, AprResult};
pub use currency::{CurrencyInput, CurrencyResult};
pub use dividend::{DividendInput, DividendResult, SettlementCycle};
pub use dscr::{DscrInput, DscrResult};
pub use fire::{FireInput, FireResult};
pub use loan::{LoanInput, LoanResult};
pub use margin::{BreakEvenInput, BreakEvenResult, MarginInput, MarginResult};
pub use oil::{CrackSpreadInput, CrackSpreadResult, OilFuturesInput, OilFuturesResult};
pub use retirement::{RetirementInput, RetirementResult};
pub use savings_goal::{SavingsGoalInput, SavingsGoalResult};
pub use tax::{TaxInput, TaxResult};
pub use wire_transfer::{WireTransferInput, WireTransferResult};

/// Enum wrapper for all calculation inputs.
///
/// A JSON document names its calculator with the `type` field:
///
/// ```json
/// { "type": "Loan", "principal": 300000.0, "apr_percent": 7.0, "term_months": 360 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Loan(LoanInput),
    Apr(AprInput),
    Fire(FireInput),
    Retirement(RetirementInput),
    SavingsGoal(SavingsGoalInput),
    Currency(CurrencyInput),
    WireTransfer(WireTransferInput),
    OilFutures(OilFuturesInput),
    CrackSpread(CrackSpreadInput),
    Margin(MarginInput),
    BreakEven(BreakEvenInput),
    Dscr(DscrInput),
    Tax(TaxInput),
    Dividend(DividendInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Loan(i) => &i.label,
            CalculationItem::Apr(i) => &i.label,
            CalculationItem::Fire(i) => &i.label,
            CalculationItem::Retirement(i) => &i.label,
            CalculationItem::SavingsGoal(i) => &i.label,
            CalculationItem::Currency(i) => &i.label,
            CalculationItem::WireTransfer(i) => &i.label,
            CalculationItem::OilFutures(i) => &i.label,
            CalculationItem::CrackSpread(i) => &i.label,
            CalculationItem::Margin(i) => &i.label,
            CalculationItem::BreakEven(i) => &i.label,
            CalculationItem::Dscr(i) => &i.label,
            CalculationItem::Tax(i) => &i.label,
            CalculationItem::Dividend(i) => &i.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Loan(_) => "Loan",
            CalculationItem::Apr(_) => "Apr",
            CalculationItem::Fire(_) => "Fire",
            CalculationItem::Retirement(_) => "Retirement",
            CalculationItem::SavingsGoal(_) => "SavingsGoal",
            CalculationItem::Currency(_) => "Currency",
            CalculationItem::WireTransfer(_) => "WireTransfer",
            CalculationItem::OilFutures(_) => "OilFutures",
            CalculationItem::CrackSpread(_) => "CrackSpread",
            CalculationItem::Margin(_) => "Margin",
            CalculationItem::BreakEven(_) => "BreakEven",
            CalculationItem::Dscr(_) => "Dscr",
            CalculationItem::Tax(_) => "Tax",
            CalculationItem::Dividend(_) => "Dividend",
        }
    }

    /// Parse a tagged JSON document.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of [`evaluate`], tagged the same way as its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Loan(LoanResult),
    Apr(AprResult),
    Fire(FireResult),
    Retirement(RetirementResult),
    SavingsGoal(SavingsGoalResult),
    Currency(CurrencyResult),
    WireTransfer(WireTransferResult),
    OilFutures(OilFuturesResult),
    CrackSpread(CrackSpreadResult),
    Margin(MarginResult),
    BreakEven(BreakEvenResult),
    Dscr(DscrResult),
    Tax(TaxResult),
    Dividend(DividendResult),
}

/// Run whichever calculator `item` names.
pub fn evaluate(item: &CalculationItem, settings: &Settings) -> CalcResult<CalculationOutput> {
    tracing::debug!(calc_type = item.calc_type(), label = item.label(), "evaluating");

    let output = match item {
        CalculationItem::Loan(i) => CalculationOutput::Loan(loan::calculate(i, settings)?),
        CalculationItem::Apr(i) => CalculationOutput::Apr(apr::calculate(i, settings)?),
        CalculationItem::Fire(i) => CalculationOutput::Fire(fire::calculate(i, settings)?),
        CalculationItem::Retirement(i) => CalculationOutput::Retirement(retirement::calculate(i, settings)?),
        CalculationItem::SavingsGoal(i) => CalculationOutput::SavingsGoal(savings_goal::calculate(i, settings)?),
        CalculationItem::Currency(i) => CalculationOutput::Currency(currency::calculate(i)?),
        CalculationItem::WireTransfer(i) => CalculationOutput::WireTransfer(wire_transfer::calculate(i)?),
        CalculationItem::OilFutures(i) => CalculationOutput::OilFutures(oil::calculate_futures(i)?),
        CalculationItem::CrackSpread(i) => CalculationOutput::CrackSpread(oil::calculate_crack_spread(i)?),
        CalculationItem::Margin(i) => CalculationOutput::Margin(margin::calculate_margin(i)?),
        CalculationItem::BreakEven(i) => CalculationOutput::BreakEven(margin::calculate_break_even(i)?),
        CalculationItem::Dscr(i) => CalculationOutput::Dscr(dscr::calculate(i)?),
        CalculationItem::Tax(i) => CalculationOutput::Tax(tax::calculate(i)?),
        CalculationItem::Dividend(i) => CalculationOutput::Dividend(dividend::calculate(i)?),
    };
    Ok(output)
}
