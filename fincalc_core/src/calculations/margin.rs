//! # Profit Margin and Break-Even
//!
//! Gross margin versus markup for a single sale, the price needed for a
//! target margin, and the unit volume at which fixed costs are covered.
//!
//! Margin is profit over **revenue**; markup is profit over **cost**. A 50 %
//! markup is only a 33 % margin.

use serde::{Deserialize, Serialize};

use crate::errors::{require_finite, require_non_negative, require_positive, CalcError, CalcResult};

// ============================================================================
// Margin
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginInput {
    #[serde(default)]
    pub label: String,
    pub cost: f64,
    pub revenue: f64,
    /// Desired margin used to suggest a price
    #[serde(default)]
    pub target_margin_percent: Option<f64>,
}

impl MarginInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("cost", self.cost)?;
        require_positive("revenue", self.revenue)?;
        if let Some(target) = self.target_margin_percent {
            validate_target_margin(target)?;
        }
        Ok(())
    }
}

fn validate_target_margin(target: f64) -> CalcResult<()> {
    require_finite("target_margin_percent", target)?;
    if !(0.0..100.0).contains(&target) {
        return Err(CalcError::invalid_input(
            "target_margin_percent",
            target.to_string(),
            "Target margin must be at least 0 and below 100",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginResult {
    pub gross_profit: f64,
    /// `profit / revenue`, in percent
    pub margin_percent: f64,
    /// `profit / cost`, in percent (None when cost is zero)
    pub markup_percent: Option<f64>,
    /// Price achieving `target_margin_percent` on the same cost
    pub price_for_target_margin: Option<f64>,
}

/// Selling price that yields `target_margin_percent` on `cost`.
///
/// ```rust
/// use fincalc_core::calculations::margin::price_for_margin;
///
/// // 40 % margin on a cost of 60 → price 100
/// assert!((price_for_margin(60.0, 40.0).unwrap() - 100.0).abs() < 1e-9);
/// ```
pub fn price_for_margin(cost: f64, target_margin_percent: f64) -> CalcResult<f64> {
    require_non_negative("cost", cost)?;
    validate_target_margin(target_margin_percent)?;
    Ok(cost / (1.0 - target_margin_percent / 100.0))
}

pub fn calculate_margin(input: &MarginInput) -> CalcResult<MarginResult> {
    input.validate()?;

    let gross_profit = input.revenue - input.cost;
    let markup_percent = (input.cost > 0.0).then(|| gross_profit / input.cost * 100.0);
    let price_for_target_margin = input
        .target_margin_percent
        .map(|target| price_for_margin(input.cost, target))
        .transpose()?;

    Ok(MarginResult {
        gross_profit,
        margin_percent: gross_profit / input.revenue * 100.0,
        markup_percent,
        price_for_target_margin,
    })
}

// ============================================================================
// Break-even
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenInput {
    #[serde(default)]
    pub label: String,
    pub fixed_costs: f64,
    pub price_per_unit: f64,
    pub variable_cost_per_unit: f64,
    /// Profit to earn on top of covering fixed costs
    #[serde(default)]
    pub target_profit: f64,
}

impl BreakEvenInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_non_negative("fixed_costs", self.fixed_costs)?;
        require_positive("price_per_unit", self.price_per_unit)?;
        require_non_negative("variable_cost_per_unit", self.variable_cost_per_unit)?;
        require_non_negative("target_profit", self.target_profit)?;
        if self.price_per_unit <= self.variable_cost_per_unit {
            return Err(CalcError::invalid_input(
                "price_per_unit",
                self.price_per_unit.to_string(),
                "Price must exceed variable cost per unit",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// `price − variable cost`
    pub contribution_margin: f64,
    pub contribution_margin_ratio_percent: f64,
    /// Exact (fractional) units to break even
    pub break_even_units_exact: f64,
    /// Whole units to break even, rounded up
    pub break_even_units: u64,
    pub break_even_revenue: f64,
    /// Whole units to reach `target_profit`
    pub units_for_target_profit: u64,
}

pub fn calculate_break_even(input: &BreakEvenInput) -> CalcResult<BreakEvenResult> {
    input.validate()?;

    let contribution_margin = input.price_per_unit - input.variable_cost_per_unit;
    let exact = input.fixed_costs / contribution_margin;
    let break_even_units = exact.ceil() as u64;
    let units_for_target_profit = ((input.fixed_costs + input.target_profit) / contribution_margin).ceil() as u64;

    Ok(BreakEvenResult {
        contribution_margin,
        contribution_margin_ratio_percent: contribution_margin / input.price_per_unit * 100.0,
        break_even_units_exact: exact,
        break_even_units,
        break_even_revenue: exact * input.price_per_unit,
        units_for_target_profit,
    })
}
