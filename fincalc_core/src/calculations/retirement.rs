//! # Retirement Planner
//!
//! Projects a retirement account month by month until the retirement age,
//! then compares the income it can sustain against the desired income
//! grown by inflation.
//!
//! ## Assumptions
//!
//! - Nominal returns compound monthly; contributions land at month end
//! - Desired income is stated in today's money and inflated to retirement
//! - Sustainable income = balance · withdrawal rate

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::equations::{future_value_of_annuity, future_value_of_lump_sum, monthly_rate, project_for};
use crate::errors::{require_non_negative, require_percent, CalcError, CalcResult};
use crate::rates::Percent;

/// Input parameters for the retirement planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementInput {
    #[serde(default)]
    pub label: String,
    pub current_age: u32,
    pub retirement_age: u32,
    #[serde(default)]
    pub current_savings: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    /// Expected nominal return in percent
    pub annual_return_percent: f64,
    #[serde(default)]
    pub inflation_percent: f64,
    /// Desired annual income in today's money
    pub desired_annual_income: f64,
    #[serde(default = "default_withdrawal_rate")]
    pub withdrawal_rate_percent: f64,
}

fn default_withdrawal_rate() -> f64 {
    4.0
}

impl RetirementInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.retirement_age <= self.current_age {
            return Err(CalcError::invalid_input(
                "retirement_age",
                self.retirement_age.to_string(),
                "Retirement age must be after the current age",
            ));
        }
        if self.retirement_age > 120 {
            return Err(CalcError::invalid_input(
                "retirement_age",
                self.retirement_age.to_string(),
                "Retirement age must be 120 or less",
            ));
        }
        require_non_negative("current_savings", self.current_savings)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_percent("annual_return_percent", self.annual_return_percent, 100.0)?;
        require_percent("inflation_percent", self.inflation_percent, 100.0)?;
        require_non_negative("desired_annual_income", self.desired_annual_income)?;
        require_percent("withdrawal_rate_percent", self.withdrawal_rate_percent, 100.0)?;
        if self.withdrawal_rate_percent == 0.0 {
            return Err(CalcError::invalid_input(
                "withdrawal_rate_percent",
                "0",
                "Withdrawal rate must be above zero",
            ));
        }
        Ok(())
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age - self.current_age
    }
}

/// Balance at the end of one year of saving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementYear {
    pub age: u32,
    pub balance: f64,
    /// Cumulative contributions including the starting balance
    pub contributed: f64,
}

/// Results from the retirement planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementResult {
    pub years_to_retirement: u32,
    /// Nominal balance at retirement
    pub projected_balance: f64,
    /// Projected balance in today's money
    pub real_balance: f64,
    pub total_contributed: f64,
    pub investment_growth: f64,
    /// `projected_balance · withdrawal rate`
    pub sustainable_annual_income: f64,
    /// Desired income grown by inflation to the retirement year
    pub inflated_desired_income: f64,
    /// Balance needed to fund the inflated desired income
    pub required_balance: f64,
    /// `max(required − projected, 0)`
    pub shortfall: f64,
    /// Extra monthly saving that would close the shortfall
    pub additional_monthly_needed: f64,
    pub on_track: bool,
    pub yearly: Vec<RetirementYear>,
}

pub fn calculate(input: &RetirementInput, settings: &Settings) -> CalcResult<RetirementResult> {
    input.validate()?;

    let years = input.years_to_retirement();
    let months = years * 12;
    if months > settings.projection.max_months {
        return Err(CalcError::invalid_input(
            "retirement_age",
            input.retirement_age.to_string(),
            format!("Projection longer than {} months", settings.projection.max_months),
        ));
    }
    let r = monthly_rate(input.annual_return_percent);
    let projection = project_for(input.current_savings, r, input.monthly_contribution, months);
    let projected_balance = projection.final_balance;

    let yearly = projection
        .balances
        .chunks(12)
        .enumerate()
        .map(|(i, chunk)| {
            let year = i as u32 + 1;
            RetirementYear {
                age: input.current_age + year,
                balance: chunk.last().copied().unwrap_or(0.0),
                contributed: input.current_savings + input.monthly_contribution * f64::from(year * 12),
            }
        })
        .collect();

    let inflation = Percent(input.inflation_percent).fraction();
    let inflation_factor = future_value_of_lump_sum(1.0, inflation, years);
    let withdrawal = Percent(input.withdrawal_rate_percent).fraction();

    let total_contributed = input.current_savings + input.monthly_contribution * f64::from(months);
    let inflated_desired_income = input.desired_annual_income * inflation_factor;
    let required_balance = inflated_desired_income / withdrawal;
    let shortfall = (required_balance - projected_balance).max(0.0);
    let additional_monthly_needed = if shortfall > 0.0 {
        shortfall / future_value_of_annuity(1.0, r, months)
    } else {
        0.0
    };

    tracing::debug!(label = %input.label, projected_balance, shortfall, "retirement projection");

    Ok(RetirementResult {
        years_to_retirement: years,
        projected_balance,
        real_balance: projected_balance / inflation_factor,
        total_contributed,
        investment_growth: projected_balance - total_contributed,
        sustainable_annual_income: projected_balance * withdrawal,
        inflated_desired_income,
        required_balance,
        shortfall,
        additional_monthly_needed,
        on_track: shortfall == 0.0,
        yearly,
    })
}
