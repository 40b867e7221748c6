//! # FIRE Target
//!
//! Financial-independence number from annual expenses and a safe withdrawal
//! rate, and the number of years of saving needed to reach it with a
//! year-by-year projection.
//!
//! ## Assumptions
//!
//! - Returns compound once per year; contributions land at year end
//! - Expenses and contributions are in today's money (returns are real)
//! - The projection stops at `projection.max_years`

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::equations::{future_value_of_lump_sum, project_until};
use crate::errors::{require_non_negative, require_percent, require_positive, CalcError, CalcResult};
use crate::rates::Percent;

/// The classic "4 % rule"
pub const DEFAULT_WITHDRAWAL_RATE_PERCENT: f64 = 4.0;

/// Oldest age accepted for `current_age` and `target_retirement_age`
pub const MAX_AGE: u32 = 120;

fn default_withdrawal_rate() -> f64 {
    DEFAULT_WITHDRAWAL_RATE_PERCENT
}

/// Input parameters for a FIRE projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireInput {
    #[serde(default)]
    pub label: String,

    /// Spending per year in retirement
    pub annual_expenses: f64,

    /// Sustainable withdrawal rate in percent
    #[serde(default = "default_withdrawal_rate")]
    pub withdrawal_rate_percent: f64,

    /// Invested today
    #[serde(default)]
    pub current_savings: f64,

    /// Added each year
    #[serde(default)]
    pub annual_contribution: f64,

    /// Expected real return in percent
    pub expected_return_percent: f64,

    /// Used to report the age at which FIRE is reached
    #[serde(default)]
    pub current_age: Option<u32>,

    /// Used for the savings rate and the Coast FIRE number
    #[serde(default)]
    pub annual_income: Option<f64>,

    /// Traditional retirement age for the Coast FIRE number
    #[serde(default)]
    pub target_retirement_age: Option<u32>,
}

impl FireInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("annual_expenses", self.annual_expenses)?;
        require_percent("withdrawal_rate_percent", self.withdrawal_rate_percent, 100.0)?;
        if self.withdrawal_rate_percent == 0.0 {
            return Err(CalcError::invalid_input(
                "withdrawal_rate_percent",
                "0",
                "Withdrawal rate must be above zero",
            ));
        }
        require_non_negative("current_savings", self.current_savings)?;
        require_non_negative("annual_contribution", self.annual_contribution)?;
        require_percent("expected_return_percent", self.expected_return_percent, 100.0)?;
        if let Some(income) = self.annual_income {
            require_positive("annual_income", income)?;
        }
        for (field, age) in [
            ("current_age", self.current_age),
            ("target_retirement_age", self.target_retirement_age),
        ] {
            if let Some(age) = age.filter(|age| *age > MAX_AGE) {
                return Err(CalcError::invalid_input(
                    field,
                    age.to_string(),
                    format!("Age must be {} or less", MAX_AGE),
                ));
            }
        }
        if let (Some(age), Some(target)) = (self.current_age, self.target_retirement_age) {
            if target <= age {
                return Err(CalcError::invalid_input(
                    "target_retirement_age",
                    target.to_string(),
                    "Target retirement age must be after the current age",
                ));
            }
        }
        Ok(())
    }

    /// `annual_expenses / withdrawal_rate`
    pub fn fire_number(&self) -> f64 {
        self.annual_expenses / Percent(self.withdrawal_rate_percent).fraction()
    }
}

/// Results from a FIRE projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireResult {
    /// Portfolio size needed to retire
    pub fire_number: f64,

    /// Whole years of saving needed (None if not reached within the cap)
    pub years_to_fire: Option<u32>,

    /// `current_age + years_to_fire`
    pub fire_age: Option<u32>,

    /// Whether the FIRE number is reached within the projection cap
    pub reached: bool,

    /// Balance in the year FIRE is reached (or at the cap)
    pub final_balance: f64,

    /// `annual_contribution / annual_income`, in percent
    pub savings_rate_percent: Option<f64>,

    /// Amount that, left alone, grows to the FIRE number by the target age
    pub coast_fire_number: Option<f64>,

    /// Whether current savings already cover the Coast FIRE number
    pub coast_fire_reached: Option<bool>,

    /// Balance at the end of each projected year
    pub yearly_balances: Vec<f64>,
}

/// Project years to financial independence.
pub fn calculate(input: &FireInput, settings: &Settings) -> CalcResult<FireResult> {
    input.validate()?;

    let fire_number = input.fire_number();
    let rate = Percent(input.expected_return_percent).fraction();
    let projection = project_until(
        input.current_savings,
        rate,
        input.annual_contribution,
        fire_number,
        settings.projection.max_years,
    );

    let years_to_fire = projection.reached.then_some(projection.periods);
    let fire_age = match (input.current_age, years_to_fire) {
        (Some(age), Some(years)) => age.checked_add(years),
        _ => None,
    };

    let savings_rate_percent = input
        .annual_income
        .map(|income| input.annual_contribution / income * 100.0);

    let coast_fire_number = match (input.current_age, input.target_retirement_age) {
        (Some(age), Some(target)) => {
            let years = target - age;
            Some(fire_number / future_value_of_lump_sum(1.0, rate, years))
        }
        _ => None,
    };
    let coast_fire_reached = coast_fire_number.map(|coast| input.current_savings >= coast);

    tracing::debug!(label = %input.label, fire_number, ?years_to_fire, "FIRE projection");

    Ok(FireResult {
        fire_number,
        years_to_fire,
        fire_age,
        reached: projection.reached,
        final_balance: projection.final_balance,
        savings_rate_percent,
        coast_fire_number,
        coast_fire_reached,
        yearly_balances: projection.balances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saver() -> FireInput {
        FireInput {
            label: "Plan".to_string(),
            annual_expenses: 40_000.0,
            withdrawal_rate_percent: 4.0,
            current_savings: 100_000.0,
            annual_contribution: 30_000.0,
            expected_return_percent: 5.0,
            current_age: Some(30),
            annual_income: Some(90_000.0),
            target_retirement_age: Some(65),
        }
    }

    #[test]
    fn test_fire_number() {
        assert!((saver().fire_number() - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_years_to_fire() {
        let result = calculate(&saver(), &Settings::default()).unwrap();
        let years = result.years_to_fire.unwrap();
        // 100k + 30k/yr at 5 % crosses 1M in year 17
        assert_eq!(years, 17);
        assert_eq!(result.fire_age, Some(47));
        assert!(result.final_balance >= 1_000_000.0);
        assert_eq!(result.yearly_balances.len(), 17);
    }

    #[test]
    fn test_savings_rate() {
        let result = calculate(&saver(), &Settings::default()).unwrap();
        let rate = result.savings_rate_percent.unwrap();
        assert!((rate - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_coast_fire() {
        let result = calculate(&saver(), &Settings::default()).unwrap();
        let coast = result.coast_fire_number.unwrap();
        // 1M discounted 35 years at 5 %
        assert!((coast - 1_000_000.0 / 1.05f64.powi(35)).abs() < 1e-6);
        assert_eq!(result.coast_fire_reached, Some(false));
    }

    #[test]
    fn test_already_independent() {
        let mut input = saver();
        input.current_savings = 2_000_000.0;
        let result = calculate(&input, &Settings::default()).unwrap();
        assert_eq!(result.years_to_fire, Some(0));
        assert_eq!(result.fire_age, Some(30));
        assert!(result.reached);
    }

    #[test]
    fn test_unreachable_within_cap() {
        let mut input = saver();
        input.current_savings = 0.0;
        input.annual_contribution = 0.0;
        let result = calculate(&input, &Settings::default()).unwrap();
        assert_eq!(result.years_to_fire, None);
        assert_eq!(result.fire_age, None);
        assert!(!result.reached);
        assert_eq!(result.yearly_balances.len(), 100);
    }

    #[test]
    fn test_rejects_zero_withdrawal_rate() {
        let mut input = saver();
        input.withdrawal_rate_percent = 0.0;
        assert!(calculate(&input, &Settings::default()).is_err());
    }

    #[test]
    fn test_rejects_unrealistic_age() {
        let mut input = saver();
        input.current_age = Some(4_294_967_290);
        input.target_retirement_age = None;
        let err = calculate(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), Some("current_age"));

        let mut input = saver();
        input.target_retirement_age = Some(121);
        let err = calculate(&input, &Settings::default()).unwrap_err();
        assert_eq!(err.field(), Some("target_retirement_age"));
    }

    #[test]
    fn test_age_at_limit_projects() {
        let mut input = saver();
        input.current_age = Some(MAX_AGE);
        input.target_retirement_age = None;
        let result = calculate(&input, &Settings::default()).unwrap();
        assert_eq!(result.fire_age, result.years_to_fire.map(|years| MAX_AGE + years));
    }

    #[test]
    fn test_default_withdrawal_rate_from_json() {
        let input: FireInput = serde_json::from_str(
            r#"{"annual_expenses": 50000, "expected_return_percent": 6}"#,
        )
        .unwrap();
        assert_eq!(input.withdrawal_rate_percent, 4.0);
        assert!((input.fire_number() - 1_250_000.0).abs() < 1e-6);
    }
}
