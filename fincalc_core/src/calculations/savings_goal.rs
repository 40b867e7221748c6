//! # Savings Goal
//!
//! How many months of saving it takes to reach a goal, and, when a deadline
//! is given, the monthly contribution that would hit it exactly.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::equations::{future_value_of_annuity, future_value_of_lump_sum, monthly_rate, project_until};
use crate::errors::{require_non_negative, require_percent, require_positive, CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalInput {
    #[serde(default)]
    pub label: String,
    /// Target balance
    pub goal: f64,
    #[serde(default)]
    pub current_savings: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    #[serde(default)]
    pub annual_return_percent: f64,
    /// Months available to reach the goal
    #[serde(default)]
    pub deadline_months: Option<u32>,
}

impl SavingsGoalInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("goal", self.goal)?;
        require_non_negative("current_savings", self.current_savings)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_percent("annual_return_percent", self.annual_return_percent, 100.0)?;
        if self.deadline_months == Some(0) {
            return Err(CalcError::invalid_input("deadline_months", "0", "Deadline must be at least one month"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalResult {
    /// None when the goal is out of reach within the projection cap
    pub months_to_goal: Option<u32>,
    /// `months_to_goal` expressed as (years, months)
    pub years_and_months: Option<(u32, u32)>,
    pub final_balance: f64,
    /// Starting balance plus every monthly deposit made
    pub total_contributed: f64,
    pub interest_earned: f64,
    /// Deposit per month that reaches the goal exactly at the deadline
    pub required_monthly_contribution: Option<f64>,
}

/// Monthly deposit that grows `current` to `goal` in `months`, never negative.
pub fn required_contribution(goal: f64, current: f64, r: f64, months: u32) -> f64 {
    let gap = goal - future_value_of_lump_sum(current, r, months);
    if gap <= 0.0 {
        return 0.0;
    }
    gap / future_value_of_annuity(1.0, r, months)
}

pub fn calculate(input: &SavingsGoalInput, settings: &Settings) -> CalcResult<SavingsGoalResult> {
    input.validate()?;

    let r = monthly_rate(input.annual_return_percent);
    let projection = project_until(
        input.current_savings,
        r,
        input.monthly_contribution,
        input.goal,
        settings.projection.max_months,
    );

    let months_to_goal = projection.reached.then_some(projection.periods);
    let total_contributed = input.current_savings + input.monthly_contribution * f64::from(projection.periods);

    let required_monthly_contribution = input
        .deadline_months
        .map(|months| required_contribution(input.goal, input.current_savings, r, months));

    tracing::debug!(label = %input.label, ?months_to_goal, "savings goal projection");

    Ok(SavingsGoalResult {
        months_to_goal,
        years_and_months: months_to_goal.map(|m| (m / 12, m % 12)),
        final_balance: projection.final_balance,
        total_contributed,
        interest_earned: projection.final_balance - total_contributed,
        required_monthly_contribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::project_for;

    fn emergency_fund() -> SavingsGoalInput {
        SavingsGoalInput {
            label: "Emergency fund".to_string(),
            goal: 10_000.0,
            current_savings: 1_000.0,
            monthly_contribution: 500.0,
            annual_return_percent: 0.0,
            deadline_months: None,
        }
    }

    #[test]
    fn test_months_without_interest() {
        let result = calculate(&emergency_fund(), &Settings::default()).unwrap();
        assert_eq!(result.months_to_goal, Some(18));
        assert_eq!(result.years_and_months, Some((1, 6)));
        assert_eq!(result.interest_earned, 0.0);
    }

    #[test]
    fn test_interest_shortens_horizon() {
        let mut input = emergency_fund();
        input.annual_return_percent = 12.0;
        let result = calculate(&input, &Settings::default()).unwrap();
        assert!(result.months_to_goal.unwrap() < 18);
        assert!(result.interest_earned > 0.0);
    }

    #[test]
    fn test_unreachable_goal() {
        let mut input = emergency_fund();
        input.monthly_contribution = 0.0;
        let result = calculate(&input, &Settings::default()).unwrap();
        assert_eq!(result.months_to_goal, None);
        assert_eq!(result.years_and_months, None);
    }

    #[test]
    fn test_required_contribution_hits_goal() {
        let mut input = emergency_fund();
        input.annual_return_percent = 4.0;
        input.deadline_months = Some(12);
        let result = calculate(&input, &Settings::default()).unwrap();
        let needed = result.required_monthly_contribution.unwrap();
        let r = monthly_rate(4.0);
        let check = project_for(1_000.0, r, needed, 12);
        assert!((check.final_balance - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_required_contribution_zero_when_already_funded() {
        assert_eq!(required_contribution(1_000.0, 5_000.0, 0.01, 12), 0.0);
    }

    #[test]
    fn test_rejects_zero_deadline() {
        let mut input = emergency_fund();
        input.deadline_months = Some(0);
        assert!(calculate(&input, &Settings::default()).is_err());
    }
}
