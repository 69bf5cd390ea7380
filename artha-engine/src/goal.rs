//! Goal planning: reverse-solve the monthly SIP for a target amount
//!
//! Inverts the annuity-due future value: `P = target / D` where
//! `D = ((1+r)^n - 1) / r * (1+r)`. The series forward-projects the
//! solved monthly amount so chart and headline agree.

use crate::helpers::{annuity_due_factor, monthly_rate, shortened_years, validate_positive};
use crate::insight::Insight;
use artha_core::{Number, UndefinedResult};
use serde::{Deserialize, Serialize};

/// Monthly amount above which the horizon-extension nudge appears
const HIGH_BURDEN: i64 = 20_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalInput {
    pub target_amount: Number,
    pub years: u32,
    pub annual_return_pct: Number,
}

/// Forward projection of the solved monthly amount at a year boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPoint {
    pub year: u32,
    pub projected_value: Number,
    pub invested: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResult {
    pub required_monthly_investment: Number,
    pub total_invested: Number,
    pub series: Vec<GoalPoint>,
}

/// Solve the monthly SIP needed to reach `target_amount`.
///
/// A return rate of zero zeroes the annuity denominator; it is rejected as
/// an [`UndefinedResult`] rather than papered over with a fallback rate.
pub fn solve_required_monthly(input: &GoalInput) -> Result<GoalResult, UndefinedResult> {
    validate_positive(&input.target_amount, "target amount")?;
    if input.years == 0 {
        return Err(UndefinedResult::nonpositive("time horizon"));
    }
    if input.annual_return_pct.is_zero() || input.annual_return_pct.is_negative() {
        return Err(UndefinedResult::zero_rate());
    }

    let rate = monthly_rate(&input.annual_return_pct)?;
    let months = input.years * 12;

    let denominator = annuity_due_factor(&rate, months)?;
    let mut required = input.target_amount.checked_div(&denominator)?;
    if required.is_negative() {
        required = Number::from_i64(0);
    }

    let total_invested = required.mul(&Number::from_i64(months as i64));

    let mut series = Vec::with_capacity(input.years as usize);
    for year in 1..=input.years {
        let m = year * 12;
        series.push(GoalPoint {
            year,
            projected_value: required.mul(&annuity_due_factor(&rate, m)?),
            invested: required.mul(&Number::from_i64(m as i64)),
        });
    }

    Ok(GoalResult {
        required_monthly_investment: required,
        total_invested,
        series,
    })
}

/// Advisory nudges for a solved goal. Never affects the numbers.
pub fn goal_insights(input: &GoalInput, result: &GoalResult) -> Vec<Insight> {
    let mut insights = Vec::new();
    let required = &result.required_monthly_investment;

    if *required > Number::from_i64(HIGH_BURDEN) {
        insights.push(Insight::suggestion(
            "Consider increasing your time horizon to reduce the monthly burden.",
        ));
    }

    // Waiting out 20% of the horizon: if the remaining years inflate the
    // required monthly by over 30%, starting now is the cheaper plan
    let shorter = shortened_years(input.years);
    if shorter < input.years {
        let alternate = GoalInput {
            target_amount: input.target_amount.clone(),
            years: shorter,
            annual_return_pct: input.annual_return_pct.clone(),
        };
        if let Ok(alt) = solve_required_monthly(&alternate) {
            let threshold = required.mul(&Number::from_ratio(13, 10));
            if alt.required_monthly_investment > threshold {
                let increase = alt.required_monthly_investment.sub(required);
                insights.push(Insight::suggestion(format!(
                    "Starting {} years earlier keeps your monthly SIP ₹{} lower.",
                    input.years - shorter,
                    increase.round().as_decimal(0)
                )));
            }
        }
    }

    if input.annual_return_pct < Number::from_i64(10) {
        insights.push(Insight::suggestion(
            "Historically, equity SIPs deliver 10-15% CAGR over 7+ years.",
        ));
    }

    if insights.is_empty() {
        insights.push(Insight::positive(
            "Your goal is achievable with disciplined investing!",
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::InsightKind;
    use crate::sip::{project_investment, InvestmentInput};

    fn input(target: i64, years: u32, pct: i64) -> GoalInput {
        GoalInput {
            target_amount: Number::from_i64(target),
            years,
            annual_return_pct: Number::from_i64(pct),
        }
    }

    #[test]
    fn test_reference_goal() {
        // 10L in 10 years at 12%: required monthly ~ 4304.05
        let result = solve_required_monthly(&input(1_000_000, 10, 12)).unwrap();
        let required = result.required_monthly_investment.to_f64().unwrap();
        assert!((required - 4304.05).abs() < 0.1, "required = {}", required);
    }

    #[test]
    fn test_round_trip_reproduces_target() {
        let goal = input(1_000_000, 10, 12);
        let solved = solve_required_monthly(&goal).unwrap();

        let projection = project_investment(&InvestmentInput {
            monthly_amount: solved.required_monthly_investment.clone(),
            annual_return_pct: goal.annual_return_pct.clone(),
            years: goal.years,
        })
        .unwrap();

        // Back within 0.01% of the target
        let fv = projection.future_value.to_f64().unwrap();
        assert!((fv - 1_000_000.0).abs() / 1_000_000.0 < 1e-4, "fv = {}", fv);
    }

    #[test]
    fn test_more_years_lowers_required_monthly() {
        let short = solve_required_monthly(&input(1_000_000, 5, 12)).unwrap();
        let long = solve_required_monthly(&input(1_000_000, 10, 12)).unwrap();
        assert!(long.required_monthly_investment < short.required_monthly_investment);
    }

    #[test]
    fn test_series_ends_near_target() {
        let result = solve_required_monthly(&input(1_000_000, 10, 12)).unwrap();
        assert_eq!(result.series.len(), 10);

        let last = result.series.last().unwrap();
        let fv = last.projected_value.to_f64().unwrap();
        assert!((fv - 1_000_000.0).abs() < 1.0, "fv = {}", fv);
        assert_eq!(last.invested, result.total_invested);
    }

    #[test]
    fn test_zero_rate_is_undefined() {
        assert!(solve_required_monthly(&input(1_000_000, 10, 0)).is_err());
        assert!(solve_required_monthly(&GoalInput {
            target_amount: Number::from_i64(1_000_000),
            years: 10,
            annual_return_pct: Number::from_i64(-5),
        })
        .is_err());
    }

    #[test]
    fn test_undefined_inputs() {
        assert!(solve_required_monthly(&input(0, 10, 12)).is_err());
        assert!(solve_required_monthly(&input(1_000_000, 0, 12)).is_err());
    }

    #[test]
    fn test_high_burden_insight() {
        // 1 crore over 10 years needs ~43k/month
        let inp = input(10_000_000, 10, 12);
        let result = solve_required_monthly(&inp).unwrap();
        let insights = goal_insights(&inp, &result);
        assert!(insights
            .iter()
            .any(|i| i.message.contains("time horizon")));
    }

    #[test]
    fn test_start_earlier_insight() {
        // Dropping 10y -> 8y inflates ~4304 to ~6191, well past +30%
        let inp = input(1_000_000, 10, 12);
        let result = solve_required_monthly(&inp).unwrap();
        let insights = goal_insights(&inp, &result);
        assert!(insights
            .iter()
            .any(|i| i.message.contains("Starting 2 years earlier")));
    }

    #[test]
    fn test_achievable_fallback() {
        // Modest one-year goal, high return, nothing to nudge about
        let inp = input(100_000, 1, 12);
        let result = solve_required_monthly(&inp).unwrap();
        let insights = goal_insights(&inp, &result);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Positive);
    }
}
