//! SIP investment projection
//!
//! Future value of a fixed monthly contribution compounded monthly as an
//! annuity-due, with a per-year growth series for charting.

use crate::helpers::{annuity_due_factor, monthly_rate, validate_positive};
use crate::insight::Insight;
use artha_core::{Number, UndefinedResult};
use serde::{Deserialize, Serialize};

/// One crore, the aspirational wealth mark used by the insight heuristics
const CRORE: i64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub monthly_amount: Number,
    pub annual_return_pct: Number,
    pub years: u32,
}

/// Projection snapshot at the end of a whole year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearPoint {
    pub year: u32,
    pub cumulative_value: Number,
    pub cumulative_invested: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub future_value: Number,
    pub total_invested: Number,
    pub wealth_gained: Number,
    pub series: Vec<YearPoint>,
}

/// Project the future value of a monthly SIP.
///
/// `FV = P * ((1+r)^n - 1) / r * (1+r)` with `r` the monthly rate and
/// `n` the month count. Non-positive amount, rate, or duration is an
/// [`UndefinedResult`]; the caller gets no NaN or infinity under any input.
pub fn project_investment(input: &InvestmentInput) -> Result<InvestmentResult, UndefinedResult> {
    validate_positive(&input.monthly_amount, "monthly amount")?;
    validate_positive(&input.annual_return_pct, "annual return rate")?;
    if input.years == 0 {
        return Err(UndefinedResult::nonpositive("investment duration"));
    }

    let rate = monthly_rate(&input.annual_return_pct)?;
    let months = input.years * 12;

    let future_value = future_value_at(&input.monthly_amount, &rate, months)?;
    let total_invested = input.monthly_amount.mul(&Number::from_i64(months as i64));
    let wealth_gained = future_value.sub(&total_invested);

    // Each year is recomputed from scratch rather than accumulated, so the
    // series carries no compounding of intermediate rounding
    let mut series = Vec::with_capacity(input.years as usize);
    for year in 1..=input.years {
        let m = year * 12;
        series.push(YearPoint {
            year,
            cumulative_value: future_value_at(&input.monthly_amount, &rate, m)?,
            cumulative_invested: input.monthly_amount.mul(&Number::from_i64(m as i64)),
        });
    }

    Ok(InvestmentResult {
        future_value,
        total_invested,
        wealth_gained,
        series,
    })
}

fn future_value_at(
    monthly: &Number,
    rate: &Number,
    months: u32,
) -> Result<Number, UndefinedResult> {
    Ok(monthly.mul(&annuity_due_factor(rate, months)?))
}

/// Advisory nudges for a computed projection. Never affects the numbers.
pub fn investment_insights(input: &InvestmentInput, result: &InvestmentResult) -> Vec<Insight> {
    let mut insights = Vec::new();
    let target = Number::from_i64(CRORE);

    if result.future_value < target {
        let shortfall = target.sub(&result.future_value);
        let months = Number::from_i64(input.years as i64 * 12);
        if let Ok(extra) = shortfall.checked_div(&months) {
            insights.push(Insight::suggestion(format!(
                "Increase your SIP by ₹{} to reach ₹1 crore in {} years.",
                extra.ceil().as_decimal(0),
                input.years
            )));
        }
    } else {
        insights.push(Insight::positive(
            "You're on track to build significant wealth!",
        ));
    }

    if input.annual_return_pct < Number::from_i64(10) {
        insights.push(Insight::suggestion(
            "Consider equity-focused funds for higher long-term returns.",
        ));
    }

    insights
}
