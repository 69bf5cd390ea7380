//! Loan amortization (EMI)
//!
//! The monthly payment is rounded to a whole currency unit exactly once,
//! and every downstream total derives from that rounded figure. Displayed
//! totals therefore always agree with the displayed monthly payment.

use crate::helpers::{compound_factor, monthly_rate, shortened_years, validate_positive};
use crate::insight::Insight;
use artha_core::{Number, UndefinedResult};
use serde::{Deserialize, Serialize};

/// Minimum total saved before a shorter tenure is worth suggesting
const TENURE_SAVINGS_THRESHOLD: i64 = 50_000;

/// Nominal annual rate above which a refinance nudge appears
const REFINANCE_RATE_PCT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Number,
    pub annual_rate_pct: Number,
    pub years: u32,
}

/// Cumulative interest/principal split at a year boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub year: u32,
    pub cumulative_interest: Number,
    pub cumulative_principal: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// EMI rounded to the nearest whole currency unit
    pub monthly_payment: i64,
    pub total_interest: Number,
    pub total_payment: Number,
    pub schedule: Vec<ScheduleEntry>,
}

/// Compute the EMI and amortization schedule for a loan.
///
/// `EMI = P * R * (1+R)^N / ((1+R)^N - 1)` with `R` the monthly rate and
/// `N` the month count. A rate of exactly zero is undefined, same as any
/// other non-positive input.
pub fn amortize(input: &LoanInput) -> Result<LoanResult, UndefinedResult> {
    validate_positive(&input.principal, "principal")?;
    validate_positive(&input.annual_rate_pct, "interest rate")?;
    if input.years == 0 {
        return Err(UndefinedResult::nonpositive("loan tenure"));
    }

    let rate = monthly_rate(&input.annual_rate_pct)?;
    let months = input.years * 12;

    let one = Number::from_i64(1);
    let factor = compound_factor(&rate, months);
    let numerator = input.principal.mul(&rate).mul(&factor);
    let exact_emi = numerator.checked_div(&factor.sub(&one))?;

    // Round once; totals below use the rounded payment, not the exact one
    let monthly_payment = exact_emi
        .round()
        .to_i64()
        .ok_or_else(|| UndefinedResult::new("monthly payment out of range"))?;

    let emi = Number::from_i64(monthly_payment);
    let total_payment = emi.mul(&Number::from_i64(months as i64));
    let total_interest = total_payment.sub(&input.principal);

    // Amortization walk with a running balance
    let mut balance = input.principal.clone();
    let mut cumulative_interest = Number::from_i64(0);
    let mut cumulative_principal = Number::from_i64(0);
    let mut schedule = Vec::with_capacity(input.years as usize);

    for month in 1..=months {
        let interest = balance.mul(&rate);
        let principal_part = emi.sub(&interest);
        balance = balance.sub(&principal_part);
        cumulative_interest = cumulative_interest.add(&interest);
        cumulative_principal = cumulative_principal.add(&principal_part);

        if month % 12 == 0 || month == months {
            schedule.push(ScheduleEntry {
                year: month.div_ceil(12),
                cumulative_interest: cumulative_interest.clone(),
                cumulative_principal: cumulative_principal.clone(),
            });
        }
    }

    Ok(LoanResult {
        monthly_payment,
        total_interest,
        total_payment,
        schedule,
    })
}

/// Advisory nudges for a computed loan. Never affects the numbers.
pub fn loan_insights(input: &LoanInput, result: &LoanResult) -> Vec<Insight> {
    let mut insights = Vec::new();

    if input.annual_rate_pct > Number::from_i64(REFINANCE_RATE_PCT) {
        insights.push(Insight::suggestion(
            "Consider a balance transfer to a lower-interest loan.",
        ));
    }

    let shorter = shortened_years(input.years);
    if shorter < input.years {
        let alternate = LoanInput {
            principal: input.principal.clone(),
            annual_rate_pct: input.annual_rate_pct.clone(),
            years: shorter,
        };
        if let Ok(alt) = amortize(&alternate) {
            let savings = result.total_payment.sub(&alt.total_payment);
            if savings > Number::from_i64(TENURE_SAVINGS_THRESHOLD) {
                insights.push(Insight::suggestion(format!(
                    "Reduce the tenure to {} years to save ₹{} overall.",
                    shorter,
                    savings.as_decimal(0)
                )));
            }
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(principal: i64, rate_tenths: i64, years: u32) -> LoanInput {
        LoanInput {
            principal: Number::from_i64(principal),
            annual_rate_pct: Number::from_ratio(rate_tenths, 10),
            years,
        }
    }

    #[test]
    fn test_reference_loan() {
        // 5L at 9.5% over 5 years: exact EMI is 10500.93..., rounds to 10501
        let result = amortize(&input(500_000, 95, 5)).unwrap();
        assert_eq!(result.monthly_payment, 10_501);
        assert_eq!(result.total_payment.to_i64(), Some(630_060));
        assert_eq!(result.total_interest.to_i64(), Some(130_060));
    }

    #[test]
    fn test_totals_derive_from_rounded_emi() {
        let result = amortize(&input(750_000, 82, 7)).unwrap();
        let months = Number::from_i64(7 * 12);
        let expected = Number::from_i64(result.monthly_payment).mul(&months);
        assert_eq!(result.total_payment, expected);

        let expected_interest = expected.sub(&Number::from_i64(750_000));
        assert_eq!(result.total_interest, expected_interest);
    }

    #[test]
    fn test_schedule_shape() {
        let result = amortize(&input(500_000, 95, 5)).unwrap();
        assert_eq!(result.schedule.len(), 5);
        assert_eq!(result.schedule[0].year, 1);
        assert_eq!(result.schedule[4].year, 5);
    }

    #[test]
    fn test_schedule_retires_principal() {
        let result = amortize(&input(500_000, 95, 5)).unwrap();
        let last = result.schedule.last().unwrap();

        // Final cumulative principal matches the loan within the slack the
        // once-rounded EMI introduces over the full term (< 0.5 per month)
        let drift = last
            .cumulative_principal
            .sub(&Number::from_i64(500_000))
            .abs();
        assert!(drift < Number::from_i64(60), "drift = {}", drift);
    }

    #[test]
    fn test_schedule_cumulative_monotone() {
        let result = amortize(&input(1_200_000, 88, 10)).unwrap();
        for pair in result.schedule.windows(2) {
            assert!(pair[1].cumulative_interest > pair[0].cumulative_interest);
            assert!(pair[1].cumulative_principal > pair[0].cumulative_principal);
        }
    }

    #[test]
    fn test_undefined_inputs() {
        assert!(amortize(&input(0, 95, 5)).is_err());
        assert!(amortize(&input(500_000, 0, 5)).is_err());
        assert!(amortize(&input(500_000, 95, 0)).is_err());
    }

    #[test]
    fn test_refinance_insight_above_ten_percent() {
        let inp = input(500_000, 110, 5); // 11%
        let result = amortize(&inp).unwrap();
        let insights = loan_insights(&inp, &result);
        assert!(insights.iter().any(|i| i.message.contains("balance transfer")));
    }

    #[test]
    fn test_tenure_insight_on_long_loan() {
        // A large long loan saves well over the threshold at 80% tenure
        let inp = input(5_000_000, 95, 20);
        let result = amortize(&inp).unwrap();
        let insights = loan_insights(&inp, &result);
        assert!(insights.iter().any(|i| i.message.contains("16 years")));
    }

    #[test]
    fn test_insights_do_not_change_result() {
        let inp = input(500_000, 95, 5);
        let before = amortize(&inp).unwrap();
        let _ = loan_insights(&inp, &before);
        let after = amortize(&inp).unwrap();
        assert_eq!(before, after);
    }
}
