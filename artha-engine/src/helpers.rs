//! Common financial utilities

use artha_core::{Number, UndefinedResult};

/// Validate that an amount, rate, or term is strictly positive
pub(crate) fn validate_positive(
    value: &Number,
    field: &'static str,
) -> Result<(), UndefinedResult> {
    if value.is_zero() || value.is_negative() {
        return Err(UndefinedResult::nonpositive(field));
    }
    Ok(())
}

/// Convert a nominal annual percentage to a monthly rate (pct / 12 / 100)
pub(crate) fn monthly_rate(annual_pct: &Number) -> Result<Number, UndefinedResult> {
    Ok(annual_pct.checked_div(&Number::from_i64(1200))?)
}

/// Calculate (1 + rate)^months exactly
pub(crate) fn compound_factor(rate: &Number, months: u32) -> Number {
    let one = Number::from_i64(1);
    one.add(rate).pow(months as i32)
}

/// Annuity-due factor: ((1+r)^n - 1) / r * (1+r)
///
/// Multiplying this by a monthly contribution gives the future value of
/// that contribution stream; dividing a target by it reverses the solve.
pub(crate) fn annuity_due_factor(rate: &Number, months: u32) -> Result<Number, UndefinedResult> {
    let one = Number::from_i64(1);
    let factor = compound_factor(rate, months);
    let growth = factor.sub(&one).checked_div(rate)?;
    Ok(growth.mul(&one.add(rate)))
}

/// 80% of a term, floored, never below one year
pub(crate) fn shortened_years(years: u32) -> u32 {
    (years * 4 / 5).max(1)
}
