//! The engine's boundary error
//!
//! Errors never crash the system. Invalid-but-well-typed numeric input
//! produces an explicit "no result" value the presentation layer can turn
//! into an empty/prompt state.

use crate::NumberError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single error kind the engine surfaces: the requested computation is
/// undefined for the given inputs (non-positive amount/rate/term, or a
/// division by zero the formula would otherwise hit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("undefined result: {reason}")]
pub struct UndefinedResult {
    pub reason: String,
}

impl UndefinedResult {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// A required amount, rate, or term was zero or negative
    pub fn nonpositive(field: &str) -> Self {
        Self::new(format!("{} must be positive", field))
    }

    /// A zero return rate makes the annuity factor divide by zero
    pub fn zero_rate() -> Self {
        Self::new("return rate of zero makes the projection undefined")
    }
}

impl From<NumberError> for UndefinedResult {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::DivisionByZero => Self::new("division by zero"),
            NumberError::ParseError(s) => Self::new(format!("unparseable number: {}", s)),
        }
    }
}
