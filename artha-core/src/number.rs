//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for arbitrary precision decimal arithmetic.
//! The engine only ever raises a base to an integer power, so everything
//! here is plain decimal arithmetic at a fixed working precision.

use dashu_float::ops::Abs;
use dashu_float::DBig;
use dashu_int::ops::BitTest;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Default precision for calculations (decimal digits)
const DEFAULT_PRECISION: usize = 50;

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig. All operations return Results or new
/// Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    /// Ensure a DBig has adequate precision for calculations
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(DEFAULT_PRECISION).value()
    }

    /// Create from string representation
    /// Supports: "123", "3.14", "-42", "1/3"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Handle rational format "a/b"
        if s.contains('/') && !s.contains('.') {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() == 2 {
                let num: DBig = parts[0]
                    .trim()
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let den: DBig = parts[1]
                    .trim()
                    .parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;

                if den == DBig::ZERO {
                    return Err(NumberError::DivisionByZero);
                }

                let result = Self::with_work_precision(num) / Self::with_work_precision(den);
                return Ok(Self { inner: result });
            }
        }

        // Standard decimal parsing
        let inner: DBig = s
            .parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Ok(Self {
            inner: Self::with_work_precision(inner),
        })
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self {
            inner: Self::with_work_precision(DBig::from(n)),
        }
    }

    /// Create from ratio (exact division)
    pub fn from_ratio(num: i64, den: i64) -> Self {
        if den == 0 {
            return Self { inner: DBig::ZERO };
        }
        let n = Self::with_work_precision(DBig::from(num));
        let d = Self::with_work_precision(DBig::from(den));
        Self { inner: n / d }
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        let floor_val = self.inner.clone().floor();
        self.inner == floor_val
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self {
            inner: &self.inner + &other.inner,
        }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            inner: &self.inner - &other.inner,
        }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            inner: &self.inner * &other.inner,
        }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self {
                inner: &self.inner / &other.inner,
            })
        }
    }

    /// Integer power (exact)
    pub fn pow(&self, exp: i32) -> Self {
        if exp == 0 {
            return Self::from_i64(1);
        }

        let abs_exp = exp.unsigned_abs();
        let mut result = Self::from_i64(1);

        // Simple repeated multiplication
        for _ in 0..abs_exp {
            result = result.mul(self);
        }

        if exp < 0 {
            Self::from_i64(1)
                .checked_div(&result)
                .unwrap_or(Self::from_i64(0))
        } else {
            result
        }
    }

    // ========== Rounding ==========

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self {
            inner: Abs::abs(self.inner.clone()),
        }
    }

    /// Floor - largest integer <= x
    pub fn floor(&self) -> Self {
        Self {
            inner: self.inner.clone().floor(),
        }
    }

    /// Ceiling - smallest integer >= x
    pub fn ceil(&self) -> Self {
        Self {
            inner: self.inner.clone().ceil(),
        }
    }

    /// Round to the nearest integer, halves up
    pub fn round(&self) -> Self {
        let half = Self::from_ratio(1, 2);
        self.add(&half).floor()
    }

    // ========== Conversion ==========

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }

        // DBig stores as significand * 10^exponent
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        // Anything beyond these exponents cannot fit an i64 anyway
        if !(-60..=19).contains(&exponent) {
            return None;
        }

        let scaled: IBig = if exponent >= 0 {
            significand * IBig::from(10).pow(exponent as usize)
        } else {
            let divisor = IBig::from(10).pow((-exponent) as usize);
            if &significand % &divisor != IBig::ZERO {
                return None;
            }
            significand / divisor
        };

        scaled.try_into().ok()
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> Option<f64> {
        // Get the representation: significand * 10^exponent
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        // Convert significand to f64, scaling down when it exceeds 53 bits
        let sig_f64: f64 = if significand.bit_len() <= 53 {
            match TryInto::<i64>::try_into(significand.clone()) {
                Ok(i) => i as f64,
                Err(_) => {
                    let is_neg = significand < IBig::ZERO;
                    let abs_sig = if is_neg {
                        -significand.clone()
                    } else {
                        significand.clone()
                    };
                    match TryInto::<u64>::try_into(abs_sig) {
                        Ok(u) => {
                            if is_neg {
                                -(u as f64)
                            } else {
                                u as f64
                            }
                        }
                        Err(_) => return None,
                    }
                }
            }
        } else {
            // Shift right to fit in 53 bits, then account for the shifted bits
            let extra_bits = significand.bit_len() - 53;
            let shifted = &significand >> extra_bits;
            let shifted_i64: i64 = shifted.try_into().ok()?;
            (shifted_i64 as f64) * 2_f64.powi(extra_bits as i32)
        };

        // Apply the decimal exponent
        let result = if exponent == 0 {
            sig_f64
        } else if exponent > 0 && exponent <= 308 {
            sig_f64 * 10_f64.powi(exponent as i32)
        } else if exponent < 0 && exponent >= -308 {
            sig_f64 / 10_f64.powi((-exponent) as i32)
        } else {
            return None;
        };

        if result.is_finite() {
            Some(result)
        } else {
            None
        }
    }

    // ========== Display ==========

    /// Render as decimal string with specified decimal places
    pub fn as_decimal(&self, places: u32) -> String {
        if let Some(f) = self.to_f64() {
            format!("{:.prec$}", f, prec = places as usize)
        } else {
            format!("{}", self.inner)
        }
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_decimal(10))
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner
            .partial_cmp(&other.inner)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}
