//! Exact decimal numbers using dashu
//!
//! Uses dashu-float (DBig) for decimal arithmetic. Unit factors such as
//! `1609.344` are held exactly; only division rounds, at the working
//! precision, so repeated conversions never pick up binary-float drift.

use dashu_float::DBig;
use dashu_float::ops::Abs;
use dashu_int::IBig;
use serde::{Deserialize, Serialize, Serializer, Deserializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Working precision for calculations (significant decimal digits)
pub const WORK_PRECISION: usize = 50;

/// Largest accepted magnitude of a written exponent (`1e10000`).
/// Keeps exponent arithmetic in conversions far from `isize` limits.
pub const MAX_EXPONENT: isize = 10_000;

/// Exact decimal number
///
/// Built on dashu-float's DBig. All operations return Results or new
/// Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    /// Ensure a DBig carries the working precision
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(WORK_PRECISION).value()
    }

    /// Create from string representation
    /// Supports: "123", "-3.14", "1.5e10", "602214076e-42", "5/18"
    ///
    /// The ratio form is meant for unit tables, where factors such as
    /// km/h (5/18 m/s) have no finite decimal expansion.
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        if let Some((num, den)) = s.split_once('/') {
            let num = Self::from_str(num)?;
            let den = Self::from_str(den)?;
            return num.checked_div(&den);
        }

        Self::parse_decimal(s, '.')
            .ok_or_else(|| NumberError::ParseError(s.to_string()))
    }

    /// Strict decimal parser shared with the locale-aware formatter.
    ///
    /// Grammar: `[-] digits [sep digits] [(e|E) [-] digits]`, with at least
    /// one mantissa digit and an exponent no larger than [`MAX_EXPONENT`].
    /// Anything else is rejected.
    pub(crate) fn parse_decimal(text: &str, separator: char) -> Option<Self> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };

        let (int_digits, frac_digits) = mantissa
            .split_once(separator)
            .unwrap_or((mantissa, ""));

        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }
        if !all_digits(int_digits) || !all_digits(frac_digits) {
            return None;
        }

        let exponent: isize = match exponent {
            None => 0,
            Some(exp) => {
                let (exp_negative, exp_digits) = match exp.strip_prefix('-') {
                    Some(digits) => (true, digits),
                    None => (false, exp),
                };
                if exp_digits.is_empty() || !all_digits(exp_digits) {
                    return None;
                }
                let magnitude: isize = exp_digits.parse().ok()?;
                if magnitude > MAX_EXPONENT {
                    return None;
                }
                if exp_negative { -magnitude } else { magnitude }
            }
        };

        let scale = isize::try_from(frac_digits.len()).ok()?;
        let exponent = exponent.checked_sub(scale)?;

        let mut significand: IBig = format!("{}{}", int_digits, frac_digits).parse().ok()?;
        if negative {
            significand = -significand;
        }

        Some(Self { inner: Self::with_work_precision(DBig::from_parts(significand, exponent)) })
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
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

    /// Check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.inner > DBig::ZERO
    }

    /// Equality within a relative tolerance: `|a - b| <= tolerance * max(|a|, |b|, 1)`
    pub fn approx_eq(&self, other: &Self, tolerance: &Self) -> bool {
        let scale = self.abs().max(other.abs()).max(Self::from_i64(1));
        self.sub(other).abs() <= tolerance.mul(&scale)
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Negation
    pub fn neg(&self) -> Self {
        Self { inner: -self.inner.clone() }
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self { inner: Abs::abs(self.inner.clone()) }
    }

    // ========== Decomposition ==========

    /// Split into sign, significand digits and power-of-ten exponent,
    /// so that `value = ±digits × 10^exponent`.
    pub fn to_decimal_parts(&self) -> (bool, String, isize) {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let negative = significand < IBig::ZERO;
        let digits = significand.to_string().trim_start_matches('-').to_string();
        (negative, digits, exponent)
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::format::format(self))
    }
}

/// Serialized at full precision; `Display` is the rounded presentation form
impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::format::NumericFormatter::exact().format(self))
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
        // DBig implements PartialOrd, use it and treat None as Equal
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}
