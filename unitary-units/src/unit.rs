//! Unit descriptors and the shared pivot algorithm

use std::fmt;
use serde::Serialize;
use unitary_core::{Number, NumberError};
use crate::TemperatureScale;

/// A scale that maps readings onto a category's base unit and back.
///
/// Implemented by linear factors, temperature scales and exchange rates,
/// so every category converts through the same [`pivot`].
pub trait BaseScale {
    /// Reading on this scale -> base unit
    fn to_base(&self, value: &Number) -> Result<Number, NumberError>;

    /// Base unit -> reading on this scale
    fn from_base(&self, base: &Number) -> Result<Number, NumberError>;
}

/// Convert `value` between two scales of one category via the base unit.
pub fn pivot<S: BaseScale + ?Sized>(value: &Number, from: &S, to: &S) -> Result<Number, NumberError> {
    let base = from.to_base(value)?;
    to.from_base(&base)
}

/// How a unit relates to its category's base unit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Conversion {
    /// `base = value * factor`
    Linear(Number),
    /// Exact temperature formulas through Kelvin
    Affine(TemperatureScale),
}

impl Conversion {
    pub fn is_linear(&self) -> bool {
        matches!(self, Conversion::Linear(_))
    }
}

impl BaseScale for Conversion {
    fn to_base(&self, value: &Number) -> Result<Number, NumberError> {
        match self {
            Conversion::Linear(factor) => Ok(value.mul(factor)),
            Conversion::Affine(scale) => scale.to_kelvin(value),
        }
    }

    fn from_base(&self, base: &Number) -> Result<Number, NumberError> {
        match self {
            Conversion::Linear(factor) => base.checked_div(factor),
            Conversion::Affine(scale) => scale.from_kelvin(base),
        }
    }
}

/// A unit within one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDescriptor {
    /// The unit symbol (e.g., "m", "psi", "°F")
    pub symbol: String,
    /// The unit name (e.g., "Meters", "Pounds per Square Inch")
    pub name: String,
    /// Relation to the category's base unit
    pub conversion: Conversion,
}

impl UnitDescriptor {
    /// Create a unit with proportional conversion
    pub fn linear(symbol: &str, name: &str, factor: Number) -> Self {
        UnitDescriptor {
            symbol: symbol.to_string(),
            name: name.to_string(),
            conversion: Conversion::Linear(factor),
        }
    }

    /// Create a temperature unit
    pub fn affine(symbol: &str, name: &str, scale: TemperatureScale) -> Self {
        UnitDescriptor {
            symbol: symbol.to_string(),
            name: name.to_string(),
            conversion: Conversion::Affine(scale),
        }
    }

    /// Check if this is the category's pivot unit
    pub fn is_base(&self) -> bool {
        match &self.conversion {
            Conversion::Linear(factor) => *factor == Number::from_i64(1),
            Conversion::Affine(scale) => *scale == TemperatureScale::Kelvin,
        }
    }

    /// Whether `key` names this unit (exact, case-sensitive)
    pub fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.symbol == key
    }
}

impl fmt::Display for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
