//! Temperature scales
//!
//! Celsius, Fahrenheit and Réaumur are affine relative to Kelvin, so they
//! cannot share the linear factor pivot. Each scale carries its own exact
//! forward and inverse formula; conversions go `from -> Kelvin -> to`.
//! Multiplications happen before divisions so decimal-exact inputs stay
//! exact (0 °C -> 32 °F, not 31.999…).

use serde::{Deserialize, Serialize};
use unitary_core::{Number, NumberError};
use crate::unit::BaseScale;

/// Kelvin at 0 °C
const ICE_POINT_KELVIN: &str = "273.15";

/// Rankine at 0 °F
const FAHRENHEIT_ZERO_RANKINE: &str = "459.67";

/// Supported temperature scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureScale {
    Kelvin,
    Celsius,
    Fahrenheit,
    Rankine,
    Reaumur,
}

impl TemperatureScale {
    pub const ALL: [TemperatureScale; 5] = [
        TemperatureScale::Kelvin,
        TemperatureScale::Celsius,
        TemperatureScale::Fahrenheit,
        TemperatureScale::Rankine,
        TemperatureScale::Reaumur,
    ];

    /// Convert a reading on this scale to Kelvin
    pub fn to_kelvin(&self, value: &Number) -> Result<Number, NumberError> {
        match self {
            TemperatureScale::Kelvin => Ok(value.clone()),
            // K = C + 273.15
            TemperatureScale::Celsius => Ok(value.add(&ice_point()?)),
            // K = (F + 459.67) * 5 / 9
            TemperatureScale::Fahrenheit => value
                .add(&fahrenheit_zero()?)
                .mul(&Number::from_i64(5))
                .checked_div(&Number::from_i64(9)),
            // K = R * 5 / 9
            TemperatureScale::Rankine => value
                .mul(&Number::from_i64(5))
                .checked_div(&Number::from_i64(9)),
            // K = Re * 5 / 4 + 273.15
            TemperatureScale::Reaumur => Ok(value
                .mul(&Number::from_i64(5))
                .checked_div(&Number::from_i64(4))?
                .add(&ice_point()?)),
        }
    }

    /// Convert a Kelvin reading to this scale
    pub fn from_kelvin(&self, kelvin: &Number) -> Result<Number, NumberError> {
        match self {
            TemperatureScale::Kelvin => Ok(kelvin.clone()),
            // C = K - 273.15
            TemperatureScale::Celsius => Ok(kelvin.sub(&ice_point()?)),
            // F = K * 9 / 5 - 459.67
            TemperatureScale::Fahrenheit => Ok(kelvin
                .mul(&Number::from_i64(9))
                .checked_div(&Number::from_i64(5))?
                .sub(&fahrenheit_zero()?)),
            // R = K * 9 / 5
            TemperatureScale::Rankine => kelvin
                .mul(&Number::from_i64(9))
                .checked_div(&Number::from_i64(5)),
            // Re = (K - 273.15) * 4 / 5
            TemperatureScale::Reaumur => kelvin
                .sub(&ice_point()?)
                .mul(&Number::from_i64(4))
                .checked_div(&Number::from_i64(5)),
        }
    }
}

impl BaseScale for TemperatureScale {
    fn to_base(&self, value: &Number) -> Result<Number, NumberError> {
        self.to_kelvin(value)
    }

    fn from_base(&self, base: &Number) -> Result<Number, NumberError> {
        self.from_kelvin(base)
    }
}

fn ice_point() -> Result<Number, NumberError> {
    Number::from_str(ICE_POINT_KELVIN)
}

fn fahrenheit_zero() -> Result<Number, NumberError> {
    Number::from_str(FAHRENHEIT_ZERO_RANKINE)
}
