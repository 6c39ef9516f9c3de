//! Exchange-rate feed decoding
//!
//! Shape (exchangerate-api v6 style):
//!
//! ```json
//! {"result": "success", "base_code": "USD", "conversion_rates": {"USD": 1, "EUR": 0.9213}}
//! {"result": "error", "error-type": "invalid-key"}
//! ```
//!
//! Other fields are ignored. Rates are decoded from the raw JSON text,
//! never through `f64`, so the decimal a feed sends is the decimal we
//! convert with.

use std::collections::HashMap;
use serde::Deserialize;
use serde_json::value::RawValue;
use unitary_core::Number;
use crate::{RateFetchError, RateSet};

#[derive(Debug, Deserialize)]
struct RateResponse {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    conversion_rates: Option<HashMap<String, Box<RawValue>>>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
}

/// Decode a feed body into a rate set
pub fn decode(text: &str) -> Result<RateSet, RateFetchError> {
    let response: RateResponse = serde_json::from_str(text)?;

    if response.result != "success" {
        let kind = response.error_type.unwrap_or(response.result);
        return Err(RateFetchError::Rejected(kind));
    }

    let base_code = response
        .base_code
        .ok_or_else(|| RateFetchError::Decode("missing base_code".to_string()))?;
    let raw = response
        .conversion_rates
        .ok_or_else(|| RateFetchError::Decode("missing conversion_rates".to_string()))?;

    let mut rates = HashMap::with_capacity(raw.len());
    for (code, value) in raw {
        let text = value.get().trim();
        if !text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
            return Err(RateFetchError::Decode(format!("rate for {} is not a number", code)));
        }
        // JSON allows "1E+5"; the decimal grammar does not
        let rate = Number::from_str(&text.replace("e+", "e").replace("E+", "E"))?;
        rates.insert(code, rate);
    }

    Ok(RateSet { base_code, rates })
}
