//! Exchange-rate snapshots
//!
//! A snapshot is the full rate table at one point in time. It is built once
//! from a fetched [`RateSet`] and never mutated; refreshing swaps in a new
//! snapshot.

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use unitary_core::{Number, NumberError};
use unitary_units::{BaseScale, BASE_CURRENCY, COMMON_CURRENCIES};
use crate::RateFetchError;

/// Rates as delivered by a source, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RateSet {
    /// Currency the rates are quoted against
    pub base_code: String,
    /// Units of each currency per one unit of `base_code`
    pub rates: HashMap<String, Number>,
}

impl RateSet {
    pub fn new(base_code: impl Into<String>) -> Self {
        RateSet {
            base_code: base_code.into(),
            rates: HashMap::new(),
        }
    }

    /// Builder: add a rate
    pub fn with_rate(mut self, code: impl Into<String>, rate: Number) -> Self {
        self.rates.insert(code.into(), rate);
        self
    }
}

/// Units of a currency per one US dollar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRate(pub Number);

impl BaseScale for ExchangeRate {
    /// amount in this currency -> USD
    fn to_base(&self, value: &Number) -> Result<Number, NumberError> {
        value.checked_div(&self.0)
    }

    /// USD -> amount in this currency
    fn from_base(&self, base: &Number) -> Result<Number, NumberError> {
        Ok(base.mul(&self.0))
    }
}

/// Immutable USD-based rate table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateSnapshot {
    base_code: String,
    rates: HashMap<String, ExchangeRate>,
    fetched_at: DateTime<Utc>,
}

impl ExchangeRateSnapshot {
    /// Normalize a fetched rate set onto USD.
    ///
    /// Non-positive rates are dropped. A set quoted against another base is
    /// rebased through its USD rate, which must be present.
    pub fn from_rate_set(set: RateSet, fetched_at: DateTime<Utc>) -> Result<Self, RateFetchError> {
        let usd_per_base = if set.base_code == BASE_CURRENCY {
            Number::from_i64(1)
        } else {
            match set.rates.get(BASE_CURRENCY) {
                Some(rate) if rate.is_positive() => rate.clone(),
                _ => {
                    return Err(RateFetchError::Decode(format!(
                        "rates quoted in {} carry no usable {} rate",
                        set.base_code, BASE_CURRENCY
                    )));
                }
            }
        };

        let mut rates = HashMap::with_capacity(set.rates.len() + 1);
        for (code, rate) in set.rates {
            if !rate.is_positive() {
                warn!(code = %code, rate = %rate, "dropping non-positive exchange rate");
                continue;
            }
            let rebased = rate.checked_div(&usd_per_base)?;
            rates.insert(code, ExchangeRate(rebased));
        }
        rates.insert(BASE_CURRENCY.to_string(), ExchangeRate(Number::from_i64(1)));

        Ok(ExchangeRateSnapshot {
            base_code: BASE_CURRENCY.to_string(),
            rates,
            fetched_at,
        })
    }

    pub fn base_code(&self) -> &str {
        &self.base_code
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Exact, case-sensitive code lookup
    pub fn rate(&self, code: &str) -> Option<&ExchangeRate> {
        self.rates.get(code)
    }

    /// Known codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Degraded-mode table: common currencies, every rate 1
pub(crate) fn fallback_rates() -> HashMap<String, ExchangeRate> {
    COMMON_CURRENCIES
        .iter()
        .map(|(code, _)| (code.to_string(), ExchangeRate(Number::from_i64(1))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    #[test]
    fn test_usd_base_kept() {
        let set = RateSet::new("USD")
            .with_rate("USD", num("1"))
            .with_rate("EUR", num("0.92"));
        let snap = ExchangeRateSnapshot::from_rate_set(set, Utc::now()).unwrap();
        assert_eq!(snap.base_code(), "USD");
        assert_eq!(snap.rate("EUR"), Some(&ExchangeRate(num("0.92"))));
        assert_eq!(snap.codes(), vec!["EUR", "USD"]);
    }

    #[test]
    fn test_rebase_onto_usd() {
        // 1 EUR = 1.25 USD = 160 JPY
        let set = RateSet::new("EUR")
            .with_rate("EUR", num("1"))
            .with_rate("USD", num("1.25"))
            .with_rate("JPY", num("160"));
        let snap = ExchangeRateSnapshot::from_rate_set(set, Utc::now()).unwrap();
        assert_eq!(snap.base_code(), "USD");
        assert_eq!(snap.rate("USD"), Some(&ExchangeRate(num("1"))));
        assert_eq!(snap.rate("EUR"), Some(&ExchangeRate(num("0.8"))));
        assert_eq!(snap.rate("JPY"), Some(&ExchangeRate(num("128"))));
    }

    #[test]
    fn test_rebase_requires_usd() {
        let set = RateSet::new("EUR").with_rate("JPY", num("160"));
        let err = ExchangeRateSnapshot::from_rate_set(set, Utc::now()).unwrap_err();
        assert!(matches!(err, RateFetchError::Decode(_)));
    }

    #[test]
    fn test_non_positive_rates_dropped() {
        let set = RateSet::new("USD")
            .with_rate("EUR", num("0.92"))
            .with_rate("XXX", num("0"))
            .with_rate("YYY", num("-3"));
        let snap = ExchangeRateSnapshot::from_rate_set(set, Utc::now()).unwrap();
        assert!(snap.rate("XXX").is_none());
        assert!(snap.rate("YYY").is_none());
        assert_eq!(snap.len(), 2);
    }

    #[test]
    fn test_exchange_rate_scale() {
        let eur = ExchangeRate(num("0.5"));
        assert_eq!(eur.to_base(&num("10")).unwrap(), num("20"));
        assert_eq!(eur.from_base(&num("20")).unwrap(), num("10"));
    }

    #[test]
    fn test_fallback_rates_are_placeholders() {
        let rates = fallback_rates();
        assert_eq!(rates.len(), COMMON_CURRENCIES.len());
        assert!(rates.values().all(|r| r.0 == Number::from_i64(1)));
    }
}
