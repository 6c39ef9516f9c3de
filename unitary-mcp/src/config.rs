//! Server configuration from the environment

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use unitary::{Locale, RateSource};
use unitary_currency::{FileRateSource, HttpRateSource, RateFetchError};

pub const RATES_URL: &str = "UNITARY_RATES_URL";
pub const RATES_FILE: &str = "UNITARY_RATES_FILE";
pub const RATES_MAX_AGE_SECS: &str = "UNITARY_RATES_MAX_AGE_SECS";
pub const LOCALE: &str = "UNITARY_LOCALE";

const DEFAULT_LOCALE: &str = "en-US";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rates_url: Option<String>,
    pub rates_file: Option<PathBuf>,
    pub max_age: Option<Duration>,
    pub locale_tag: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let max_age = get(RATES_MAX_AGE_SECS).and_then(|raw| match raw.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!(value = %raw, "ignoring {}: not a number of seconds", RATES_MAX_AGE_SECS);
                None
            }
        });

        Config {
            rates_url: get(RATES_URL),
            rates_file: get(RATES_FILE).map(PathBuf::from),
            max_age,
            locale_tag: get(LOCALE).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        }
    }

    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.locale_tag)
    }

    /// The configured rate source; the URL wins over the file
    pub fn rate_source(&self) -> Result<Option<Arc<dyn RateSource>>, RateFetchError> {
        if let Some(url) = &self.rates_url {
            return Ok(Some(Arc::new(HttpRateSource::new(url.clone())?)));
        }
        Ok(self
            .rates_file
            .as_ref()
            .map(|path| Arc::new(FileRateSource::new(path.clone())) as Arc<dyn RateSource>))
    }
}
