//! Rate sources
//!
//! The converter only knows the [`RateSource`] trait. Where rates come from
//! (HTTP, a file on disk, a fixed table in tests) is the source's business,
//! as are retries, backoff and timeouts.

use std::path::PathBuf;
use async_trait::async_trait;
use thiserror::Error;
use unitary_core::{ConversionError, NumberError};
use crate::wire;
use crate::RateSet;

/// Why a fetch produced no rates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateFetchError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("rate source returned HTTP {0}")]
    Status(u16),

    #[error("could not read rates: {0}")]
    Io(String),

    #[error("could not decode rates: {0}")]
    Decode(String),

    /// The feed answered but reported an error (`"error-type"`)
    #[error("rate source rejected the request: {0}")]
    Rejected(String),
}

impl RateFetchError {
    /// Whether asking again later may help
    pub fn is_retryable(&self) -> bool {
        match self {
            RateFetchError::Rejected(kind) => {
                !matches!(kind.as_str(), "invalid-key" | "inactive-account" | "unsupported-code" | "malformed-request")
            }
            RateFetchError::Status(status) => !matches!(status, 400 | 401 | 403 | 404),
            _ => true,
        }
    }
}

impl From<reqwest::Error> for RateFetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<std::io::Error> for RateFetchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RateFetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<NumberError> for RateFetchError {
    fn from(err: NumberError) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<RateFetchError> for ConversionError {
    fn from(err: RateFetchError) -> Self {
        ConversionError::RateFetchFailed {
            retryable: err.is_retryable(),
            reason: err.to_string(),
        }
    }
}

/// Something that can produce a current rate table
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch the current rates
    async fn fetch_rates(&self) -> Result<RateSet, RateFetchError>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Fixed answer, for tests and offline use
#[derive(Debug, Clone)]
pub struct StaticRateSource {
    answer: Result<RateSet, RateFetchError>,
}

impl StaticRateSource {
    pub fn new(rates: RateSet) -> Self {
        StaticRateSource { answer: Ok(rates) }
    }

    /// A source whose every fetch fails with `err`
    pub fn failing(err: RateFetchError) -> Self {
        StaticRateSource { answer: Err(err) }
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch_rates(&self) -> Result<RateSet, RateFetchError> {
        self.answer.clone()
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Reads the exchange-rate JSON from a local file
#[derive(Debug, Clone)]
pub struct FileRateSource {
    path: PathBuf,
}

impl FileRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileRateSource { path: path.into() }
    }
}

#[async_trait]
impl RateSource for FileRateSource {
    async fn fetch_rates(&self) -> Result<RateSet, RateFetchError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        wire::decode(&text)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitary_core::{codes, Number};

    #[tokio::test]
    async fn test_static_source() {
        let set = RateSet::new("USD").with_rate("EUR", Number::from_str("0.9").unwrap());
        let source = StaticRateSource::new(set.clone());
        assert_eq!(source.fetch_rates().await.unwrap(), set);
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = StaticRateSource::failing(RateFetchError::Http("connection refused".into()));
        assert!(source.fetch_rates().await.is_err());
    }

    #[tokio::test]
    async fn test_file_source() {
        let path = std::env::temp_dir().join(format!("unitary-rates-{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"{"result":"success","base_code":"USD","conversion_rates":{"USD":1,"EUR":0.92}}"#,
        )
        .await
        .unwrap();

        let set = FileRateSource::new(&path).fetch_rates().await.unwrap();
        assert_eq!(set.base_code, "USD");
        assert_eq!(set.rates["EUR"], Number::from_str("0.92").unwrap());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = FileRateSource::new("/nonexistent/unitary/rates.json")
            .fetch_rates()
            .await
            .unwrap_err();
        assert!(matches!(err, RateFetchError::Io(_)));
    }

    #[test]
    fn test_retryable() {
        assert!(RateFetchError::Http("timeout".into()).is_retryable());
        assert!(RateFetchError::Status(503).is_retryable());
        assert!(!RateFetchError::Status(401).is_retryable());
        assert!(RateFetchError::Rejected("quota-reached".into()).is_retryable());
        assert!(!RateFetchError::Rejected("invalid-key".into()).is_retryable());
    }

    #[test]
    fn test_into_conversion_error() {
        let err: ConversionError = RateFetchError::Decode("bad json".into()).into();
        assert_eq!(err.code(), codes::RATE_FETCH_FAILED);
        assert!(err.is_retryable());
    }
}
