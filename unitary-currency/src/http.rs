//! HTTP rate source

use std::time::Duration;
use async_trait::async_trait;
use tracing::debug;
use crate::{wire, RateFetchError, RateSet, RateSource};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the exchange-rate JSON from a URL, e.g.
/// `https://v6.exchangerate-api.com/v6/<key>/latest/USD`
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>) -> Result<Self, RateFetchError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, RateFetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("unitary/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpRateSource { client, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rates(&self) -> Result<RateSet, RateFetchError> {
        debug!(url = %self.url, "fetching exchange rates");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateFetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        wire::decode(&body)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}
