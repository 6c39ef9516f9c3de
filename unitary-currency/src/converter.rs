//! Currency conversion over a swappable exchange-rate snapshot
//!
//! Phases: `Uninitialized -> Fetching -> Ready | Degraded`, and
//! `Degraded -> Fetching -> Ready` once a fetch succeeds. Without a fresh
//! snapshot, conversions run on the placeholder table (every rate 1) and
//! say so in their [`RateMode`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use unitary_core::{ConversionError, Number};
use unitary_units::{pivot, Category};
use crate::snapshot::{fallback_rates, ExchangeRate};
use crate::{ExchangeRateSnapshot, RateSource};

/// Lifecycle of the rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatePhase {
    /// No fetch attempted yet
    Uninitialized,
    /// A fetch is in flight
    Fetching,
    /// A live snapshot is installed
    Ready,
    /// Last fetch failed and no snapshot exists; placeholder rates in use
    Degraded,
}

/// Which rates produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RateMode {
    Live { fetched_at: DateTime<Utc> },
    /// Placeholder table; not a real conversion
    Fallback,
}

impl RateMode {
    pub fn is_live(&self) -> bool {
        matches!(self, RateMode::Live { .. })
    }
}

/// A converted amount and the rates behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyQuote {
    pub value: Number,
    #[serde(flatten)]
    pub mode: RateMode,
}

#[derive(Debug)]
struct RateState {
    phase: RatePhase,
    snapshot: Option<Arc<ExchangeRateSnapshot>>,
    last_error: Option<String>,
}

/// USD-pivot currency converter.
///
/// The snapshot is only ever replaced whole: readers clone the `Arc` under
/// a short read lock and convert without holding it.
#[derive(Debug)]
pub struct CurrencyConverter {
    state: RwLock<RateState>,
    fallback: HashMap<String, ExchangeRate>,
    max_age: Option<Duration>,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyConverter {
    pub fn new() -> Self {
        CurrencyConverter {
            state: RwLock::new(RateState {
                phase: RatePhase::Uninitialized,
                snapshot: None,
                last_error: None,
            }),
            fallback: fallback_rates(),
            max_age: None,
        }
    }

    /// Builder: snapshots older than `max_age` are treated as absent
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn phase(&self) -> RatePhase {
        self.state.read().phase
    }

    /// Installed snapshot, fresh or not
    pub fn snapshot(&self) -> Option<Arc<ExchangeRateSnapshot>> {
        self.state.read().snapshot.clone()
    }

    /// Message of the last failed refresh, cleared on success
    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    /// Mode the next conversion would run in
    pub fn mode(&self) -> RateMode {
        match self.live_snapshot() {
            Some(snapshot) => RateMode::Live { fetched_at: snapshot.fetched_at() },
            None => RateMode::Fallback,
        }
    }

    /// Currency codes conversions currently accept
    pub fn codes(&self) -> Vec<String> {
        match self.live_snapshot() {
            Some(snapshot) => snapshot.codes().into_iter().map(str::to_string).collect(),
            None => {
                let mut codes: Vec<String> = self.fallback.keys().cloned().collect();
                codes.sort_unstable();
                codes
            }
        }
    }

    /// Convert between two currency codes (exact, case-sensitive).
    pub fn convert(&self, value: &Number, from: &str, to: &str) -> Result<CurrencyQuote, ConversionError> {
        let live = self.live_snapshot();
        let (rates, mode) = match &live {
            Some(snapshot) => (
                RateLookup::Live(snapshot.as_ref()),
                RateMode::Live { fetched_at: snapshot.fetched_at() },
            ),
            None => (RateLookup::Fallback(&self.fallback), RateMode::Fallback),
        };

        let from_rate = rates.get(from)?;
        let to_rate = rates.get(to)?;
        let value = if from == to {
            value.clone()
        } else {
            pivot(value, from_rate, to_rate)?
        };
        Ok(CurrencyQuote { value, mode })
    }

    /// Install a snapshot directly, as a successful fetch would
    pub fn install(&self, snapshot: ExchangeRateSnapshot) -> Arc<ExchangeRateSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut state = self.state.write();
        state.snapshot = Some(Arc::clone(&snapshot));
        state.phase = RatePhase::Ready;
        state.last_error = None;
        snapshot
    }

    /// Fetch rates once and swap in the new snapshot.
    ///
    /// On failure a previously installed snapshot stays in service; with
    /// none, the converter enters `Degraded`. No retry is attempted.
    /// Dropping the future mid-fetch restores the previous phase.
    pub async fn refresh(&self, source: &dyn RateSource) -> Result<Arc<ExchangeRateSnapshot>, ConversionError> {
        let guard = FetchGuard::begin(self);
        let fetched = source.fetch_rates().await;
        guard.complete();

        let outcome = fetched.and_then(|set| ExchangeRateSnapshot::from_rate_set(set, Utc::now()));
        match outcome {
            Ok(snapshot) => {
                let count = snapshot.len();
                let snapshot = self.install(snapshot);
                info!(source = %source.describe(), rates = count, "exchange rates refreshed");
                Ok(snapshot)
            }
            Err(err) => {
                let mut state = self.state.write();
                state.last_error = Some(err.to_string());
                if state.snapshot.is_some() {
                    state.phase = RatePhase::Ready;
                    warn!(source = %source.describe(), error = %err, "rate refresh failed, keeping previous snapshot");
                } else {
                    state.phase = RatePhase::Degraded;
                    warn!(source = %source.describe(), error = %err, "rate refresh failed, using placeholder rates");
                }
                Err(err.into())
            }
        }
    }

    /// Run [`refresh`](Self::refresh) on the tokio runtime.
    ///
    /// The handle is the completion signal; aborting it cancels the fetch.
    pub fn spawn_refresh(
        self: &Arc<Self>,
        source: Arc<dyn RateSource>,
    ) -> JoinHandle<Result<Arc<ExchangeRateSnapshot>, ConversionError>> {
        let converter = Arc::clone(self);
        tokio::spawn(async move { converter.refresh(source.as_ref()).await })
    }

    fn live_snapshot(&self) -> Option<Arc<ExchangeRateSnapshot>> {
        let snapshot = self.state.read().snapshot.clone()?;
        match self.max_age {
            Some(max_age) if is_stale(snapshot.fetched_at(), max_age) => None,
            _ => Some(snapshot),
        }
    }
}

fn is_stale(fetched_at: DateTime<Utc>, max_age: Duration) -> bool {
    match (Utc::now() - fetched_at).to_std() {
        Ok(age) => age > max_age,
        // Fetched "in the future": clock skew, not staleness
        Err(_) => false,
    }
}

enum RateLookup<'a> {
    Live(&'a ExchangeRateSnapshot),
    Fallback(&'a HashMap<String, ExchangeRate>),
}

impl<'a> RateLookup<'a> {
    fn get(&self, code: &str) -> Result<&'a ExchangeRate, ConversionError> {
        let rate = match self {
            RateLookup::Live(snapshot) => snapshot.rate(code),
            RateLookup::Fallback(rates) => rates.get(code),
        };
        rate.ok_or_else(|| ConversionError::unknown_unit(Category::Currency.id(), code))
    }
}

/// Marks the converter as fetching; puts the old phase back if the fetch
/// is dropped before completing.
struct FetchGuard<'a> {
    converter: &'a CurrencyConverter,
    previous: RatePhase,
    armed: bool,
}

impl<'a> FetchGuard<'a> {
    fn begin(converter: &'a CurrencyConverter) -> Self {
        let mut state = converter.state.write();
        let previous = state.phase;
        state.phase = RatePhase::Fetching;
        FetchGuard { converter, previous, armed: true }
    }

    fn complete(mut self) {
        self.armed = false;
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.converter.state.write();
            if state.phase == RatePhase::Fetching {
                state.phase = self.previous;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Notify;
    use unitary_core::codes;
    use crate::{RateFetchError, RateSet, StaticRateSource};

    fn num(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    fn live_rates() -> RateSet {
        RateSet::new("USD")
            .with_rate("USD", num("1"))
            .with_rate("EUR", num("0.5"))
            .with_rate("JPY", num("150"))
    }

    fn down() -> StaticRateSource {
        StaticRateSource::failing(RateFetchError::Http("connection refused".into()))
    }

    #[test]
    fn test_starts_uninitialized_on_placeholders() {
        let conv = CurrencyConverter::new();
        assert_eq!(conv.phase(), RatePhase::Uninitialized);
        let quote = conv.convert(&num("10"), "USD", "EUR").unwrap();
        assert_eq!(quote.value, num("10"));
        assert_eq!(quote.mode, RateMode::Fallback);
    }

    #[tokio::test]
    async fn test_degraded_mode_still_converts() {
        let conv = CurrencyConverter::new();
        let err = conv.refresh(&down()).await.unwrap_err();
        assert_eq!(err.code(), codes::RATE_FETCH_FAILED);
        assert!(err.is_retryable());
        assert_eq!(conv.phase(), RatePhase::Degraded);
        assert!(conv.last_error().unwrap().contains("connection refused"));

        let quote = conv.convert(&num("10"), "USD", "EUR").unwrap();
        assert_eq!(quote.value, num("10"));
        assert!(!quote.mode.is_live());
    }

    #[tokio::test]
    async fn test_refresh_goes_ready() {
        let conv = CurrencyConverter::new();
        let snapshot = conv.refresh(&StaticRateSource::new(live_rates())).await.unwrap();
        assert_eq!(conv.phase(), RatePhase::Ready);
        assert_eq!(snapshot.len(), 3);

        // usd = 10 / 0.5; result = usd * 150
        let quote = conv.convert(&num("10"), "EUR", "JPY").unwrap();
        assert_eq!(quote.value, num("3000"));
        assert_eq!(quote.mode, RateMode::Live { fetched_at: snapshot.fetched_at() });
    }

    #[tokio::test]
    async fn test_recovers_from_degraded() {
        let conv = CurrencyConverter::new();
        let _ = conv.refresh(&down()).await;
        assert_eq!(conv.phase(), RatePhase::Degraded);

        conv.refresh(&StaticRateSource::new(live_rates())).await.unwrap();
        assert_eq!(conv.phase(), RatePhase::Ready);
        assert!(conv.last_error().is_none());
        // Placeholder-only codes are gone once live rates arrive
        assert!(conv.convert(&num("1"), "USD", "GBP").is_err());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot() {
        let conv = CurrencyConverter::new();
        let first = conv.refresh(&StaticRateSource::new(live_rates())).await.unwrap();
        assert!(conv.refresh(&down()).await.is_err());

        assert_eq!(conv.phase(), RatePhase::Ready);
        assert!(Arc::ptr_eq(&conv.snapshot().unwrap(), &first));
        assert_eq!(conv.convert(&num("1"), "USD", "EUR").unwrap().value, num("0.5"));
    }

    #[tokio::test]
    async fn test_unknown_code() {
        let conv = CurrencyConverter::new();
        conv.refresh(&StaticRateSource::new(live_rates())).await.unwrap();
        let err = conv.convert(&num("1"), "USD", "usd").unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit("Currency", "usd"));
        let err = conv.convert(&num("1"), "XYZ", "USD").unwrap_err();
        assert_eq!(err.code(), codes::UNKNOWN_UNIT);
    }

    #[test]
    fn test_stale_snapshot_falls_back() {
        let conv = CurrencyConverter::new().with_max_age(Duration::from_secs(3600));
        let old = Utc::now() - chrono::Duration::hours(2);
        conv.install(ExchangeRateSnapshot::from_rate_set(live_rates(), old).unwrap());

        assert_eq!(conv.phase(), RatePhase::Ready);
        assert_eq!(conv.mode(), RateMode::Fallback);
        let quote = conv.convert(&num("10"), "USD", "EUR").unwrap();
        assert_eq!(quote.value, num("10"));
        assert_eq!(quote.mode, RateMode::Fallback);
    }

    #[test]
    fn test_fresh_snapshot_is_live() {
        let conv = CurrencyConverter::new().with_max_age(Duration::from_secs(3600));
        conv.install(ExchangeRateSnapshot::from_rate_set(live_rates(), Utc::now()).unwrap());
        assert!(conv.mode().is_live());
        assert_eq!(conv.codes(), vec!["EUR", "JPY", "USD"]);
    }

    #[tokio::test]
    async fn test_spawn_refresh_signals_completion() {
        let conv = Arc::new(CurrencyConverter::new());
        let handle = conv.spawn_refresh(Arc::new(StaticRateSource::new(live_rates())));
        let result = handle.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(conv.phase(), RatePhase::Ready);
    }

    /// Never answers; signals once the fetch has started
    struct HangingSource {
        started: Arc<Notify>,
    }

    #[async_trait]
    impl RateSource for HangingSource {
        async fn fetch_rates(&self) -> Result<RateSet, RateFetchError> {
            self.started.notify_one();
            std::future::pending().await
        }

        fn describe(&self) -> String {
            "hanging".to_string()
        }
    }

    #[tokio::test]
    async fn test_cancelled_refresh_restores_phase() {
        let conv = Arc::new(CurrencyConverter::new());
        let started = Arc::new(Notify::new());
        let handle = conv.spawn_refresh(Arc::new(HangingSource { started: Arc::clone(&started) }));

        started.notified().await;
        assert_eq!(conv.phase(), RatePhase::Fetching);

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert_eq!(conv.phase(), RatePhase::Uninitialized);
        assert_eq!(conv.mode(), RateMode::Fallback);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_a_mixed_snapshot() {
        let cheap_yen = RateSet::new("USD")
            .with_rate("EUR", num("0.5"))
            .with_rate("JPY", num("150"));
        let dear_yen = RateSet::new("USD")
            .with_rate("EUR", num("0.25"))
            .with_rate("JPY", num("300"));
        let t_cheap = Utc::now() - chrono::Duration::minutes(1);
        let t_dear = Utc::now();

        let conv = Arc::new(CurrencyConverter::new());
        conv.install(ExchangeRateSnapshot::from_rate_set(cheap_yen.clone(), t_cheap).unwrap());

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let conv = Arc::clone(&conv);
                tokio::spawn(async move {
                    for _ in 0..500 {
                        // 10 EUR -> JPY is 3000 or 12000; anything else mixes two snapshots
                        let quote = conv.convert(&num("10"), "EUR", "JPY").unwrap();
                        let expected = match quote.mode {
                            RateMode::Live { fetched_at } if fetched_at == t_cheap => num("3000"),
                            RateMode::Live { fetched_at } if fetched_at == t_dear => num("12000"),
                            other => panic!("unexpected mode {:?}", other),
                        };
                        assert_eq!(quote.value, expected);
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        let writer = {
            let conv = Arc::clone(&conv);
            tokio::spawn(async move {
                for i in 0..500 {
                    let snapshot = if i % 2 == 0 {
                        ExchangeRateSnapshot::from_rate_set(dear_yen.clone(), t_dear)
                    } else {
                        ExchangeRateSnapshot::from_rate_set(cheap_yen.clone(), t_cheap)
                    };
                    conv.install(snapshot.unwrap());
                    tokio::task::yield_now().await;
                }
            })
        };

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
        assert_eq!(conv.phase(), RatePhase::Ready);
    }

    #[test]
    fn test_quote_serialization() {
        let quote = CurrencyQuote { value: num("12.5"), mode: RateMode::Fallback };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["value"], "12.5");
        assert_eq!(json["mode"], "fallback");
    }
}
