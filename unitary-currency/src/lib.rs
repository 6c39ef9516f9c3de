//! Unitary Currency - Live-rate currency conversion
//!
//! Currency is the one category whose table changes at runtime. Rates come
//! from a [`RateSource`] as an immutable [`ExchangeRateSnapshot`], and the
//! [`CurrencyConverter`] swaps snapshots whole. Conversion pivots through
//! USD with the same algorithm as every other category.
//!
//! When no snapshot is available the converter keeps answering from a
//! placeholder table of common currencies (all rates 1) and marks every
//! result as [`RateMode::Fallback`].

mod converter;
mod http;
mod snapshot;
mod source;
pub mod wire;

pub use converter::{CurrencyConverter, CurrencyQuote, RateMode, RatePhase};
pub use http::HttpRateSource;
pub use snapshot::{ExchangeRate, ExchangeRateSnapshot, RateSet};
pub use source::{FileRateSource, RateFetchError, RateSource, StaticRateSource};
