//! Data provider traits and structured error types.
//!
//! `UniverseProvider` lists the tickers of an index; `BarProvider` returns the
//! price history of one ticker. Both abstract over the concrete source so the
//! scan can run against Yahoo/NSE, a static list, or synthetic data in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::domain::{PriceSeries, SeriesError, Ticker};

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request for {ticker} timed out after {secs}s")]
    Timeout { ticker: Ticker, secs: u64 },

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("invalid price series: {0}")]
    InvalidSeries(#[from] SeriesError),

    #[error("cannot read {}: {message}", path.display())]
    File { path: PathBuf, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Bar interval requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    Weekly,
}

impl Interval {
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
        }
    }
}

/// Everything a bar provider needs to fetch one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRequest {
    pub ticker: Ticker,
    /// Calendar days of history ending at `end`.
    pub lookback_days: u32,
    pub end: NaiveDate,
    pub interval: Interval,
    /// Upper bound on a single network round trip.
    pub timeout: Duration,
}

impl HistoryRequest {
    pub fn start(&self) -> NaiveDate {
        self.end - chrono::Duration::days(i64::from(self.lookback_days))
    }
}

/// Source of historical bars. Failures are per ticker and never fatal to a scan.
pub trait BarProvider: Send + Sync {
    fn name(&self) -> &str;

    fn fetch(&self, request: &HistoryRequest) -> Result<PriceSeries, DataError>;
}

/// Source of the ticker universe. Failure here aborts the scan.
pub trait UniverseProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Ordered tickers of `index`. Order is preserved into tie-breaking.
    fn fetch_universe(&self, index: &str) -> Result<Vec<Ticker>, DataError>;
}
