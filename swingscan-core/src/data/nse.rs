//! NSE index constituents provider.
//!
//! Reads the constituents of an NSE index (e.g. "NIFTY 500") from the
//! `equity-stockIndices` endpoint and appends the `.NS` exchange suffix so the
//! tickers can be fed straight to the Yahoo bar provider.

use serde::Deserialize;
use std::time::Duration;

use super::provider::{DataError, UniverseProvider};
use crate::domain::Ticker;

const NSE_INDEX_URL: &str = "https://www.nseindia.com/api/equity-stockIndices";

/// Exchange suffix Yahoo uses for NSE listings.
pub const NSE_SUFFIX: &str = ".NS";

#[derive(Debug, Deserialize)]
struct IndexResponse {
    data: Vec<IndexMember>,
}

#[derive(Debug, Deserialize)]
struct IndexMember {
    symbol: String,
}

pub struct NseIndexProvider {
    client: reqwest::blocking::Client,
}

impl NseIndexProvider {
    pub fn new(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn parse(index: &str, body: &str) -> Result<Vec<Ticker>, DataError> {
        let resp: IndexResponse = serde_json::from_str(body)
            .map_err(|e| DataError::ResponseFormatChanged(format!("NSE index response: {e}")))?;

        // The first row describes the index itself, not a constituent.
        let tickers: Vec<Ticker> = resp
            .data
            .into_iter()
            .filter(|m| !m.symbol.eq_ignore_ascii_case(index))
            .map(|m| format!("{}{NSE_SUFFIX}", m.symbol.trim()))
            .collect();

        if tickers.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: index.to_string(),
            });
        }
        Ok(tickers)
    }
}

impl UniverseProvider for NseIndexProvider {
    fn name(&self) -> &str {
        "nse"
    }

    fn fetch_universe(&self, index: &str) -> Result<Vec<Ticker>, DataError> {
        let resp = self
            .client
            .get(NSE_INDEX_URL)
            .query(&[("index", index)])
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DataError::Other(format!(
                "NSE refused the index request (HTTP {status})"
            )));
        }
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for index {index}")));
        }

        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        Self::parse(index, &body)
    }
}
