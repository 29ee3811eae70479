//! Static universes: ticker lists from a TOML file or the command line.
//!
//! ```toml
//! [indices]
//! "NIFTY 50" = ["RELIANCE.NS", "TCS.NS", "HDFCBANK.NS"]
//! ```
//!
//! Ticker order within an index is preserved; it is the final tie-breaker
//! when ranking alerts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::provider::{DataError, UniverseProvider};
use crate::domain::Ticker;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticUniverse {
    #[serde(default)]
    indices: BTreeMap<String, Vec<Ticker>>,
    /// Served for any index name not listed in `indices`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fallback: Option<Vec<Ticker>>,
}

impl StaticUniverse {
    /// A universe that answers every index with `tickers`.
    pub fn from_tickers(tickers: Vec<Ticker>) -> Self {
        Self {
            indices: BTreeMap::new(),
            fallback: Some(tickers),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|e| DataError::File {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, DataError> {
        toml::from_str(content).map_err(|e| DataError::Parse(format!("universe TOML: {e}")))
    }

    pub fn to_toml(&self) -> Result<String, DataError> {
        toml::to_string_pretty(self).map_err(|e| DataError::Parse(format!("serialize universe: {e}")))
    }

    pub fn index_names(&self) -> Vec<&str> {
        self.indices.keys().map(|s| s.as_str()).collect()
    }

    /// A handful of NIFTY 50 heavyweights for offline runs.
    pub fn nifty_sample() -> Self {
        let tickers = [
            "RELIANCE", "TCS", "HDFCBANK", "INFY", "ICICIBANK", "HINDUNILVR", "ITC", "SBIN",
            "BHARTIARTL", "KOTAKBANK", "LT", "AXISBANK", "ASIANPAINT", "MARUTI", "TITAN",
        ]
        .into_iter()
        .map(|s| format!("{s}{}", super::nse::NSE_SUFFIX))
        .collect();

        let mut indices = BTreeMap::new();
        indices.insert("NIFTY 50".to_string(), tickers);
        Self {
            indices,
            fallback: None,
        }
    }
}

impl UniverseProvider for StaticUniverse {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_universe(&self, index: &str) -> Result<Vec<Ticker>, DataError> {
        self.indices
            .get(index)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: index.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_list_answers_any_index() {
        let u = StaticUniverse::from_tickers(vec!["B.NS".into(), "A.NS".into()]);
        assert_eq!(u.fetch_universe("ANYTHING").unwrap(), vec!["B.NS", "A.NS"]);
    }

    #[test]
    fn toml_preserves_order() {
        let u = StaticUniverse::from_toml(
            r#"
            [indices]
            "NIFTY 50" = ["TCS.NS", "INFY.NS", "ABB.NS"]
            "#,
        )
        .unwrap();
        assert_eq!(
            u.fetch_universe("NIFTY 50").unwrap(),
            vec!["TCS.NS", "INFY.NS", "ABB.NS"]
        );
    }

    #[test]
    fn unknown_index_is_an_error() {
        let err = StaticUniverse::nifty_sample()
            .fetch_universe("NIFTY BANK")
            .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn toml_roundtrip() {
        let u = StaticUniverse::nifty_sample();
        let parsed = StaticUniverse::from_toml(&u.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.index_names(), vec!["NIFTY 50"]);
        assert_eq!(
            parsed.fetch_universe("NIFTY 50").unwrap().len(),
            u.fetch_universe("NIFTY 50").unwrap().len()
        );
    }
}
