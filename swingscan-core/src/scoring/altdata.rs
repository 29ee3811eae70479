//! Alternative-data signals: delivery strength, institutional flow, sector sentiment.
//!
//! No source for these is known, so they are always injected. The engine never
//! invents them; a ticker without data gets `AltSignals::default()` (all false).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::data::DataError;

/// The three externally sourced signal values for one ticker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltSignals {
    pub delivery_strength: bool,
    pub institutional_flow: bool,
    pub sector_sentiment: bool,
}

/// Source of alternative-data signals. Must be deterministic per ticker.
pub trait AltDataProvider: Send + Sync {
    fn name(&self) -> &str;

    fn signals(&self, ticker: &str) -> AltSignals;
}

/// Default provider: unknown means false.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAltData;

impl AltDataProvider for NoAltData {
    fn name(&self) -> &str {
        "none"
    }

    fn signals(&self, _ticker: &str) -> AltSignals {
        AltSignals::default()
    }
}

/// Fixed per-ticker flags, typically loaded from a TOML file:
///
/// ```toml
/// [tickers."RELIANCE.NS"]
/// delivery_strength = true
/// sector_sentiment = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticAltData {
    #[serde(default)]
    tickers: BTreeMap<String, AltSignals>,
}

impl StaticAltData {
    pub fn new(tickers: BTreeMap<String, AltSignals>) -> Self {
        Self { tickers }
    }

    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|e| DataError::File {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, DataError> {
        toml::from_str(content).map_err(|e| DataError::Parse(format!("alt-data TOML: {e}")))
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

impl AltDataProvider for StaticAltData {
    fn name(&self) -> &str {
        "static"
    }

    fn signals(&self, ticker: &str) -> AltSignals {
        self.tickers.get(ticker).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_alt_data_is_all_false() {
        assert_eq!(NoAltData.signals("TCS.NS"), AltSignals::default());
    }

    #[test]
    fn static_alt_data_from_toml() {
        let data = StaticAltData::from_toml(
            r#"
            [tickers."RELIANCE.NS"]
            delivery_strength = true
            sector_sentiment = true

            [tickers."TCS.NS"]
            institutional_flow = true
            "#,
        )
        .unwrap();

        assert_eq!(data.len(), 2);
        let rel = data.signals("RELIANCE.NS");
        assert!(rel.delivery_strength);
        assert!(!rel.institutional_flow);
        assert!(rel.sector_sentiment);
        assert!(data.signals("TCS.NS").institutional_flow);
        assert_eq!(data.signals("INFY.NS"), AltSignals::default());
    }

    #[test]
    fn static_alt_data_rejects_bad_toml() {
        let err = StaticAltData::from_toml("[tickers.X]\ndelivery_strength = 3").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }
}
