//! Serializable scan configuration.
//!
//! A `ScanConfig` is built once at process start (defaults, then an optional
//! TOML file, then CLI overrides), validated, and handed to the `Scanner` by
//! value. Nothing mutates it during a scan, so two scanners with different
//! thresholds can run side by side.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use swingscan_core::data::Interval;
use swingscan_core::scoring::{SignalParams, MAX_SCORE};
use swingscan_core::trade::TradeRules;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Acceptance thresholds. A ticker must clear all three to produce an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum composite score (0–8).
    pub score: u8,
    /// Minimum risk:reward ratio.
    pub rr_min: f64,
    /// Minimum confidence percent.
    pub confidence_min: f64,
    /// Confidence at or above which an accepted alert is tagged high priority.
    pub high_priority_confidence: f64,
    /// Risk:reward a high-priority alert must also reach. Checked separately
    /// from `rr_min`, so lowering `rr_min` does not promote weaker setups.
    pub high_priority_rr: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            score: 5,
            rr_min: 2.0,
            confidence_min: 60.0,
            high_priority_confidence: 75.0,
            high_priority_rr: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Capital available per position, in account currency.
    pub capital: f64,
    /// Index whose constituents form the universe.
    pub index: String,
    /// Calendar days of history requested per ticker.
    pub lookback_days: u32,
    pub interval: Interval,
    /// Worker threads fetching and scoring tickers.
    pub max_workers: usize,
    /// Per-request timeout for every network fetch.
    pub fetch_timeout_secs: u64,
    /// Optional cap on universe size for quick runs. `None` scans everything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tickers: Option<usize>,
    pub thresholds: Thresholds,
    pub signals: SignalParams,
    pub trade: TradeRules,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            capital: 100_000.0,
            index: "NIFTY 500".to_string(),
            lookback_days: 180,
            interval: Interval::Daily,
            max_workers: 8,
            fetch_timeout_secs: 15,
            max_tickers: None,
            thresholds: Thresholds::default(),
            signals: SignalParams::default(),
            trade: TradeRules::default(),
        }
    }
}

impl ScanConfig {
    /// Load a TOML config file. Missing sections and fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Content hash of the configuration, reported with every scan.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !self.capital.is_finite() || self.capital < 0.0 {
            return invalid(format!("capital must be a non-negative number, got {}", self.capital));
        }
        if self.index.trim().is_empty() {
            return invalid("index name is empty".into());
        }
        if self.lookback_days == 0 {
            return invalid("lookback_days must be at least 1".into());
        }
        if self.max_workers == 0 {
            return invalid("max_workers must be at least 1".into());
        }
        if self.fetch_timeout_secs == 0 {
            return invalid("fetch_timeout_secs must be at least 1".into());
        }

        let t = &self.thresholds;
        if t.score > MAX_SCORE {
            return invalid(format!("thresholds.score {} exceeds the maximum of {MAX_SCORE}", t.score));
        }
        for (name, rr) in [("rr_min", t.rr_min), ("high_priority_rr", t.high_priority_rr)] {
            if !rr.is_finite() || rr < 0.0 {
                return invalid(format!("thresholds.{name} must be >= 0, got {rr}"));
            }
        }
        for (name, pct) in [
            ("confidence_min", t.confidence_min),
            ("high_priority_confidence", t.high_priority_confidence),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                return invalid(format!("thresholds.{name} must be within 0..=100, got {pct}"));
            }
        }

        let s = &self.signals;
        for (name, window) in [
            ("rsi_period", s.rsi_period),
            ("atr_period", s.atr_period),
            ("short_ma", s.short_ma),
            ("long_ma", s.long_ma),
            ("breakout_lookback", s.breakout_lookback),
        ] {
            if window == 0 {
                return invalid(format!("signals.{name} must be at least 1"));
            }
        }
        if s.min_bars < 2 {
            return invalid("signals.min_bars must be at least 2".into());
        }
        if !s.volume_spike_multiple.is_finite() || s.volume_spike_multiple < 0.0 {
            return invalid("signals.volume_spike_multiple must be >= 0".into());
        }

        let tr = &self.trade;
        if !tr.stop_multiple.is_finite()
            || !tr.target_multiple.is_finite()
            || !tr.short_hold_volatility_ratio.is_finite()
        {
            return invalid("trade multiples must be finite".into());
        }

        Ok(())
    }
}
