//! Scan report: ranked alerts plus an account of every other ticker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use swingscan_core::domain::Ticker;

use crate::alert::{TickerOutcome, TradeAlert};
use crate::config::ScanConfig;
use crate::scan::rank_alerts;

/// Bumped whenever a persisted report field changes meaning.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedTicker {
    pub ticker: Ticker,
    pub score: u8,
    pub confidence: f64,
    pub risk_reward: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTicker {
    pub ticker: Ticker,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub schema_version: u32,
    pub index: String,
    pub as_of: NaiveDate,
    pub config_fingerprint: String,
    /// Tickers in the universe after any `max_tickers` cap.
    pub universe_size: usize,
    /// Accepted alerts, best first.
    pub alerts: Vec<TradeAlert>,
    pub rejected: Vec<RejectedTicker>,
    pub skipped: Vec<SkippedTicker>,
    /// Tickers never started because the scan was cancelled.
    pub not_dispatched: usize,
    pub cancelled: bool,
    pub elapsed_secs: f64,
}

impl ScanReport {
    /// Partition outcomes (in universe order) and rank the accepted alerts.
    pub fn from_outcomes(
        config: &ScanConfig,
        as_of: NaiveDate,
        outcomes: Vec<TickerOutcome>,
        cancelled: bool,
        elapsed_secs: f64,
    ) -> Self {
        let universe_size = outcomes.len();
        let mut alerts = Vec::new();
        let mut rejected = Vec::new();
        let mut skipped = Vec::new();
        let mut not_dispatched = 0;

        for outcome in outcomes {
            match outcome {
                TickerOutcome::Accepted(alert) => alerts.push(alert),
                TickerOutcome::Rejected {
                    ticker,
                    score,
                    confidence,
                    risk_reward,
                    reason,
                } => rejected.push(RejectedTicker {
                    ticker,
                    score,
                    confidence,
                    risk_reward,
                    reason: reason.to_string(),
                }),
                TickerOutcome::Skipped { ticker, reason } => skipped.push(SkippedTicker {
                    ticker,
                    reason: reason.to_string(),
                }),
                TickerOutcome::NotDispatched { .. } => not_dispatched += 1,
            }
        }

        rank_alerts(&mut alerts);

        Self {
            schema_version: SCHEMA_VERSION,
            index: config.index.clone(),
            as_of,
            config_fingerprint: config.fingerprint(),
            universe_size,
            alerts,
            rejected,
            skipped,
            not_dispatched,
            cancelled,
            elapsed_secs,
        }
    }

    /// Tickers that were fetched and scored.
    pub fn evaluated(&self) -> usize {
        self.alerts.len() + self.rejected.len()
    }
}
