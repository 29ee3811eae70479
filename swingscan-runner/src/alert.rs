//! Trade alerts and per-ticker outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use swingscan_core::data::DataError;
use swingscan_core::domain::Ticker;
use swingscan_core::sizing::SizingError;
use swingscan_core::trade::HoldingPeriod;

/// Urgency tag applied to accepted alerts only. There is no low tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High Priority",
            Priority::Medium => "Medium Priority",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One actionable recommendation. Prices and ratios are full precision;
/// sinks round them for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAlert {
    pub ticker: Ticker,
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub risk_reward: f64,
    pub score: u8,
    pub confidence: f64,
    pub priority: Priority,
    pub lot_size: u64,
    pub holding_period: HoldingPeriod,
    pub trigger: String,
}

/// Which acceptance threshold a scored ticker failed first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    ScoreBelow { score: u8, min: u8 },
    RiskRewardBelow { risk_reward: f64, min: f64 },
    ConfidenceBelow { confidence: f64, min: f64 },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::ScoreBelow { score, min } => write!(f, "score {score} < {min}"),
            RejectReason::RiskRewardBelow { risk_reward, min } => {
                write!(f, "risk:reward {risk_reward:.2} < {min}")
            }
            RejectReason::ConfidenceBelow { confidence, min } => {
                write!(f, "confidence {confidence:.2}% < {min}%")
            }
        }
    }
}

/// Why a ticker never reached scoring.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("fetch failed: {0}")]
    Fetch(#[from] DataError),

    #[error("insufficient history: {bars} bars, need {required}")]
    InsufficientData { bars: usize, required: usize },

    #[error("cannot size position: {0}")]
    Sizing(#[from] SizingError),
}

/// Result of processing one ticker.
#[derive(Debug)]
pub enum TickerOutcome {
    Accepted(TradeAlert),
    Rejected {
        ticker: Ticker,
        score: u8,
        confidence: f64,
        risk_reward: f64,
        reason: RejectReason,
    },
    Skipped {
        ticker: Ticker,
        reason: SkipReason,
    },
    /// Cancellation arrived before the ticker was started.
    NotDispatched { ticker: Ticker },
}

impl TickerOutcome {
    pub fn ticker(&self) -> &str {
        match self {
            TickerOutcome::Accepted(alert) => &alert.ticker,
            TickerOutcome::Rejected { ticker, .. }
            | TickerOutcome::Skipped { ticker, .. }
            | TickerOutcome::NotDispatched { ticker } => ticker,
        }
    }

    pub fn alert(&self) -> Option<&TradeAlert> {
        match self {
            TickerOutcome::Accepted(alert) => Some(alert),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TickerOutcome::Skipped { .. })
    }
}
