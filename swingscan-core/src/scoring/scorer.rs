//! Composite score, confidence and trigger explanation.

use serde::Serialize;

use super::signal::SignalSet;

/// Number of signals in the battery.
pub const MAX_SCORE: u8 = 8;

/// Explanation used when no signal fired.
pub const NO_SIGNAL: &str = "No strong signal";

/// Separator between labels in a trigger explanation.
pub const TRIGGER_SEPARATOR: &str = " + ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub score: u8,
    pub confidence: f64,
    pub explanation: String,
}

/// Score a signal set. Pure: the same set always yields the same card.
pub fn score(signals: &SignalSet) -> ScoreCard {
    let score = signals.count() as u8;
    ScoreCard {
        score,
        confidence: confidence_percentage(score, MAX_SCORE),
        explanation: explain(signals),
    }
}

/// Percentage of the maximum score, rounded to two decimals.
pub fn confidence_percentage(score: u8, max_score: u8) -> f64 {
    if max_score == 0 {
        return 0.0;
    }
    crate::round2(100.0 * f64::from(score) / f64::from(max_score))
}

pub fn explain(signals: &SignalSet) -> String {
    let labels: Vec<&str> = signals.active().map(|s| s.label()).collect();
    if labels.is_empty() {
        NO_SIGNAL.to_string()
    } else {
        labels.join(TRIGGER_SEPARATOR)
    }
}
