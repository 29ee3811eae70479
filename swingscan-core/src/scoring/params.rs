//! Tunable windows and thresholds for the signal battery.

use serde::{Deserialize, Serialize};

/// Indicator windows and per-signal thresholds.
///
/// Defaults reproduce the classic daily setup: 14-bar RSI/ATR, 50/200 moving
/// averages, 20-bar breakout window, 2x volume spike, 70 overbought line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    pub rsi_period: usize,
    pub atr_period: usize,
    pub short_ma: usize,
    pub long_ma: usize,
    pub breakout_lookback: usize,
    pub volume_spike_multiple: f64,
    pub overbought_level: f64,
    /// Series shorter than this are skipped before any indicator runs.
    pub min_bars: usize,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            atr_period: 14,
            short_ma: 50,
            long_ma: 200,
            breakout_lookback: 20,
            volume_spike_multiple: 2.0,
            overbought_level: 70.0,
            min_bars: 30,
        }
    }
}
