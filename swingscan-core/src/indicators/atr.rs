//! Volatility range (ATR-style).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! The volatility value is the simple rolling mean of TR over `period` bars.
//! TR[0] has no previous close and degrades to high-low.
//! Lookback: period - 1.

use super::{rolling_mean, Indicator};
use crate::domain::{PriceBar, PriceSeries};

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

/// Compute the True Range series from bars.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(bars: &[PriceBar]) -> Vec<f64> {
    let mut tr = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let range = bar.high - bar.low;
        if i == 0 {
            tr.push(range);
            continue;
        }
        let pc = bars[i - 1].close;
        tr.push(range.max((bar.high - pc).abs()).max((bar.low - pc).abs()));
    }

    tr
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let tr = true_range(bars);
        rolling_mean(&tr, self.period)
    }
}

/// Volatility range series for a validated price series.
pub fn volatility_range(series: &PriceSeries, period: usize) -> Vec<f64> {
    Atr::new(period).compute(series.bars())
}
