//! Momentum oscillator (RSI-style).
//!
//! Gains and losses between consecutive closes are averaged with a simple
//! trailing mean over `period` changes.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (bar `period` is the first with `period` prior changes).
//! Edge case: avg_loss == 0 → ratio is +inf → RSI = 100, flat windows included.

use super::Indicator;
use crate::domain::{PriceBar, PriceSeries};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let change = bars[i].close - bars[i - 1].close;
            if change > 0.0 {
                gains[i] = change;
            } else {
                losses[i] = -change;
            }
        }

        let mut gain_sum: f64 = gains[1..=self.period].iter().sum();
        let mut loss_sum: f64 = losses[1..=self.period].iter().sum();
        result[self.period] = oscillator(gain_sum, loss_sum);

        for i in (self.period + 1)..n {
            gain_sum += gains[i] - gains[i - self.period];
            loss_sum += losses[i] - losses[i - self.period];
            result[i] = oscillator(gain_sum.max(0.0), loss_sum.max(0.0));
        }

        result
    }
}

/// The period divides out of the ratio, so window sums are used directly.
fn oscillator(gain_sum: f64, loss_sum: f64) -> f64 {
    if loss_sum <= f64::EPSILON {
        return 100.0;
    }
    let ratio = gain_sum / loss_sum;
    (100.0 - 100.0 / (1.0 + ratio)).clamp(0.0, 100.0)
}

/// Momentum oscillator series for a validated price series.
pub fn momentum_oscillator(series: &PriceSeries, period: usize) -> Vec<f64> {
    Rsi::new(period).compute(series.bars())
}
