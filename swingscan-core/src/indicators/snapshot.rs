//! IndicatorSnapshot: latest-period indicator values for one ticker.

use serde::Serialize;

use super::{latest_defined, Atr, Indicator, Rsi, Sma};
use crate::domain::PriceSeries;
use crate::scoring::SignalParams;

/// Latest values the signal battery reads. Undefined (warmup) values are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub momentum: Option<f64>,
    pub volatility: Option<f64>,
    /// Mean of the defined volatility values before the latest bar.
    pub prior_volatility_mean: Option<f64>,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub volume: u64,
    /// Mean volume over every bar except the latest.
    pub avg_volume: Option<f64>,
    /// Highest close over the breakout lookback, latest bar excluded.
    pub recent_high: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn compute(series: &PriceSeries, params: &SignalParams) -> Self {
        let bars = series.bars();
        let latest = series.latest();
        let n = bars.len();
        let prior = &bars[..n - 1];

        let momentum = latest_defined(&Rsi::new(params.rsi_period).compute(bars));

        let atr = Atr::new(params.atr_period).compute(bars);
        let volatility = latest_defined(&atr);
        let prior_volatility_mean = mean(atr[..n - 1].iter().copied().filter(|v| v.is_finite()));

        let short_ma = latest_defined(&Sma::new(params.short_ma).compute(bars));
        let long_ma = latest_defined(&Sma::new(params.long_ma).compute(bars));

        let avg_volume = mean(prior.iter().map(|b| b.volume as f64));

        let window_start = prior.len().saturating_sub(params.breakout_lookback);
        let recent_high = prior[window_start..]
            .iter()
            .map(|b| b.close)
            .reduce(f64::max);

        Self {
            close: latest.close,
            momentum,
            volatility,
            prior_volatility_mean,
            short_ma,
            long_ma,
            volume: latest.volume,
            avg_volume,
            recent_high,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}
