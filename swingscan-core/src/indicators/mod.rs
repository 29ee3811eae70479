//! Indicator library.
//!
//! Indicators are pure functions: bar history in, numeric series out. Every
//! output series has the same length as its input, with `f64::NAN` in the
//! warmup positions. Callers must check the latest value is defined before
//! using it.

pub mod atr;
pub mod rsi;
pub mod sma;
pub mod snapshot;

pub use atr::{true_range, volatility_range, Atr};
pub use rsi::{momentum_oscillator, Rsi};
pub use sma::{simple_moving_average, Sma};
pub use snapshot::IndicatorSnapshot;

use crate::domain::PriceBar;

/// Trait for indicators.
///
/// # Look-ahead guard
/// No value at bar t may depend on data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50", "atr_14").
    fn name(&self) -> &str;

    /// Index of the first bar that can carry a defined value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;
}

/// Latest value of a series, or `None` if it is still in warmup.
pub fn latest_defined(values: &[f64]) -> Option<f64> {
    values.last().copied().filter(|v| v.is_finite())
}

/// Simple rolling mean; NaN until `window` values exist.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 || n < window {
        return result;
    }

    // Sum each window directly: a running sum drifts and the windows are short.
    for (i, slot) in result.iter_mut().enumerate().skip(window - 1) {
        let sum: f64 = values[(i + 1 - window)..=i].iter().sum();
        *slot = sum / window as f64;
    }

    result
}

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
