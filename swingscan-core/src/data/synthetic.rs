//! Synthetic bar provider for offline runs and demos.
//!
//! Produces a random walk per ticker, seeded from a blake3 hash of the ticker
//! so the same ticker always yields the same bars for the same window.

use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{BarProvider, DataError, HistoryRequest, Interval};
use crate::domain::{PriceBar, PriceSeries};

#[derive(Debug, Clone, Copy)]
pub struct SyntheticProvider {
    start_price: f64,
    daily_move: f64,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            daily_move: 0.03,
        }
    }
}

impl SyntheticProvider {
    pub fn new(start_price: f64, daily_move: f64) -> Self {
        Self {
            start_price,
            daily_move,
        }
    }

    pub fn generate(&self, request: &HistoryRequest) -> Vec<PriceBar> {
        let seed: [u8; 32] = *blake3::hash(request.ticker.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let step = match request.interval {
            Interval::Daily => chrono::Duration::days(1),
            Interval::Weekly => chrono::Duration::days(7),
        };

        let mut bars = Vec::new();
        let mut price = self.start_price;
        let mut current = request.start();

        while current <= request.end {
            let weekday = current.weekday();
            if weekday == chrono::Weekday::Sat || weekday == chrono::Weekday::Sun {
                current += chrono::Duration::days(1);
                continue;
            }

            let change: f64 = rng.gen_range(-self.daily_move..self.daily_move);
            let open = price;
            let close = (price * (1.0 + change)).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let mut volume = rng.gen_range(500_000..5_000_000u64);
            if rng.gen_bool(0.05) {
                volume *= 3;
            }

            bars.push(PriceBar {
                date: current,
                open,
                high,
                low,
                close,
                volume,
            });

            price = close;
            current += step;
        }

        bars
    }
}

impl BarProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, request: &HistoryRequest) -> Result<PriceSeries, DataError> {
        Ok(PriceSeries::new(request.ticker.clone(), self.generate(request))?)
    }
}
