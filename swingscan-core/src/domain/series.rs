//! PriceSeries: the validated, chronologically ordered history of one ticker.

use super::bar::PriceBar;
use super::Ticker;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Reasons a raw bar list cannot become a `PriceSeries`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("empty price series for {ticker}")]
    Empty { ticker: Ticker },

    #[error("{ticker}: dates not strictly increasing at {date}")]
    OutOfOrder { ticker: Ticker, date: NaiveDate },

    #[error("{ticker}: malformed bar on {date}")]
    MalformedBar { ticker: Ticker, date: NaiveDate },
}

/// Ordered bars for a single ticker over the lookback window.
///
/// Construction enforces strictly increasing dates and OHLC sanity on every
/// bar, so indicator code never has to re-check either.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    ticker: Ticker,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<Ticker>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        let ticker = ticker.into();
        if bars.is_empty() {
            return Err(SeriesError::Empty { ticker });
        }

        for (i, bar) in bars.iter().enumerate() {
            if !bar.is_sane() {
                return Err(SeriesError::MalformedBar {
                    ticker,
                    date: bar.date,
                });
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(SeriesError::OutOfOrder {
                    ticker,
                    date: bar.date,
                });
            }
        }

        Ok(Self { ticker, bars })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar. A constructed series is never empty.
    pub fn latest(&self) -> &PriceBar {
        &self.bars[self.bars.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn accepts_ordered_bars() {
        let series = PriceSeries::new("INFY.NS", vec![bar(1, 10.0), bar(2, 11.0)]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.ticker(), "INFY.NS");
        assert_eq!(series.latest().close, 11.0);
        assert_eq!(series.closes(), vec![10.0, 11.0]);
    }

    #[test]
    fn rejects_empty() {
        let err = PriceSeries::new("X", vec![]).unwrap_err();
        assert!(matches!(err, SeriesError::Empty { .. }));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = PriceSeries::new("X", vec![bar(1, 10.0), bar(1, 11.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_descending_dates() {
        let err = PriceSeries::new("X", vec![bar(2, 10.0), bar(1, 11.0)]).unwrap_err();
        assert!(matches!(err, SeriesError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_malformed_bar() {
        let mut bad = bar(2, 11.0);
        bad.low = 20.0;
        let err = PriceSeries::new("X", vec![bar(1, 10.0), bad]).unwrap_err();
        assert!(matches!(err, SeriesError::MalformedBar { .. }));
    }
}
