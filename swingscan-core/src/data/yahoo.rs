//! Yahoo Finance bar provider.
//!
//! Fetches OHLCV bars from Yahoo's v8 chart API with retry on connection
//! failures, exponential backoff on rate limits, and a shared circuit breaker.
//! Every request carries the timeout from its `HistoryRequest`; a timeout is
//! reported immediately rather than retried so a slow ticker cannot stall a
//! worker for more than one timeout.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{BarProvider, DataError, HistoryRequest};
use crate::domain::{PriceBar, PriceSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

pub struct YahooProvider {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new(circuit_breaker: Arc<CircuitBreaker>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            circuit_breaker,
            max_retries: 2,
            base_delay: Duration::from_millis(500),
        })
    }

    fn chart_url(request: &HistoryRequest) -> String {
        let start_ts = day_start_ts(request.start());
        let end_ts = day_start_ts(request.end) + 86_399;
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{}\
             ?period1={start_ts}&period2={end_ts}&interval={}",
            request.ticker,
            request.interval.as_str()
        )
    }

    fn parse_response(ticker: &str, resp: ChartResponse) -> Result<Vec<PriceBar>, DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: ticker.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: ticker.to_string(),
            })?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars: Vec<PriceBar> = Vec::with_capacity(timestamps.len());
        let mut dropped = 0usize;

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let field = |v: &Vec<Option<f64>>| v.get(i).copied().flatten();
            let (Some(open), Some(high), Some(low), Some(close)) = (
                field(&quote.open),
                field(&quote.high),
                field(&quote.low),
                field(&quote.close),
            ) else {
                // Holidays and suspended sessions come back as all-null rows.
                dropped += 1;
                continue;
            };
            let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);

            let bar = PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            };

            // During market hours the live bar can repeat the last session date.
            match bars.last_mut() {
                Some(last) if last.date == date => *last = bar,
                _ => bars.push(bar),
            }
        }

        if dropped > 0 {
            tracing::debug!(ticker, dropped, "dropped incomplete bars");
        }

        if bars.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: ticker.to_string(),
            });
        }

        Ok(bars)
    }

    fn fetch_with_retry(&self, request: &HistoryRequest) -> Result<Vec<PriceBar>, DataError> {
        let ticker = request.ticker.as_str();
        let url = Self::chart_url(request);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            let resp = match self.client.get(&url).timeout(request.timeout).send() {
                Ok(resp) => resp,
                Err(e) if e.is_timeout() => {
                    return Err(DataError::Timeout {
                        ticker: ticker.to_string(),
                        secs: request.timeout.as_secs(),
                    });
                }
                Err(e) if e.is_connect() => {
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                    continue;
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            };

            let status = resp.status();

            if status == reqwest::StatusCode::FORBIDDEN {
                self.circuit_breaker.trip();
                return Err(DataError::CircuitBreakerTripped);
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                self.circuit_breaker.record_failure();
                let retry_after = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                last_error = Some(DataError::RateLimited {
                    retry_after_secs: retry_after,
                });
                continue;
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(DataError::SymbolNotFound {
                    symbol: ticker.to_string(),
                });
            }

            if !status.is_success() {
                self.circuit_breaker.record_failure();
                last_error = Some(DataError::Other(format!("HTTP {status} for {ticker}")));
                continue;
            }

            let chart: ChartResponse = resp.json().map_err(|e| {
                DataError::ResponseFormatChanged(format!("failed to parse response for {ticker}: {e}"))
            })?;

            let bars = Self::parse_response(ticker, chart)?;
            self.circuit_breaker.record_success();
            return Ok(bars);
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

fn day_start_ts(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

impl BarProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, request: &HistoryRequest) -> Result<PriceSeries, DataError> {
        let bars = self.fetch_with_retry(request)?;
        Ok(PriceSeries::new(request.ticker.clone(), bars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Interval;

    fn parse(json: &str) -> Result<Vec<PriceBar>, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::parse_response("TEST.NS", resp)
    }

    #[test]
    fn parses_quotes_and_drops_null_rows() {
        let bars = parse(
            r#"{"chart":{"result":[{"timestamp":[1704153600,1704240000,1704326400],
            "indicators":{"quote":[{"open":[10.0,null,11.0],"high":[12.0,null,13.0],
            "low":[9.0,null,10.5],"close":[11.0,null,12.5],"volume":[100,null,200]}]}}],
            "error":null}}"#,
        )
        .unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].close, 12.5);
        assert_eq!(bars[1].volume, 200);
    }

    #[test]
    fn repeated_session_keeps_latest_bar() {
        let bars = parse(
            r#"{"chart":{"result":[{"timestamp":[1704153600,1704186000],
            "indicators":{"quote":[{"open":[10.0,10.0],"high":[12.0,12.5],
            "low":[9.0,9.0],"close":[11.0,12.0],"volume":[100,150]}]}}],"error":null}}"#,
        )
        .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 12.0);
    }

    #[test]
    fn not_found_error_maps_to_symbol_not_found() {
        let err = parse(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn chart_url_carries_interval_and_window() {
        let req = HistoryRequest {
            ticker: "TCS.NS".into(),
            lookback_days: 1,
            end: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            interval: Interval::Daily,
            timeout: Duration::from_secs(5),
        };
        let url = YahooProvider::chart_url(&req);
        assert!(url.contains("/chart/TCS.NS?"));
        assert!(url.contains("period1=1704067200"));
        assert!(url.contains("period2=1704239999"));
        assert!(url.ends_with("interval=1d"));
    }
}
