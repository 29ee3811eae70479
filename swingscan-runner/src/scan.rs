//! Scan orchestrator.
//!
//! Per ticker: FETCH → VALIDATE → COMPUTE_INDICATORS → COMPUTE_SIGNALS →
//! DERIVE_TRADE_PARAMS → SCORE → ACCEPT | REJECT. A failed fetch or a short
//! history skips the ticker; only a universe failure aborts the scan.
//!
//! Tickers run on a private rayon pool sized by `ScanConfig::max_workers`.
//! Outcomes are collected in universe order and ranked once, after every
//! ticker has finished, so the ranking never depends on completion order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::NaiveDate;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use swingscan_core::data::{BarProvider, DataError, HistoryRequest, UniverseProvider};
use swingscan_core::domain::PriceSeries;
use swingscan_core::indicators::IndicatorSnapshot;
use swingscan_core::scoring::{score, AltDataProvider, AltSignals, NoAltData, SignalSet};
use swingscan_core::round2;
use swingscan_core::sizing::lot_size;

use crate::alert::{Priority, RejectReason, SkipReason, TickerOutcome, TradeAlert};
use crate::config::{ConfigError, ScanConfig, Thresholds};
use crate::report::ScanReport;

/// Failures that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot load universe for index '{index}': {source}")]
    Universe {
        index: String,
        #[source]
        source: DataError,
    },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

static NO_ALT_DATA: NoAltData = NoAltData;

/// Runs scans against one immutable configuration and a set of providers.
pub struct Scanner<'a> {
    config: ScanConfig,
    universe: &'a dyn UniverseProvider,
    bars: &'a dyn BarProvider,
    alt_data: &'a dyn AltDataProvider,
}

impl<'a> Scanner<'a> {
    pub fn new(
        config: ScanConfig,
        universe: &'a dyn UniverseProvider,
        bars: &'a dyn BarProvider,
    ) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self {
            config,
            universe,
            bars,
            alt_data: &NO_ALT_DATA,
        })
    }

    pub fn with_alt_data(mut self, alt_data: &'a dyn AltDataProvider) -> Self {
        self.alt_data = alt_data;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan the configured index as of `as_of`.
    ///
    /// When `cancel` is set, no further tickers are started; tickers already
    /// in flight finish. The report is marked cancelled only if at least one
    /// ticker was left undispatched.
    pub fn run(
        &self,
        as_of: NaiveDate,
        cancel: Option<&AtomicBool>,
    ) -> Result<ScanReport, ScanError> {
        let started = Instant::now();
        let index = self.config.index.as_str();

        let mut tickers =
            self.universe
                .fetch_universe(index)
                .map_err(|source| ScanError::Universe {
                    index: index.to_string(),
                    source,
                })?;
        if let Some(max) = self.config.max_tickers {
            tickers.truncate(max);
        }

        info!(
            index,
            universe = self.universe.name(),
            bars = self.bars.name(),
            alt_data = self.alt_data.name(),
            tickers = tickers.len(),
            workers = self.config.max_workers,
            "starting scan"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.max_workers)
            .thread_name(|i| format!("swingscan-worker-{i}"))
            .build()
            .map_err(|e| ScanError::WorkerPool(e.to_string()))?;

        let outcomes: Vec<TickerOutcome> = pool.install(|| {
            tickers
                .par_iter()
                .map(|ticker| {
                    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                        return TickerOutcome::NotDispatched {
                            ticker: ticker.clone(),
                        };
                    }
                    self.process_ticker(ticker, as_of)
                })
                .collect()
        });

        // A flag raised after the last ticker started cancelled nothing.
        let cancelled = outcomes
            .iter()
            .any(|o| matches!(o, TickerOutcome::NotDispatched { .. }));
        let report = ScanReport::from_outcomes(
            &self.config,
            as_of,
            outcomes,
            cancelled,
            started.elapsed().as_secs_f64(),
        );

        info!(
            alerts = report.alerts.len(),
            rejected = report.rejected.len(),
            skipped = report.skipped.len(),
            not_dispatched = report.not_dispatched,
            cancelled,
            elapsed_secs = report.elapsed_secs,
            "scan complete"
        );

        Ok(report)
    }

    fn process_ticker(&self, ticker: &str, as_of: NaiveDate) -> TickerOutcome {
        let request = HistoryRequest {
            ticker: ticker.to_string(),
            lookback_days: self.config.lookback_days,
            end: as_of,
            interval: self.config.interval,
            timeout: self.config.fetch_timeout(),
        };

        let series = match self.bars.fetch(&request) {
            Ok(series) => series,
            Err(e) => {
                warn!(ticker, error = %e, "skipping ticker");
                return TickerOutcome::Skipped {
                    ticker: ticker.to_string(),
                    reason: e.into(),
                };
            }
        };

        let outcome = evaluate_series(&series, self.alt_data.signals(ticker), &self.config);
        match &outcome {
            TickerOutcome::Accepted(alert) => debug!(
                ticker,
                score = alert.score,
                risk_reward = alert.risk_reward,
                "accepted"
            ),
            TickerOutcome::Rejected { reason, .. } => debug!(ticker, %reason, "rejected"),
            TickerOutcome::Skipped { reason, .. } => warn!(ticker, %reason, "skipping ticker"),
            TickerOutcome::NotDispatched { .. } => {}
        }
        outcome
    }
}

/// Score one already-fetched series. Pure and deterministic: the same series,
/// alt signals and config always produce the same outcome.
pub fn evaluate_series(
    series: &PriceSeries,
    alt: AltSignals,
    config: &ScanConfig,
) -> TickerOutcome {
    let ticker = series.ticker().to_string();
    let params = &config.signals;

    if series.len() < params.min_bars {
        return TickerOutcome::Skipped {
            ticker,
            reason: SkipReason::InsufficientData {
                bars: series.len(),
                required: params.min_bars,
            },
        };
    }

    let snapshot = IndicatorSnapshot::compute(series, params);
    let signals = SignalSet::evaluate(&snapshot, params, alt);
    let card = score(&signals);
    let trade = config
        .trade
        .derive(snapshot.close, snapshot.volatility.unwrap_or(0.0));

    let lots = match lot_size(config.capital, snapshot.close) {
        Ok(lots) => lots,
        Err(e) => {
            return TickerOutcome::Skipped {
                ticker,
                reason: e.into(),
            }
        }
    };

    let thresholds = &config.thresholds;
    if let Err(reason) = check_acceptance(thresholds, card.score, trade.risk_reward, card.confidence)
    {
        return TickerOutcome::Rejected {
            ticker,
            score: card.score,
            confidence: card.confidence,
            risk_reward: trade.risk_reward,
            reason,
        };
    }

    TickerOutcome::Accepted(TradeAlert {
        ticker,
        entry: trade.entry,
        stop_loss: trade.stop_loss,
        target: trade.target,
        risk_reward: trade.risk_reward,
        score: card.score,
        confidence: card.confidence,
        priority: priority(thresholds, card.confidence, trade.risk_reward),
        lot_size: lots,
        holding_period: trade.holding_period,
        trigger: card.explanation,
    })
}

/// All three thresholds must hold; the first failure is reported.
///
/// Risk:reward is compared at two decimals, the precision it is quoted at,
/// so a 3:1.5 setup reads as 2.00 and not 1.9999999999999991.
pub fn check_acceptance(
    thresholds: &Thresholds,
    score: u8,
    risk_reward: f64,
    confidence: f64,
) -> Result<(), RejectReason> {
    if score < thresholds.score {
        return Err(RejectReason::ScoreBelow {
            score,
            min: thresholds.score,
        });
    }
    if round2(risk_reward) < thresholds.rr_min {
        return Err(RejectReason::RiskRewardBelow {
            risk_reward,
            min: thresholds.rr_min,
        });
    }
    if confidence < thresholds.confidence_min {
        return Err(RejectReason::ConfidenceBelow {
            confidence,
            min: thresholds.confidence_min,
        });
    }
    Ok(())
}

/// Priority of an accepted alert. Risk:reward is read at two decimals.
pub fn priority(thresholds: &Thresholds, confidence: f64, risk_reward: f64) -> Priority {
    if confidence >= thresholds.high_priority_confidence
        && round2(risk_reward) >= thresholds.high_priority_rr
    {
        Priority::High
    } else {
        Priority::Medium
    }
}

/// Confidence descending, then risk:reward descending. The sort is stable,
/// so equal keys keep their universe order.
pub fn rank_alerts(alerts: &mut [TradeAlert]) {
    alerts.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.risk_reward.total_cmp(&a.risk_reward))
    });
}
