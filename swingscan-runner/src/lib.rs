//! SwingScan Runner: scan orchestration, acceptance policy, ranking, export.
//!
//! This crate builds on `swingscan-core` to provide:
//! - TOML scan configuration with validation and fingerprinting
//! - The scanner: a bounded rayon worker pool with cooperative cancellation
//! - Per-ticker outcomes (accepted, rejected, skipped, not dispatched)
//! - Ranked scan reports and alert sinks (console, CSV, JSON)

pub mod alert;
pub mod config;
pub mod export;
pub mod report;
pub mod scan;
pub mod sink;

pub use alert::{Priority, RejectReason, SkipReason, TickerOutcome, TradeAlert};
pub use config::{ConfigError, ScanConfig, Thresholds};
pub use export::{export_alerts_csv, export_json, import_json, load_json, save_alerts_csv, save_json};
pub use report::{RejectedTicker, ScanReport, SkippedTicker, SCHEMA_VERSION};
pub use scan::{check_acceptance, evaluate_series, priority, rank_alerts, ScanError, Scanner};
pub use sink::{AlertSink, ConsoleSink, CsvSink, JsonSink, NO_ALERTS_MESSAGE};
