//! Alert sinks: where a finished scan report goes.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use swingscan_core::round2;

use crate::export::{save_alerts_csv, save_json};
use crate::report::ScanReport;

pub const NO_ALERTS_MESSAGE: &str = "No actionable stocks found at this moment.";

/// Consumes a ranked scan report.
pub trait AlertSink {
    fn name(&self) -> &str;
    fn emit(&mut self, report: &ScanReport) -> Result<()>;
}

/// Human-readable table followed by one "Why:" line per alert.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AlertSink for ConsoleSink<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn emit(&mut self, report: &ScanReport) -> Result<()> {
        let out = &mut self.out;
        writeln!(
            out,
            "{} as of {}: {} tickers, {} evaluated, {} skipped{}",
            report.index,
            report.as_of,
            report.universe_size,
            report.evaluated(),
            report.skipped.len(),
            if report.cancelled {
                format!(", cancelled ({} not started)", report.not_dispatched)
            } else {
                String::new()
            }
        )?;

        if report.alerts.is_empty() {
            writeln!(out, "{NO_ALERTS_MESSAGE}")?;
            return Ok(());
        }

        writeln!(
            out,
            "{:<16} {:>10} {:>10} {:>10} {:>6} {:>5} {:>7} {:>6} {:<9} {}",
            "Ticker", "Entry", "Stop", "Target", "R:R", "Score", "Conf%", "Lots", "Hold", "Priority"
        )?;
        for a in &report.alerts {
            writeln!(
                out,
                "{:<16} {:>10.2} {:>10.2} {:>10.2} {:>6.2} {:>5} {:>7.2} {:>6} {:<9} {}",
                a.ticker,
                round2(a.entry),
                round2(a.stop_loss),
                round2(a.target),
                round2(a.risk_reward),
                a.score,
                round2(a.confidence),
                a.lot_size,
                a.holding_period.label(),
                a.priority,
            )?;
        }

        writeln!(out)?;
        for a in &report.alerts {
            writeln!(
                out,
                "{} | Buy {:.2} | Target {:.2} | {}",
                a.ticker,
                round2(a.entry),
                round2(a.target),
                a.priority
            )?;
            writeln!(out, "  Why: {}", a.trigger)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Writes the alert table to a CSV file.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AlertSink for CsvSink {
    fn name(&self) -> &str {
        "csv"
    }

    fn emit(&mut self, report: &ScanReport) -> Result<()> {
        save_alerts_csv(&report.alerts, &self.path)?;
        tracing::info!(path = %self.path.display(), alerts = report.alerts.len(), "wrote CSV");
        Ok(())
    }
}

/// Writes the full report as JSON.
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AlertSink for JsonSink {
    fn name(&self) -> &str {
        "json"
    }

    fn emit(&mut self, report: &ScanReport) -> Result<()> {
        save_json(report, &self.path)?;
        tracing::info!(path = %self.path.display(), "wrote JSON report");
        Ok(())
    }
}
