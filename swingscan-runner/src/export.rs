//! JSON and CSV export.
//!
//! The JSON report carries a `schema_version`; reports from a newer version
//! are rejected on load. The CSV is the alert table only, with prices and
//! ratios rounded to two decimals.

use std::path::Path;

use anyhow::{bail, Context, Result};
use swingscan_core::round2;

use crate::alert::TradeAlert;
use crate::report::{ScanReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(report: &ScanReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize ScanReport to JSON")
}

/// Deserialize a `ScanReport`, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ScanReport> {
    let report: ScanReport =
        serde_json::from_str(json).context("failed to deserialize ScanReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

pub fn save_json(report: &ScanReport, path: &Path) -> Result<()> {
    let json = export_json(report)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn load_json(path: &Path) -> Result<ScanReport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── CSV export ─────────────────────────────────────────────────────

pub const CSV_HEADER: [&str; 11] = [
    "ticker",
    "entry",
    "stop_loss",
    "target",
    "risk_reward",
    "score",
    "confidence",
    "priority",
    "lot_size",
    "holding_period",
    "trigger",
];

/// Alert table as CSV, one row per alert in the given order.
pub fn export_alerts_csv(alerts: &[TradeAlert]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    for a in alerts {
        wtr.write_record([
            a.ticker.as_str(),
            &format!("{:.2}", round2(a.entry)),
            &format!("{:.2}", round2(a.stop_loss)),
            &format!("{:.2}", round2(a.target)),
            &format!("{:.2}", round2(a.risk_reward)),
            &a.score.to_string(),
            &format!("{:.2}", round2(a.confidence)),
            a.priority.label(),
            &a.lot_size.to_string(),
            a.holding_period.label(),
            &a.trigger,
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

pub fn save_alerts_csv(alerts: &[TradeAlert], path: &Path) -> Result<()> {
    let csv = export_alerts_csv(alerts)?;
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::Priority;
    use chrono::NaiveDate;
    use swingscan_core::trade::HoldingPeriod;

    fn sample_alert() -> TradeAlert {
        TradeAlert {
            ticker: "TCS.NS".into(),
            entry: 3456.789,
            stop_loss: 3400.123,
            target: 3532.3333,
            risk_reward: 4.0 / 3.0,
            score: 5,
            confidence: 62.5,
            priority: Priority::Medium,
            lot_size: 28,
            holding_period: HoldingPeriod::Short,
            trigger: "Volume spike + Price breakout".into(),
        }
    }

    fn sample_report() -> ScanReport {
        ScanReport {
            schema_version: SCHEMA_VERSION,
            index: "NIFTY 50".into(),
            as_of: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            config_fingerprint: "abc123".into(),
            universe_size: 3,
            alerts: vec![sample_alert()],
            rejected: vec![],
            skipped: vec![],
            not_dispatched: 0,
            cancelled: false,
            elapsed_secs: 1.25,
        }
    }

    #[test]
    fn json_roundtrip() {
        let report = sample_report();
        let restored = import_json(&export_json(&report).unwrap()).unwrap();
        assert_eq!(report, restored);
    }

    #[test]
    fn json_rejects_unknown_version() {
        let mut report = sample_report();
        report.schema_version = SCHEMA_VERSION + 1;
        let json = serde_json::to_string(&report).unwrap();
        let err = import_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }

    #[test]
    fn csv_rounds_to_two_decimals() {
        let csv = export_alerts_csv(&[sample_alert()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with("TCS.NS,3456.79,3400.12,3532.33,1.33,5,62.50,Medium Priority,28,1-3 days,"));
        assert!(row.ends_with("Volume spike + Price breakout"));
    }

    #[test]
    fn csv_empty_alerts_is_header_only() {
        let csv = export_alerts_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn save_and_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();

        let json_path = dir.path().join("report.json");
        save_json(&report, &json_path).unwrap();
        assert_eq!(load_json(&json_path).unwrap(), report);

        let csv_path = dir.path().join("alerts.csv");
        save_alerts_csv(&report.alerts, &csv_path).unwrap();
        let content = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
