//! SwingScan CLI: scan an index and print ranked swing-trade alerts.
//!
//! Commands:
//! - `scan`: fetch the universe, score every ticker, print and export alerts
//! - `init-config`: write a default TOML config to edit

mod logging;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use swingscan_core::data::{
    BarProvider, CircuitBreaker, NseIndexProvider, StaticUniverse, SyntheticProvider,
    UniverseProvider, YahooProvider,
};
use swingscan_core::scoring::StaticAltData;
use swingscan_runner::{AlertSink, ConsoleSink, CsvSink, JsonSink, ScanConfig, Scanner};

use logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "swingscan",
    version,
    about = "SwingScan, a rule-based swing-trade scanner for index constituents"
)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an index universe and report actionable setups.
    Scan(ScanArgs),
    /// Write the default configuration as TOML.
    InitConfig {
        /// Output path. Prints to stdout when omitted.
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Index to scan (e.g. "NIFTY 500").
    #[arg(long)]
    index: Option<String>,

    /// Scan these tickers instead of an index universe.
    #[arg(long, num_args = 1..)]
    tickers: Vec<String>,

    /// TOML file listing index constituents.
    #[arg(long, conflicts_with = "tickers")]
    universe_file: Option<PathBuf>,

    /// Offline mode: synthetic bars, built-in sample universe unless tickers are given.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// TOML file with delivery / institutional / sector flags per ticker.
    #[arg(long)]
    alt_data: Option<PathBuf>,

    /// Capital per position.
    #[arg(long)]
    capital: Option<f64>,

    /// Worker threads.
    #[arg(long)]
    workers: Option<usize>,

    /// Scan only the first N tickers of the universe.
    #[arg(long)]
    max_tickers: Option<usize>,

    /// Stop dispatching new tickers after this many seconds.
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Last date of the history window (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<String>,

    /// Write the alert table as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the full report as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(logging::level_for(cli.verbose, cli.quiet), cli.log_format);

    match cli.command {
        Commands::Scan(args) => run_scan(args),
        Commands::InitConfig { path, force } => run_init_config(path.as_deref(), force),
    }
}

fn load_config(args: &ScanArgs) -> Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::from_file(path)?,
        None => ScanConfig::default(),
    };

    if let Some(index) = &args.index {
        config.index = index.clone();
    }
    if let Some(capital) = args.capital {
        config.capital = capital;
    }
    if let Some(workers) = args.workers {
        config.max_workers = workers;
    }
    if args.max_tickers.is_some() {
        config.max_tickers = args.max_tickers;
    }

    config.validate()?;
    Ok(config)
}

fn build_universe(args: &ScanArgs, config: &ScanConfig) -> Result<Box<dyn UniverseProvider>> {
    if !args.tickers.is_empty() {
        return Ok(Box::new(StaticUniverse::from_tickers(args.tickers.clone())));
    }
    if let Some(path) = &args.universe_file {
        return Ok(Box::new(StaticUniverse::from_file(path)?));
    }
    if args.synthetic {
        let sample = StaticUniverse::nifty_sample().fetch_universe("NIFTY 50")?;
        return Ok(Box::new(StaticUniverse::from_tickers(sample)));
    }
    Ok(Box::new(NseIndexProvider::new(config.fetch_timeout())?))
}

fn build_bars(args: &ScanArgs) -> Result<Box<dyn BarProvider>> {
    if args.synthetic {
        return Ok(Box::new(SyntheticProvider::default()));
    }
    let circuit_breaker = Arc::new(CircuitBreaker::default_provider());
    Ok(Box::new(YahooProvider::new(circuit_breaker)?))
}

/// Flip `cancel` once `secs` have elapsed. The thread dies with the process.
fn spawn_deadline(cancel: Arc<AtomicBool>, secs: u64) {
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_secs(secs));
        if !cancel.swap(true, Ordering::SeqCst) {
            warn!(deadline_secs = secs, "deadline reached, no new tickers will start");
        }
    });
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let config = load_config(&args)?;

    let as_of = match args.as_of.as_deref() {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --as-of date '{s}'"))?,
        None => chrono::Local::now().date_naive(),
    };

    let universe = build_universe(&args, &config)?;
    let bars = build_bars(&args)?;
    let alt_data = args
        .alt_data
        .as_deref()
        .map(StaticAltData::from_file)
        .transpose()?;

    info!(fingerprint = %config.fingerprint(), %as_of, "configuration loaded");

    let cancel = Arc::new(AtomicBool::new(false));
    if let Some(secs) = args.deadline_secs {
        spawn_deadline(Arc::clone(&cancel), secs);
    }

    let mut scanner = Scanner::new(config, universe.as_ref(), bars.as_ref())?;
    if let Some(alt) = &alt_data {
        scanner = scanner.with_alt_data(alt);
    }
    let report = scanner.run(as_of, Some(cancel.as_ref()))?;

    let mut sinks: Vec<Box<dyn AlertSink>> = vec![Box::new(ConsoleSink::stdout())];
    if let Some(path) = args.csv {
        sinks.push(Box::new(CsvSink::new(path)));
    }
    if let Some(path) = args.json {
        sinks.push(Box::new(JsonSink::new(path)));
    }
    for sink in &mut sinks {
        sink.emit(&report)
            .with_context(|| format!("{} sink failed", sink.name()))?;
    }

    Ok(())
}

fn run_init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let toml = ScanConfig::default().to_toml()?;
    match path {
        None => print!("{toml}"),
        Some(path) => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            std::fs::write(path, toml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
