//! CLI argument definitions for pricetrail.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `update` | Ingest the current-price snapshot into the histories |
//! | `stats` | Summarize stored histories per resolution |
//! | `chart` | Export chart documents for one item |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--data-dir` | `$PRICETRAIL_HOME` or `~/.pricetrail` | Data directory |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--verbose` | `false` | Default log level `debug` instead of `info` |
//!
//! # Examples
//!
//! ```bash
//! pricetrail update
//! pricetrail --data-dir ./data update --snapshot ./data/equipment_prices.json
//! pricetrail stats --pretty
//! pricetrail chart 1002140 --resolution 1day --output ./web/1002140.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pricetrail_core::Resolution;

/// Multi-resolution item price history tracker.
///
/// Keeps hourly (1 week), 12-hourly (1 month) and daily (1 year) price
/// histories per item, fed from periodic current-price snapshots.
#[derive(Debug, Parser)]
#[command(name = "pricetrail", author, version, about = "Multi-resolution item price history tracker")]
pub struct Cli {
    /// Data directory holding the snapshot and the `price_history` archive
    /// (default: `$PRICETRAIL_HOME`, else `~/.pricetrail`).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingest the current-price snapshot.
    ///
    /// Each resolution only accepts a new point once its own period has
    /// elapsed, so running this more often than hourly is harmless.
    Update(UpdateArgs),

    /// Show per-resolution history statistics.
    Stats,

    /// Export chart documents for one item.
    ///
    /// Without --resolution every resolution that has data is exported to
    /// the archive directory as `{item}_{resolution}.json`.
    Chart(ChartArgs),
}

/// Arguments for the `update` command.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Snapshot file (default: `<data-dir>/equipment_prices.json`).
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Currency token stripped from price strings.
    #[arg(long, default_value = "NESO")]
    pub currency_suffix: String,
}

/// Arguments for the `chart` command.
#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Item identifier as keyed in the snapshot.
    pub item: String,

    /// Resolution to export: 1hour, 12hour or 1day (aliases 1h, 12h, 1d).
    #[arg(long)]
    pub resolution: Option<Resolution>,

    /// Output file; requires --resolution.
    #[arg(long, requires = "resolution")]
    pub output: Option<PathBuf>,
}
