mod chart;
mod stats;
mod update;

use pricetrail_core::{ArchiveConfig, HistoryArchive, IngestConfig, PriceTracker};
use serde_json::Value;
use tracing::info_span;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::RunId;
use crate::output::Envelope;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let run_id = RunId::new_v4();
    let span = info_span!("run", run_id = %run_id);
    let _entered = span.enter();

    let config = match &cli.data_dir {
        Some(dir) => ArchiveConfig::from_data_dir(dir),
        None => ArchiveConfig::default(),
    };
    let archive = HistoryArchive::open(config)?;
    let ingest_config = match &cli.command {
        Command::Update(args) => IngestConfig {
            currency_suffix: args.currency_suffix.clone(),
        },
        _ => IngestConfig::default(),
    };
    let mut tracker = PriceTracker::with_config(archive, ingest_config);
    let load_warnings = load_warnings(&tracker);

    let result = match &cli.command {
        Command::Update(args) => update::run(args, &mut tracker)?,
        Command::Stats => stats::run(&tracker)?,
        Command::Chart(args) => chart::run(args, &tracker)?,
    };

    let mut warnings = load_warnings;
    warnings.extend(result.warnings);

    Ok(Envelope {
        run_id,
        data: result.data,
        warnings,
    })
}

fn load_warnings(tracker: &PriceTracker) -> Vec<String> {
    tracker
        .load_failures()
        .iter()
        .map(|failure| {
            format!(
                "history for '{}' could not be loaded: {}",
                failure.resolution, failure.error
            )
        })
        .collect()
}
