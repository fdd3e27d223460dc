use pricetrail_core::{PriceTracker, UtcDateTime};
use serde_json::json;

use crate::cli::UpdateArgs;
use crate::commands::CommandResult;
use crate::error::CliError;

pub fn run(args: &UpdateArgs, tracker: &mut PriceTracker) -> Result<CommandResult, CliError> {
    let snapshot_path = args
        .snapshot
        .clone()
        .unwrap_or_else(|| tracker.archive().config().snapshot_path());

    let update = tracker.update_from_file(&snapshot_path, UtcDateTime::now());
    let report = update.report;

    let mut warnings = Vec::new();
    if let Some(error) = update.snapshot_error {
        warnings.push(format!("snapshot unavailable: {error}"));
    }
    if report.skipped.total() > 0 {
        warnings.push(format!("{} snapshot entries skipped", report.skipped.total()));
    }
    for resolution in &report.save_failures {
        warnings.push(format!("history for '{resolution}' could not be saved"));
    }

    let data = json!({
        "snapshot": snapshot_path.display().to_string(),
        "processed": report.processed,
        "admitted": report.admitted,
        "skipped": report.skipped,
        "saved": report.saved,
        "save_failures": report.save_failures,
    });

    Ok(CommandResult::ok(data).with_warnings(warnings))
}
