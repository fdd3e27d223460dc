use pricetrail_core::{ItemId, PriceTracker};
use serde_json::json;

use crate::cli::ChartArgs;
use crate::commands::CommandResult;
use crate::error::CliError;

pub fn run(args: &ChartArgs, tracker: &PriceTracker) -> Result<CommandResult, CliError> {
    let item = ItemId::new(args.item.as_str());
    if args.output.is_none() {
        item.as_file_stem()?;
    }

    let written = match args.resolution {
        Some(resolution) => tracker
            .export_chart(&item, resolution, args.output.as_deref())
            .into_iter()
            .collect::<Vec<_>>(),
        None => tracker.export_charts(&item),
    };

    if written.is_empty() {
        return Err(CliError::Command(format!("no chart data for item '{item}'")));
    }

    let files = written
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>();

    Ok(CommandResult::ok(json!({
        "item": item.as_str(),
        "files": files,
    })))
}
