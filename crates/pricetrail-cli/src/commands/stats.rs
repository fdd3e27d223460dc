use pricetrail_core::PriceTracker;

use crate::commands::CommandResult;
use crate::error::CliError;

pub fn run(tracker: &PriceTracker) -> Result<CommandResult, CliError> {
    let stats = tracker.statistics();
    let data = serde_json::to_value(&stats)?;

    let result = CommandResult::ok(data);
    if stats.total_items == 0 {
        return Ok(result.with_warning("no price history recorded yet"));
    }
    Ok(result)
}
