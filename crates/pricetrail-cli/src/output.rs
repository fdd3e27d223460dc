use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;
use crate::metadata::RunId;

/// Everything a command prints to stdout.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub run_id: RunId,
    pub data: Value,
    pub warnings: Vec<String>,
}

pub fn render(envelope: &Envelope, pretty: bool) -> Result<(), CliError> {
    println!("{}", to_text(envelope, pretty)?);
    Ok(())
}

fn to_text(envelope: &Envelope, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(envelope)?
    } else {
        serde_json::to_string(envelope)?
    };
    Ok(payload)
}
