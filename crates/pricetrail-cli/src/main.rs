mod cli;
mod commands;
mod error;
mod logging;
mod metadata;
mod output;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let envelope = commands::run(&cli)?;
    output::render(&envelope, cli.pretty)?;

    if cli.strict && !envelope.warnings.is_empty() {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.warnings.len(),
        });
    }

    Ok(ExitCode::SUCCESS)
}
