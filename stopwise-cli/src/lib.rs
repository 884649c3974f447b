//! Command-line interface for the Stopwise trip planner.
//!
//! `stopwise optimize` orders the stops in a JSON request file and prints the
//! optimized tour with its road geometry. `stopwise snap` moves one point onto
//! the nearest street. Options layer from CLI flags, configuration files and
//! `STOPWISE_*` environment variables.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod fs;
mod optimize;
mod service;
mod snap;

pub use error::CliError;

use optimize::{DefaultOptimizerBuilder, OptimizeArgs, run_optimize_with};
use snap::{DefaultGeocoderBuilder, SnapArgs, run_snap_with};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_PROFILE: &str = "profile";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_METRIC: &str = "metric";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LON: &str = "lon";
pub(crate) const ENV_OPTIMIZE_REQUEST: &str = "STOPWISE_CMDS_OPTIMIZE_REQUEST_PATH";
pub(crate) const ENV_SNAP_LAT: &str = "STOPWISE_CMDS_SNAP_LAT";
pub(crate) const ENV_SNAP_LON: &str = "STOPWISE_CMDS_SNAP_LON";

/// Run the Stopwise CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// routing service fails, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version land here.
            err.print().map_err(CliError::WriteOutput)?;
            return Ok(());
        }
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Optimize(args) => run_optimize_with(args, &DefaultOptimizerBuilder, &mut stdout),
        Command::Snap(args) => run_snap_with(args, &DefaultGeocoderBuilder, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "stopwise",
    about = "Order stops into a short drivable trip",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimize the visiting order of the stops in a request file.
    Optimize(OptimizeArgs),
    /// Snap a point to the nearest street.
    Snap(SnapArgs),
}

/// Print `value` as pretty JSON followed by a newline.
fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
