//! Command-line interface for the Dropoff route optimiser.
//!
//! The `optimise` subcommand reads a JSON-encoded [`dropoff_core::OptimiseRequest`],
//! orders its stops with [`dropoff_solver_local::LocalSearchOptimiser`] and
//! prints either the JSON response or a short human-readable summary.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod optimise;

pub use error::CliError;
use optimise::{OptimiseArgs, run_optimise};

const ARG_REQUEST: &str = "request-path";
const ARG_AVERAGE_SPEED: &str = "average-speed-kmh";
const ARG_MAX_PASSES: &str = "max-passes";
const ARG_FORMAT: &str = "format";
const ENV_REQUEST: &str = "DROPOFF_CMDS_OPTIMISE_REQUEST_PATH";

/// Run the Dropoff CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments fail to parse, configuration cannot be
/// resolved, the request cannot be read or the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger(cli.verbose)?;
    match cli.command {
        Command::Optimise(args) => run_optimise(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dropoff",
    about = "Order delivery and pickup stops for a single driver",
    version
)]
struct Cli {
    /// Log optimiser progress at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimise the visiting order of a JSON stop list.
    Optimise(OptimiseArgs),
}

#[cfg(test)]
mod tests;
