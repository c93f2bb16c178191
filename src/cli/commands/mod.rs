//! Command implementations for the rmparse CLI
//!
//! Each subcommand lives in its own module:
//! - `rational`: per-file CSV output for rational method reports
//! - `unit_hydrograph`: one combined peak table for unit hydrograph reports

pub mod rational;
pub mod shared;
pub mod unit_hydrograph;

pub use shared::RunStats;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Main command runner
///
/// Validates the shared options, sets up logging and dispatches to the
/// selected subcommand. Returns an error only when the run could not start.
pub fn run(args: Args) -> Result<RunStats> {
    let Some(command) = args.command else {
        anyhow::bail!("No command given");
    };

    match command {
        Commands::Rational(rational_args) => {
            rational_args.common.validate()?;
            shared::setup_logging(&rational_args.common)?;
            rational::run_rational(rational_args)
        }
        Commands::UnitHydrograph(uh_args) => {
            uh_args.common.validate()?;
            shared::setup_logging(&uh_args.common)?;
            unit_hydrograph::run_unit_hydrograph(uh_args)
        }
    }
}
