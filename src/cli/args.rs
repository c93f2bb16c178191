//! Command-line argument definitions for rmparse
//!
//! This module defines the CLI interface using the clap derive API: one
//! subcommand per report family, sharing input, logging and config options.

use crate::app::models::Convention;
use crate::constants::MAX_DIGITS;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the hydrology report parser
///
/// Extracts node flow rates and times of concentration from rational method
/// reports, and peak flow and volume from unit hydrograph reports.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rmparse",
    version,
    about = "Extract tabular results from rational method and unit hydrograph reports",
    long_about = "Parses San Bernardino and Riverside County hydrology program reports (.out files). \
                  Rational method reports yield one row per node pair with its flow rate and time of \
                  concentration; unit hydrograph reports yield the peak flow rate and peak volume of \
                  each file. Results are written to CSV and printed as tables."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse rational method reports into per-file CSV tables
    #[command(visible_alias = "rm")]
    Rational(RationalArgs),
    /// Parse unit hydrograph reports into a combined peak table
    #[command(name = "unit-hydrograph", visible_alias = "uh")]
    UnitHydrograph(UnitHydrographArgs),
}

/// Options shared by both subcommands
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Report files or directories of reports
    ///
    /// A directory contributes every `.out` file it contains. Files are
    /// processed in natural order, so UH2.out comes before UH10.out.
    #[arg(value_name = "PATHS", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Number of decimals in printed and saved numbers
    #[arg(short = 'd', long = "digits", value_name = "N")]
    pub digits: Option<usize>,

    /// County convention to use instead of detecting it per file
    #[arg(long = "county", value_enum, value_name = "COUNTY")]
    pub county: Option<Convention>,

    /// Path to configuration file
    ///
    /// YAML file with digits, probe depth, county and keyword overrides. If
    /// not specified, the per-user rmparse/config.yaml is used when present.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (YAML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Also hides the progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the rational method command
#[derive(Debug, Clone, Parser)]
pub struct RationalArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print each file's table to the console
    #[arg(short = 'p', long = "print")]
    pub print: bool,

    /// Also search directories recursively
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,
}

/// Arguments for the unit hydrograph command
#[derive(Debug, Clone, Parser)]
pub struct UnitHydrographArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Save the combined table as "Unit Hydrograph Results.csv"
    #[arg(short = 's', long = "save")]
    pub save: bool,
}

impl CommonArgs {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(digits) = self.digits {
            if digits > MAX_DIGITS {
                return Err(Error::configuration(format!(
                    "Digits must be at most {}, got {}",
                    MAX_DIGITS, digits
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::file_not_found(config_file));
            }
        }

        Ok(())
    }

    /// Get the log level based on verbosity and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl Args {
    /// Common options of the selected subcommand
    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Commands::Rational(args)) => Some(&args.common),
            Some(Commands::UnitHydrograph(args)) => Some(&args.common),
            None => None,
        }
    }
}
