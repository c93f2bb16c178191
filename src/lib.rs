//! rmparse Library
//!
//! A Rust library for extracting tabular results from hydrology program
//! reports (`.out` files) produced for San Bernardino and Riverside County.
//!
//! This library provides tools for:
//! - Detecting a report's county convention from its banner lines
//! - Assembling rational method records (node pair, flow rate, time of
//!   concentration) from loosely structured report text
//! - Extracting peak flow and peak volume from unit hydrograph reports
//! - Collecting per-line parse issues without aborting a batch
//! - Writing results as CSV files and GitHub-style console tables

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod report_parser;
        pub mod report_writer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    CommandCase, Convention, NodePair, RationalMethodRecord, UnitHydrographRecord,
};
pub use app::services::report_parser::{
    RationalMethodParse, ReportParser, RuleSet, UnitHydrographParse, detect_convention,
    parse_rational_method_file, parse_unit_hydrograph_file,
};
pub use config::Config;
pub use error::{Error, ParseIssue, Result};
