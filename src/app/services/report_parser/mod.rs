//! Report parser for rational method and unit hydrograph outputs
//!
//! This module extracts node pair flow data from rational method reports and
//! peak values from unit hydrograph reports. Reports are loosely structured
//! text; the parser scans them line by line with a small explicit state.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`rules`] - County rule sets selected once per file
//! - [`classifier`] - Line classification in a fixed priority order
//! - [`field_extractor`] - Token-based extraction of typed values
//! - [`assembler`] - The record assembly state machine
//! - [`parser`] - File reading, convention detection and orchestration
//! - [`stats`] - Parse statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rmparse::app::services::report_parser::ReportParser;
//!
//! # fn example() -> rmparse::Result<()> {
//! let parser = ReportParser::default();
//! let result = parser.parse_rational_method_file(std::path::Path::new("RM100.out"), None)?;
//!
//! for record in &result.records {
//!     println!("{} {} {}", record.node_pair, record.flow_rate_cfs, record.time_of_concentration_min);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod classifier;
pub mod field_extractor;
pub mod parser;
pub mod rules;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use assembler::{AssemblerState, ParseState, RecordAssembler};
pub use field_extractor::{Extracted, FlowFields, HydrographPoint};
pub use parser::ReportParser;
pub use rules::RuleSet;
pub use stats::{ParseStats, RationalMethodParse, UnitHydrographParse};

use crate::Result;
use crate::app::models::Convention;
use crate::error::ParseIssue;
use std::path::Path;

/// Parse a rational method report with the default configuration
pub fn parse_rational_method_file(
    path: &Path,
    convention: Option<Convention>,
) -> Result<RationalMethodParse> {
    ReportParser::default().parse_rational_method_file(path, convention)
}

/// Parse a unit hydrograph report with the default configuration
pub fn parse_unit_hydrograph_file(
    path: &Path,
    convention: Option<Convention>,
) -> Result<UnitHydrographParse> {
    ReportParser::default().parse_unit_hydrograph_file(path, convention)
}

/// Detect a report's county convention with the default configuration
pub fn detect_convention(path: &Path) -> Result<std::result::Result<RuleSet, ParseIssue>> {
    ReportParser::default().detect_convention(path)
}
