//! Data models for hydrology report parsing
//!
//! This module contains the core data structures shared by the parser and
//! the writers: county conventions, rational method commands, node pairs,
//! the two record types and the per-line classification types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// =============================================================================
// County Conventions
// =============================================================================

/// County report conventions supported by the parser
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// San Bernardino County hydrology programs
    #[value(alias = "sb")]
    SanBernardino,
    /// Riverside County hydrology programs
    #[value(alias = "rc")]
    Riverside,
}

impl Convention {
    /// All conventions, in detection priority order
    pub const ALL: [Convention; 2] = [Convention::SanBernardino, Convention::Riverside];

    /// Display name as printed in report banners
    pub fn name(&self) -> &'static str {
        match self {
            Convention::SanBernardino => "San Bernardino",
            Convention::Riverside => "Riverside",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Rational Method Commands
// =============================================================================

/// Computation commands that open a block in a rational method report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandCase {
    InitialArea,
    StreetFlow,
    StreetInlet,
    SubareaAddition,
    PipeflowProgram,
    PipeflowUser,
    ChannelImproved,
    ChannelIrregular,
    User,
    ConfluenceMinor,
    ConfluenceMain,
}

impl CommandCase {
    /// Whether the command merges streams at a confluence
    pub fn is_confluence(&self) -> bool {
        matches!(self, CommandCase::ConfluenceMinor | CommandCase::ConfluenceMain)
    }
}

// =============================================================================
// Node Pairs
// =============================================================================

/// A labeled segment between two modeled points, rendered as `<id>-<id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePair {
    pub from: String,
    pub to: String,
}

impl NodePair {
    /// Build a node pair from two station tokens such as `101.000`
    pub fn from_stations(from: &str, to: &str) -> Result<Self, String> {
        Ok(Self {
            from: normalize_node_id(from)?,
            to: normalize_node_id(to)?,
        })
    }
}

impl fmt::Display for NodePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for NodePair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [from, to] => Self::from_stations(from, to),
            _ => Err(format!("'{}' does not have the form <id>-<id>", s)),
        }
    }
}

/// Validate a node identifier and drop an all-zero decimal fraction
fn normalize_node_id(raw: &str) -> Result<String, String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err("empty node identifier".to_string());
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
    {
        return Err(format!("'{}' is not a valid node identifier", id));
    }

    // Stations print as 101.000; the integer part is the node number
    if let Some((whole, fraction)) = id.split_once('.') {
        let whole_is_number = !whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit());
        if whole_is_number && fraction.chars().all(|c| c == '0') {
            return Ok(whole.to_string());
        }
    }

    Ok(id.to_string())
}

// =============================================================================
// Records
// =============================================================================

/// Flow and time of concentration computed at one node pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RationalMethodRecord {
    pub node_pair: NodePair,
    pub flow_rate_cfs: f64,
    pub time_of_concentration_min: f64,
    /// Block was a confluence of main or minor streams
    pub confluence: bool,
}

/// Peak values of one unit hydrograph report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitHydrographRecord {
    pub source_file_name: String,
    pub peak_flow_cfs: f64,
    pub peak_volume_acre_ft: f64,
}

// =============================================================================
// Line Classification
// =============================================================================

/// Report family being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    RationalMethod,
    UnitHydrograph,
}

impl ReportKind {
    /// Human-readable name of the record this report produces
    pub fn record_name(&self) -> &'static str {
        match self {
            ReportKind::RationalMethod => "rational method record",
            ReportKind::UnitHydrograph => "unit hydrograph record",
        }
    }
}

/// A single line of report text
#[derive(Debug, Clone, Copy)]
pub struct RawLine<'a> {
    pub path: &'a Path,
    /// 1-based line number
    pub number: usize,
    pub text: &'a str,
}

impl<'a> RawLine<'a> {
    pub fn new(path: &'a Path, number: usize, text: &'a str) -> Self {
        Self { path, number, text }
    }
}

/// Structural markers carried by header lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMark {
    /// County program banner
    Banner(Convention),
    /// Computation command banner
    Command(CommandCase),
    /// Start of a confluence stream summary
    ConfluenceSummary,
    /// Start of the runoff hydrograph table
    HydrographStart,
    /// Dashed line closing the runoff hydrograph table
    HydrographEnd,
}

/// Logical record type of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header(HeaderMark),
    NodePairBlockStart,
    FlowLine,
    PeakFlowLine,
    PeakVolumeLine,
    HydrographRow,
    Noise,
}
