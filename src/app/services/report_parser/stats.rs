//! Parse statistics and result structures
//!
//! Each parse returns its records together with the issues found and a few
//! line counts, so callers can report on a file without re-parsing it.

use crate::app::models::{RationalMethodRecord, UnitHydrographRecord};
use crate::error::ParseIssue;
use serde::{Deserialize, Serialize};

/// Line counts for one parsed file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines read from the file
    pub total_lines: usize,

    /// Lines classified as noise and skipped
    pub noise_lines: usize,

    /// Records produced
    pub records_emitted: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Result of parsing one rational method report
#[derive(Debug, Clone, PartialEq)]
pub struct RationalMethodParse {
    /// Records in file order
    pub records: Vec<RationalMethodRecord>,

    /// Issues in file order
    pub issues: Vec<ParseIssue>,

    pub stats: ParseStats,
}

impl RationalMethodParse {
    /// Whether an issue cost the file all of its output
    pub fn has_file_level_issue(&self) -> bool {
        self.issues.iter().any(ParseIssue::is_file_level)
    }
}

/// Result of parsing one unit hydrograph report
#[derive(Debug, Clone, PartialEq)]
pub struct UnitHydrographParse {
    /// The file's record, absent when a peak value was never found
    pub record: Option<UnitHydrographRecord>,

    /// Issues in file order
    pub issues: Vec<ParseIssue>,

    pub stats: ParseStats,
}

impl UnitHydrographParse {
    /// Whether an issue cost the file its record
    pub fn has_file_level_issue(&self) -> bool {
        self.issues.iter().any(ParseIssue::is_file_level)
    }
}
