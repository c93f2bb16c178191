//! Error handling for report parsing operations.
//!
//! Two layers live here: [`Error`] covers failures that stop an operation
//! outright (unreadable files, bad configuration, CSV writing), while
//! [`ParseIssue`] describes problems found inside a report. Issues are
//! collected per file and never abort a batch.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for rmparse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Operational errors
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or directory not found
    #[error("Cannot find item at {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be deserialized
    #[error("Invalid configuration file {}: {source}", path.display())]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// CSV writing error
    #[error("CSV writing error for {}: {source}", path.display())]
    CsvWriting {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl Error {
    /// Create an I/O error for a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration format error
    pub fn config_format(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::ConfigFormat {
            path: path.into(),
            source,
        }
    }

    /// Create a CSV writing error
    pub fn csv_writing(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::CsvWriting {
            path: path.into(),
            source,
        }
    }
}

/// A problem found while parsing a single report file.
///
/// Line-level issues skip the offending line; file-level issues
/// ([`ParseIssue::is_file_level`]) mean the file produced no usable output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseIssue {
    #[error("{}: no known county convention found in the first {probed} lines", path.display())]
    UnrecognizedFormat { path: PathBuf, probed: usize },

    #[error("{}:{line_number}: malformed {field}: {reason} (\"{line}\")", path.display())]
    MalformedField {
        path: PathBuf,
        line_number: usize,
        line: String,
        field: &'static str,
        reason: String,
    },

    #[error("{}:{line_number}: flow data before any node pair (\"{line}\")", path.display())]
    OrphanFlowLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error(
        "{}:{line_number}: incomplete {record}, missing {missing} (\"{line}\")",
        path.display()
    )]
    IncompleteRecord {
        path: PathBuf,
        line_number: usize,
        line: String,
        record: &'static str,
        missing: &'static str,
        file_level: bool,
    },
}

impl ParseIssue {
    /// File the issue was found in
    pub fn path(&self) -> &Path {
        match self {
            Self::UnrecognizedFormat { path, .. }
            | Self::MalformedField { path, .. }
            | Self::OrphanFlowLine { path, .. }
            | Self::IncompleteRecord { path, .. } => path,
        }
    }

    /// 1-based line number, if the issue is tied to a line
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::UnrecognizedFormat { .. } => None,
            Self::MalformedField { line_number, .. }
            | Self::OrphanFlowLine { line_number, .. }
            | Self::IncompleteRecord { line_number, .. } => Some(*line_number),
        }
    }

    /// Whether the issue cost the whole file its output
    pub fn is_file_level(&self) -> bool {
        match self {
            Self::UnrecognizedFormat { .. } => true,
            Self::IncompleteRecord { file_level, .. } => *file_level,
            Self::MalformedField { .. } | Self::OrphanFlowLine { .. } => false,
        }
    }

    /// Short name of the issue kind, used in summaries
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UnrecognizedFormat { .. } => "UnrecognizedFormat",
            Self::MalformedField { .. } => "MalformedField",
            Self::OrphanFlowLine { .. } => "OrphanFlowLine",
            Self::IncompleteRecord { .. } => "IncompleteRecord",
        }
    }
}
