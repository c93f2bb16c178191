//! Application constants for rmparse
//!
//! Default values, file naming and output schema shared by the parser,
//! the writers and the CLI.

// =============================================================================
// Input Files
// =============================================================================

/// Extension of model report files picked up from directories
pub const REPORT_EXTENSION: &str = "out";

/// Glob pattern used for non-recursive directory discovery
pub const REPORT_FILE_PATTERN: &str = "*.out";

/// Number of leading lines probed for a county signature
pub const DEFAULT_PROBE_LINES: usize = 80;

// =============================================================================
// Output
// =============================================================================

/// Default number of decimals used when rendering numbers
pub const DEFAULT_DIGITS: usize = 2;

/// Largest accepted value for `--digits`
pub const MAX_DIGITS: usize = 10;

/// Extension of per-report rational method CSV files
pub const CSV_EXTENSION: &str = "csv";

/// File name of the combined unit hydrograph CSV
pub const UNIT_HYDROGRAPH_RESULTS_FILE: &str = "Unit Hydrograph Results.csv";

/// Column headers for rational method output
pub const RATIONAL_METHOD_HEADERS: [&str; 3] = ["Nodes", "Q (CFS)", "TC (min)"];

/// Column headers for unit hydrograph output
pub const UNIT_HYDROGRAPH_HEADERS: [&str; 3] =
    ["Filename", "Peak flowrate (CFS)", "Peak volume (Ac.ft)"];

/// Prefix marking confluence node pairs in rendered output
pub const CONFLUENCE_MARKER: &str = "*";

// =============================================================================
// Configuration
// =============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "rmparse";

/// Configuration file name looked up in the config dir
pub const CONFIG_FILE_NAME: &str = "config.yaml";
