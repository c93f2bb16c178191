//! Output for parsed report records
//!
//! Records leave the parser at full precision; rounding to the requested
//! number of decimals happens only here.
//!
//! # Architecture
//!
//! - [`csv_output`] - CSV files with the documented column headers
//! - [`table`] - GitHub-style pipe tables for the console
//!
//! # Usage
//!
//! ```rust,no_run
//! use rmparse::app::services::report_writer::{csv_output, table};
//! use rmparse::app::models::RationalMethodRecord;
//!
//! # fn example(records: Vec<RationalMethodRecord>) -> rmparse::Result<()> {
//! let input = std::path::Path::new("RM100.out");
//! csv_output::write_rational_method_csv(&csv_output::rational_method_csv_path(input), &records, 2)?;
//! println!("{}", table::rational_method_table(&records, 2).render());
//! # Ok(())
//! # }
//! ```

pub mod csv_output;
pub mod table;

#[cfg(test)]
mod tests;

pub use csv_output::{
    rational_method_csv_path, unit_hydrograph_csv_path, write_rational_method_csv,
    write_unit_hydrograph_csv,
};
pub use table::{Table, rational_method_table, unit_hydrograph_table};

use crate::app::models::RationalMethodRecord;
use crate::constants::CONFLUENCE_MARKER;

/// Render a number with a fixed number of decimals
pub fn format_number(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

/// Node label as written to output; confluences are starred
pub fn node_label(record: &RationalMethodRecord) -> String {
    if record.confluence {
        format!("{}{}", CONFLUENCE_MARKER, record.node_pair)
    } else {
        record.node_pair.to_string()
    }
}
