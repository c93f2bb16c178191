//! CSV output
//!
//! Rational method results are written next to each input report with a
//! `.csv` extension. Unit hydrograph results from one directory are combined
//! into a single file in that directory.

use std::path::{Path, PathBuf};
use tracing::info;

use super::{format_number, node_label};
use crate::app::models::{RationalMethodRecord, UnitHydrographRecord};
use crate::constants::{
    CSV_EXTENSION, RATIONAL_METHOD_HEADERS, UNIT_HYDROGRAPH_HEADERS, UNIT_HYDROGRAPH_RESULTS_FILE,
};
use crate::{Error, Result};

/// CSV path for a rational method report: same stem, `.csv` extension
pub fn rational_method_csv_path(input: &Path) -> PathBuf {
    input.with_extension(CSV_EXTENSION)
}

/// Combined unit hydrograph CSV path inside a directory
pub fn unit_hydrograph_csv_path(directory: &Path) -> PathBuf {
    directory.join(UNIT_HYDROGRAPH_RESULTS_FILE)
}

/// Write rational method records with `Nodes,Q (CFS),TC (min)` columns
pub fn write_rational_method_csv(
    path: &Path,
    records: &[RationalMethodRecord],
    digits: usize,
) -> Result<()> {
    let rows = records.iter().map(|record| {
        [
            node_label(record),
            format_number(record.flow_rate_cfs, digits),
            format_number(record.time_of_concentration_min, digits),
        ]
    });
    write_rows(path, &RATIONAL_METHOD_HEADERS, rows)?;
    info!("Saved {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Write unit hydrograph records, one row per source file
pub fn write_unit_hydrograph_csv(
    path: &Path,
    records: &[UnitHydrographRecord],
    digits: usize,
) -> Result<()> {
    let rows = records.iter().map(|record| {
        [
            record.source_file_name.clone(),
            format_number(record.peak_flow_cfs, digits),
            format_number(record.peak_volume_acre_ft, digits),
        ]
    });
    write_rows(path, &UNIT_HYDROGRAPH_HEADERS, rows)?;
    info!("Saved {} rows to {}", records.len(), path.display());
    Ok(())
}

fn write_rows<I, R>(path: &Path, headers: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::csv_writing(path, e))?;
    writer
        .write_record(headers)
        .map_err(|e| Error::csv_writing(path, e))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| Error::csv_writing(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}
