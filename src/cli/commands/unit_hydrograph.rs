//! Unit hydrograph command implementation
//!
//! Every report contributes one row of peak values. Rows are collected in
//! file order, printed as one table and optionally saved as one CSV in the
//! reports' directory.

use crate::app::models::UnitHydrographRecord;
use crate::app::services::report_parser::ReportParser;
use crate::app::services::report_writer::{
    unit_hydrograph_csv_path, unit_hydrograph_table, write_unit_hydrograph_csv,
};
use crate::cli::args::UnitHydrographArgs;
use crate::cli::commands::shared::{
    RunStats, discover_report_files, display_name, load_configuration, print_summary,
    report_issue, run_progress_bar,
};
use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Run the unit hydrograph command
pub fn run_unit_hydrograph(args: UnitHydrographArgs) -> Result<RunStats> {
    let common = &args.common;
    let config = load_configuration(common)?;
    let digits = config.digits;
    let parser = ReportParser::new(config);

    let files = discover_report_files(&common.paths, false)?;
    let directory = shared_directory(&files)?;
    info!(
        "Processing {} unit hydrograph reports in {}",
        files.len(),
        directory.display()
    );

    let mut stats = RunStats::default();
    let mut records: Vec<UnitHydrographRecord> = Vec::with_capacity(files.len());
    let pb = run_progress_bar(common, files.len(), "Parsing unit hydrograph reports");

    for path in &files {
        pb.set_message(display_name(path));
        match parser.parse_unit_hydrograph_file(path, None) {
            Ok(parse) => {
                stats.issues += parse.issues.len();
                parse.issues.iter().for_each(report_issue);

                match parse.record {
                    Some(record) => {
                        stats.files_processed += 1;
                        records.push(record);
                    }
                    None => {
                        warn!("No peak values for {}", path.display());
                        stats.files_failed += 1;
                    }
                }
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                stats.files_failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    stats.records_written = records.len();
    println!("{}", unit_hydrograph_table(&records, digits).render());

    if args.save {
        let csv_path = unit_hydrograph_csv_path(&directory);
        write_unit_hydrograph_csv(&csv_path, &records, digits)
            .with_context(|| format!("Failed to save results to {}", csv_path.display()))?;
        if !common.quiet {
            println!(
                "\n{} {}",
                "Saved:".bright_cyan(),
                csv_path.display().to_string().bright_white()
            );
        }
    }

    if !common.quiet {
        print_summary("Unit Hydrograph Summary", &stats);
    }
    Ok(stats)
}

/// The one directory all reports live in
fn shared_directory(files: &[PathBuf]) -> Result<PathBuf> {
    let mut directories = files.iter().map(|path| parent_directory(path));
    let Some(first) = directories.next() else {
        anyhow::bail!("No unit hydrograph reports found");
    };
    if let Some(other) = directories.find(|dir| *dir != first) {
        anyhow::bail!(
            "Unit hydrograph reports must share one directory, found {} and {}",
            first.display(),
            other.display()
        );
    }
    Ok(first)
}

fn parent_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_directory() {
        let files = vec![PathBuf::from("runs/UH1.out"), PathBuf::from("runs/UH2.out")];
        assert_eq!(shared_directory(&files).unwrap(), PathBuf::from("runs"));

        let bare = vec![PathBuf::from("UH1.out")];
        assert_eq!(shared_directory(&bare).unwrap(), PathBuf::from("."));
    }

    #[test]
    fn test_mixed_directories_rejected() {
        let files = vec![PathBuf::from("a/UH1.out"), PathBuf::from("b/UH2.out")];
        assert!(shared_directory(&files).is_err());
        assert!(shared_directory(&[]).is_err());
    }
}
