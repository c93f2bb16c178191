//! Rational method command implementation
//!
//! Parses each report independently and writes its CSV next to the input.
//! One bad file never stops the others.

use crate::app::services::report_parser::{RationalMethodParse, ReportParser};
use crate::app::services::report_writer::{
    rational_method_csv_path, rational_method_table, write_rational_method_csv,
};
use crate::cli::args::RationalArgs;
use crate::cli::commands::shared::{
    RunStats, discover_report_files, display_name, load_configuration, print_summary,
    report_issue, run_progress_bar,
};
use anyhow::Result;
use colored::*;
use std::path::Path;
use tracing::{error, info, warn};

/// Run the rational method command
pub fn run_rational(args: RationalArgs) -> Result<RunStats> {
    let common = &args.common;
    let config = load_configuration(common)?;
    let digits = config.digits;
    let parser = ReportParser::new(config);

    let files = discover_report_files(&common.paths, args.recursive)?;
    info!("Processing {} rational method reports", files.len());

    let mut stats = RunStats::default();
    let pb = run_progress_bar(common, files.len(), "Parsing rational method reports");

    for path in &files {
        pb.set_message(display_name(path));
        match parser.parse_rational_method_file(path, None) {
            Ok(parse) => {
                stats.issues += parse.issues.len();
                parse.issues.iter().for_each(report_issue);

                if parse.has_file_level_issue() {
                    warn!("No output for {}", path.display());
                    stats.files_failed += 1;
                } else if let Err(e) = save_and_print(path, &parse, digits, args.print, &pb) {
                    error!("{}", e);
                    stats.files_failed += 1;
                } else {
                    stats.files_processed += 1;
                    stats.records_written += parse.records.len();
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

    if !common.quiet {
        print_summary("Rational Method Summary", &stats);
    }
    Ok(stats)
}

fn save_and_print(
    path: &Path,
    parse: &RationalMethodParse,
    digits: usize,
    print: bool,
    pb: &indicatif::ProgressBar,
) -> crate::Result<()> {
    let csv_path = rational_method_csv_path(path);
    write_rational_method_csv(&csv_path, &parse.records, digits)?;

    if print {
        let table = rational_method_table(&parse.records, digits);
        pb.suspend(|| {
            println!("\n{}", display_name(path).bright_white().bold());
            println!("{}", table.render());
        });
    }
    Ok(())
}
