//! Integration tests for rational method parsing and per-file CSV output

use clap::Parser;
use rmparse::app::services::report_writer::{rational_method_csv_path, write_rational_method_csv};
use rmparse::cli::args::{Args, Commands};
use rmparse::cli::commands::rational::run_rational;
use rmparse::{Convention, ParseIssue, ReportParser, detect_convention, parse_rational_method_file};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const COMPACT_REPORT: &str = "San Bernardino County Rational Hydrology Program\n\
NODE 101-102\n\
Q= 4.26  TC= 17.00\n\
NODE 102-103\n\
Q= 6.00  TC= 19.35\n";

const CONFLUENCE_REPORT: &str = r#"
          San Bernardino County Rational Hydrology Program
++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station      101.000 to Point/Station      102.000
**** INITIAL AREA EVALUATION ****

Initial area time of concentration =   17.553 min.
Subarea runoff =      3.141(CFS)
++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station      102.000 to Point/Station      102.000
**** CONFLUENCE OF MAIN STREAMS ****

In Main Stream number: 1
Runoff from this stream =      3.141(CFS)
Time of concentration =   17.55 min.
Summary of stream data:
Results of confluence:
Total flow rate =      6.020(CFS)
Time of concentration =   18.24 min.
"#;

const MINOR_CONFLUENCE_REPORT: &str = r#"
          Riverside County Rational Hydrology Program
++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station       10.000 to Point/Station       20.000
**** INITIAL AREA EVALUATION ****

Initial area time of concentration =   12.500 min.
Initial area runoff =      2.750(CFS)
++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station       20.000 to Point/Station       20.000
**** CONFLUENCE OF MINOR STREAMS ****

Along Main Stream number: 1 in normal stream number 1
Runoff from this stream =      2.750(CFS)
Time of concentration =   12.50 min.
Confluence information:
Effective stream flow =      4.100(CFS)
Time of concentration =   13.10 min.
"#;

fn write_report(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_compact_report_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_report(temp_dir.path(), "RM100.out", COMPACT_REPORT);

    let parse = parse_rational_method_file(&path, None).unwrap();
    assert!(parse.issues.is_empty(), "{:?}", parse.issues);
    assert_eq!(parse.records.len(), 2);
    assert_eq!(parse.records[0].node_pair.to_string(), "101-102");
    assert_eq!(parse.records[0].flow_rate_cfs, 4.26);
    assert_eq!(parse.records[0].time_of_concentration_min, 17.00);

    let csv_path = rational_method_csv_path(&path);
    assert_eq!(csv_path, temp_dir.path().join("RM100.csv"));
    write_rational_method_csv(&csv_path, &parse.records, 2).unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec!["Nodes,Q (CFS),TC (min)", "101-102,4.26,17.00", "102-103,6.00,19.35"]
    );
}

#[test]
fn test_confluence_is_starred_in_csv() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_report(temp_dir.path(), "RM200.out", CONFLUENCE_REPORT);

    let parse = parse_rational_method_file(&path, None).unwrap();
    assert!(parse.issues.is_empty(), "{:?}", parse.issues);
    assert_eq!(parse.records.len(), 2);
    assert!(parse.records[1].confluence);

    let csv_path = rational_method_csv_path(&path);
    write_rational_method_csv(&csv_path, &parse.records, 1).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "101-102,3.1,17.6");
    assert_eq!(lines[2], "*102-102,6.0,18.2");
}

#[test]
fn test_minor_confluence_is_starred_in_csv() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_report(temp_dir.path(), "RC200.out", MINOR_CONFLUENCE_REPORT);

    let parse = parse_rational_method_file(&path, None).unwrap();
    assert!(parse.issues.is_empty(), "{:?}", parse.issues);
    assert_eq!(parse.records.len(), 2);
    assert!(parse.records[1].confluence);

    let csv_path = rational_method_csv_path(&path);
    write_rational_method_csv(&csv_path, &parse.records, 2).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "10-20,2.75,12.50");
    assert_eq!(lines[2], "*20-20,4.10,13.10");
}

#[test]
fn test_compact_flow_without_tc_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_report(
        temp_dir.path(),
        "RM400.out",
        "San Bernardino\nNODE 101-102\nQ= 4.26  TC=\nNODE 102-103\nQ= 5.00  TC= 18.00\n",
    );

    let parse = parse_rational_method_file(&path, None).unwrap();
    assert_eq!(parse.records.len(), 1);
    assert_eq!(parse.records[0].node_pair.to_string(), "102-103");
    assert!(matches!(
        parse.issues.as_slice(),
        [ParseIssue::MalformedField {
            line_number: 3,
            field: "time of concentration",
            ..
        }]
    ));
}

#[test]
fn test_recursive_discovery() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    write_report(&nested, "RM1.out", COMPACT_REPORT);

    let dir = temp_dir.path().to_str().unwrap();
    let args = Args::try_parse_from(["rmparse", "rm", dir, "-q", "--recursive"]).unwrap();
    let Some(Commands::Rational(rational_args)) = args.command else {
        panic!("expected rational command");
    };
    let stats = run_rational(rational_args).unwrap();
    assert_eq!(stats.files_processed, 1);
    assert!(nested.join("RM1.csv").exists());
}

#[test]
fn test_malformed_value_does_not_stop_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_report(
        temp_dir.path(),
        "RM300.out",
        "San Bernardino\nNODE 101-102\nQ= abc  TC= 17.00\nNODE 102-103\nQ= 5.00  TC= 18.00\n",
    );

    let parse = parse_rational_method_file(&path, None).unwrap();
    assert_eq!(parse.records.len(), 1);
    assert_eq!(parse.records[0].node_pair.to_string(), "102-103");
    assert!(matches!(
        parse.issues.as_slice(),
        [ParseIssue::MalformedField { line_number: 3, .. }]
    ));
}

#[test]
fn test_detect_convention_and_parser_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_report(
        temp_dir.path(),
        "RC1.out",
        "Riverside County Rational Hydrology Program\nNODE 10-20\nQ= 2.75  TC= 12.50\n",
    );

    let rules = detect_convention(&path).unwrap().unwrap();
    assert_eq!(rules.convention(), Convention::Riverside);

    let parser = ReportParser::new(rmparse::Config::default().with_digits(3));
    assert_eq!(parser.config().digits, 3);
    let parse = parser.parse_rational_method_file(&path, None).unwrap();
    assert_eq!(parse.records.len(), 1);
}

#[test]
fn test_command_writes_csv_per_file() {
    let temp_dir = TempDir::new().unwrap();
    write_report(temp_dir.path(), "RM1.out", COMPACT_REPORT);
    write_report(temp_dir.path(), "RM2.out", "plain text with no banner\n");

    let dir = temp_dir.path().to_str().unwrap();
    let args = Args::try_parse_from(["rmparse", "rational", dir, "-q"]).unwrap();
    let Some(Commands::Rational(rational_args)) = args.command else {
        panic!("expected rational command");
    };

    let stats = run_rational(rational_args).unwrap();
    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.records_written, 2);

    assert!(temp_dir.path().join("RM1.csv").exists());
    assert!(!temp_dir.path().join("RM2.csv").exists());
}

#[test]
fn test_command_rejects_missing_path() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.out");
    let args =
        Args::try_parse_from(["rmparse", "rm", missing.to_str().unwrap(), "-q"]).unwrap();
    let Some(Commands::Rational(rational_args)) = args.command else {
        panic!("expected rational command");
    };
    assert!(run_rational(rational_args).is_err());
}
