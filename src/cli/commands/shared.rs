//! Shared components for CLI commands
//!
//! This module contains the run statistics, logging setup, configuration
//! loading, report discovery and console helpers used by both subcommands.

use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::constants::{CSV_EXTENSION, REPORT_EXTENSION, REPORT_FILE_PATTERN};
use crate::error::ParseIssue;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Run statistics for reporting across both commands
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Files that produced output
    pub files_processed: usize,
    /// Files that failed entirely
    pub files_failed: usize,
    /// Rows written or printed
    pub records_written: usize,
    /// Parse issues reported across all files
    pub issues: usize,
}

impl RunStats {
    /// True when at least one file failed entirely
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rmparse={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration: defaults, then the config file, then CLI flags
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => match Config::user_config_path() {
            Some(path) if path.exists() => info!("Using config file: {}", path.display()),
            _ => info!("No config file found, using defaults"),
        },
    }

    let mut config =
        Config::load(args.config_file.as_deref()).context("Failed to load configuration")?;

    if let Some(digits) = args.digits {
        config = config.with_digits(digits);
    }
    if let Some(county) = args.county {
        config = config.with_county(county);
    }

    config.validate()?;
    Ok(config)
}

/// Expand the given paths into report files in natural order
///
/// Directories contribute their `.out` files, recursively with `recursive`.
/// Files contribute themselves. A path that does not exist is an error.
pub fn discover_report_files(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = if recursive {
                walk_report_files(path)?
            } else {
                glob_report_files(path)?
            };
            if found.is_empty() {
                warn!("No report files found in {}", path.display());
            }
            files.extend(found);
        } else if path.is_file() {
            if has_extension(path, CSV_EXTENSION) {
                warn!(
                    "{} looks like a previous output file, parsing it anyway",
                    path.display()
                );
            }
            files.push(path.clone());
        } else {
            anyhow::bail!("Input path does not exist: {}", path.display());
        }
    }

    files.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
    files.dedup();

    debug!("Discovered {} report files", files.len());
    for file in &files {
        debug!("  Found: {}", file.display());
    }

    Ok(files)
}

fn glob_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        REPORT_FILE_PATTERN
    );
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).context("Invalid report file pattern")? {
        let path = entry.context("Failed to read directory entry")?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn walk_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).follow_links(false) {
        let entry = entry.context("Failed to walk directory")?;
        let path = entry.path();
        if entry.file_type().is_file() && has_extension(path, REPORT_EXTENSION) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// A run of digits or of other characters within a file name
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalChunk {
    Text(String),
    Number(u128, usize),
}

fn natural_chunks(name: &str) -> Vec<NaturalChunk> {
    let mut chunks = Vec::new();
    let mut chars = name.chars().peekable();
    while let Some(&first) = chars.peek() {
        let digits = first.is_ascii_digit();
        let mut run = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() != digits {
                break;
            }
            run.push(c);
            chars.next();
        }
        match run.parse::<u128>() {
            Ok(value) if digits => chunks.push(NaturalChunk::Number(value, run.len())),
            _ => chunks.push(NaturalChunk::Text(run.to_lowercase())),
        }
    }
    chunks
}

/// Compare names so embedded numbers order by value: `UH2` before `UH10`
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_chunks(a)
        .cmp(&natural_chunks(b))
        .then_with(|| a.cmp(b))
}

/// File name for progress and table titles
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Log one parse issue, with its line when it has one
pub fn report_issue(issue: &ParseIssue) {
    warn!("{}: {}", issue.kind_name(), issue);
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Progress bar for a run, hidden in quiet mode
pub fn run_progress_bar(args: &CommonArgs, total: usize, message: &str) -> ProgressBar {
    if args.show_progress() {
        create_progress_bar(total as u64, message)
    } else {
        ProgressBar::hidden()
    }
}

/// Print the end-of-run summary
pub fn print_summary(title: &str, stats: &RunStats) {
    println!("\n{}", title.bright_green().bold());
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    if stats.issues > 0 {
        println!(
            "  {} {}",
            "Issues:".bright_yellow(),
            stats.issues.to_string().bright_yellow()
        );
    }
    println!(
        "  {} {}",
        "Records:".bright_cyan(),
        stats.records_written.to_string().bright_white().bold()
    );
}
