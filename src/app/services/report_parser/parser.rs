//! Report parser orchestration
//!
//! Reads a report, selects the county rule set and drives each line through
//! the classifier, the field extractor and the record assembler.

use std::path::Path;
use tracing::{debug, info, warn};

use super::assembler::RecordAssembler;
use super::classifier::classify;
use super::field_extractor::extract;
use super::rules::RuleSet;
use super::stats::{ParseStats, RationalMethodParse, UnitHydrographParse};
use crate::app::models::{Convention, LineKind, RawLine, ReportKind};
use crate::config::{Config, normalize_phrase};
use crate::error::ParseIssue;
use crate::{Error, Result};

/// Parser for rational method and unit hydrograph reports
///
/// The parser holds no per-file state; every call builds a fresh
/// [`RecordAssembler`], so parsing the same file twice gives the same result.
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    config: Config,
}

impl ReportParser {
    /// Create a parser bound to a configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rule set for a convention with configured overrides applied
    pub fn rule_set(&self, convention: Convention) -> RuleSet {
        let rules = RuleSet::for_convention(convention);
        match self.config.overrides_for(convention) {
            Some(overrides) => rules.with_overrides(overrides),
            None => rules,
        }
    }

    /// Detect the county convention of a report file
    pub fn detect_convention(
        &self,
        path: &Path,
    ) -> Result<std::result::Result<RuleSet, ParseIssue>> {
        let text = read_report(path)?;
        Ok(self.detect_convention_in(path, &text))
    }

    /// Detect the county convention from report text. The first probed line
    /// carrying a county signature decides.
    pub fn detect_convention_in(
        &self,
        path: &Path,
        text: &str,
    ) -> std::result::Result<RuleSet, ParseIssue> {
        let probe_lines = self.config.probe_lines;
        let candidates: Vec<RuleSet> = Convention::ALL
            .iter()
            .map(|convention| self.rule_set(*convention))
            .collect();

        for (index, line) in text.lines().take(probe_lines).enumerate() {
            let normalized = normalize_phrase(line);
            if let Some(rules) = candidates
                .iter()
                .find(|rules| normalized.contains(rules.signature()))
            {
                debug!(
                    "{}: {} convention detected on line {}",
                    path.display(),
                    rules.convention(),
                    index + 1
                );
                return Ok(rules.clone());
            }
        }

        Err(ParseIssue::UnrecognizedFormat {
            path: path.to_path_buf(),
            probed: probe_lines,
        })
    }

    /// Parse a rational method report file
    pub fn parse_rational_method_file(
        &self,
        path: &Path,
        convention: Option<Convention>,
    ) -> Result<RationalMethodParse> {
        info!("Parsing rational method report: {}", path.display());
        let text = read_report(path)?;
        Ok(self.parse_rational_method_text(path, &text, convention))
    }

    /// Parse rational method report text
    pub fn parse_rational_method_text(
        &self,
        path: &Path,
        text: &str,
        convention: Option<Convention>,
    ) -> RationalMethodParse {
        let mut stats = ParseStats::new();
        let rules = match self.resolve_rules(path, text, convention) {
            Ok(rules) => rules,
            Err(issue) => {
                warn!("{}", issue);
                stats.total_lines = text.lines().count();
                return RationalMethodParse {
                    records: Vec::new(),
                    issues: vec![issue],
                    stats,
                };
            }
        };

        let assembler = run_lines(path, text, &rules, ReportKind::RationalMethod, &mut stats);
        let (records, issues) = assembler.finish_rational();
        stats.records_emitted = records.len();

        info!(
            "Parsed {} records from {} lines with {} issues",
            records.len(),
            stats.total_lines,
            issues.len()
        );

        RationalMethodParse {
            records,
            issues,
            stats,
        }
    }

    /// Parse a unit hydrograph report file
    pub fn parse_unit_hydrograph_file(
        &self,
        path: &Path,
        convention: Option<Convention>,
    ) -> Result<UnitHydrographParse> {
        info!("Parsing unit hydrograph report: {}", path.display());
        let text = read_report(path)?;
        Ok(self.parse_unit_hydrograph_text(path, &text, convention))
    }

    /// Parse unit hydrograph report text
    pub fn parse_unit_hydrograph_text(
        &self,
        path: &Path,
        text: &str,
        convention: Option<Convention>,
    ) -> UnitHydrographParse {
        let mut stats = ParseStats::new();
        let rules = match self.resolve_rules(path, text, convention) {
            Ok(rules) => rules,
            Err(issue) => {
                warn!("{}", issue);
                stats.total_lines = text.lines().count();
                return UnitHydrographParse {
                    record: None,
                    issues: vec![issue],
                    stats,
                };
            }
        };

        let assembler = run_lines(path, text, &rules, ReportKind::UnitHydrograph, &mut stats);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let (record, issues) = assembler.finish_unit_hydrograph(&file_name);
        stats.records_emitted = usize::from(record.is_some());

        if let Some(record) = &record {
            info!(
                "Peak flow {} CFS, peak volume {} Ac.ft",
                record.peak_flow_cfs, record.peak_volume_acre_ft
            );
        }

        UnitHydrographParse {
            record,
            issues,
            stats,
        }
    }

    /// Explicit convention, then configured county, then detection
    fn resolve_rules(
        &self,
        path: &Path,
        text: &str,
        convention: Option<Convention>,
    ) -> std::result::Result<RuleSet, ParseIssue> {
        match convention.or(self.config.county) {
            Some(convention) => Ok(self.rule_set(convention)),
            None => self.detect_convention_in(path, text),
        }
    }
}

/// Feed every line of a report through classification, extraction and assembly
fn run_lines<'r>(
    path: &'r Path,
    text: &str,
    rules: &'r RuleSet,
    report: ReportKind,
    stats: &mut ParseStats,
) -> RecordAssembler<'r> {
    let mut assembler = RecordAssembler::new(path, rules, report);

    for (index, line_text) in text.lines().enumerate() {
        let line = RawLine::new(path, index + 1, line_text);
        let kind = classify(&line, assembler.state());
        let extracted = extract(&line, kind, assembler.state());

        stats.total_lines += 1;
        if kind == LineKind::Noise {
            stats.noise_lines += 1;
        }
        assembler.accept(&line, kind, extracted);
    }

    assembler
}

/// Read a report fully, replacing invalid UTF-8
fn read_report(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
