//! Line classification
//!
//! Assigns a [`LineKind`] to each report line. Tests run in a fixed
//! priority order, most specific first, so a line that could be read two
//! ways always resolves the same way:
//!
//! 1. hydrograph table rows and the table's closing dashes (only inside a table)
//! 2. compact flow lines starting with `Q=`
//! 3. node pair block starts
//! 4. unit hydrograph peak flow / peak volume lines
//! 5. flow and time of concentration key phrases for the current command
//! 6. headers: command banners, confluence summaries, county banners, table start
//! 7. noise

use super::assembler::ParseState;
use crate::app::models::{HeaderMark, LineKind, RawLine, ReportKind};
use crate::config::normalize_phrase;
use regex::Regex;
use std::sync::LazyLock;

/// Compact flow line: `Q= 4.26  TC= 17.00`. Missing or bad values are left
/// to the extractor so they surface as issues.
pub(crate) static COMPACT_FLOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^q\s*=").expect("compact flow pattern is valid"));

/// The `TC=` field of a compact flow line
pub(crate) static COMPACT_TC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)tc\s*=").expect("compact tc pattern is valid"));

/// Compact node label token: `<id>-<id>`
static NODE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s-]+-\S+$").expect("node label pattern is valid"));

/// Hydrograph table row: time stamp `h+m`, then volume and flow columns
pub(crate) static HYDROGRAPH_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\+\s*\d+\s+(\S+)\s+(\S+)").expect("hydrograph row pattern is valid")
});

static DASHED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-{10,}$").expect("dashed line pattern is valid"));

/// Classify a line given the current parse state
pub fn classify(line: &RawLine<'_>, state: &ParseState<'_>) -> LineKind {
    let normalized = normalize_phrase(line.text);
    if normalized.is_empty() {
        return LineKind::Noise;
    }

    match state.report() {
        ReportKind::RationalMethod => classify_rational(&normalized, state),
        ReportKind::UnitHydrograph => classify_unit_hydrograph(&normalized, state),
    }
}

fn classify_rational(normalized: &str, state: &ParseState<'_>) -> LineKind {
    let rules = state.rules();

    if COMPACT_FLOW.is_match(normalized) {
        return LineKind::FlowLine;
    }

    if is_node_pair_start(normalized, state) {
        return LineKind::NodePairBlockStart;
    }

    if let Some(command) = state.current_command() {
        if rules.match_flowrate(command, normalized).is_some()
            || rules.match_time_of_concentration(command, normalized).is_some()
        {
            return LineKind::FlowLine;
        }
    }

    if let Some(command) = rules.match_command(normalized) {
        return LineKind::Header(HeaderMark::Command(command));
    }

    if rules.is_confluence_summary(normalized) {
        return LineKind::Header(HeaderMark::ConfluenceSummary);
    }

    if normalized.contains(rules.signature()) {
        return LineKind::Header(HeaderMark::Banner(rules.convention()));
    }

    LineKind::Noise
}

fn classify_unit_hydrograph(normalized: &str, state: &ParseState<'_>) -> LineKind {
    let rules = state.rules();

    if state.in_hydrograph_table() {
        if HYDROGRAPH_ROW.is_match(normalized) {
            return LineKind::HydrographRow;
        }
        // The table header has its own dashed rule; only dashes after rows close it
        if state.hydrograph_rows() > 0 && DASHED_LINE.is_match(normalized) {
            return LineKind::Header(HeaderMark::HydrographEnd);
        }
    }

    if rules.match_peak_flow(normalized).is_some() {
        return LineKind::PeakFlowLine;
    }

    if rules.match_peak_volume(normalized).is_some() {
        return LineKind::PeakVolumeLine;
    }

    if rules.is_hydrograph_start(normalized) {
        return LineKind::Header(HeaderMark::HydrographStart);
    }

    if normalized.contains(rules.signature()) {
        return LineKind::Header(HeaderMark::Banner(rules.convention()));
    }

    LineKind::Noise
}

fn is_node_pair_start(normalized: &str, state: &ParseState<'_>) -> bool {
    let rule = state.rules().node_pair();
    if normalized.starts_with(rule.station_prefix) {
        return true;
    }
    // `Node elevation = ...` and similar prose must not open a block
    let mut tokens = normalized.split(' ');
    tokens.next() == Some(rule.compact_marker)
        && tokens.next().is_some_and(|label| NODE_LABEL.is_match(label))
}
