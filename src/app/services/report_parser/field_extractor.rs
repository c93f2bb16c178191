//! Field extraction for classified report lines
//!
//! Values are located by token, never by character column, so reports whose
//! columns drift between program versions still parse. Numbers must use
//! plain decimal notation; unit suffixes glued to a value (`3.141(CFS)`) and
//! trailing separators are dropped before parsing.

use super::assembler::ParseState;
use super::classifier::{COMPACT_FLOW, COMPACT_TC, HYDROGRAPH_ROW};
use super::rules::PhraseRule;
use crate::app::models::{HeaderMark, LineKind, NodePair, RawLine};
use crate::config::normalize_phrase;
use crate::error::ParseIssue;
use regex::Regex;
use std::sync::LazyLock;

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)$").expect("decimal pattern is valid")
});

/// Typed values pulled from one line
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Header(HeaderMark),
    NodePair(NodePair),
    Flow(FlowFields),
    PeakFlow(f64),
    PeakVolume(f64),
    HydrographRow(HydrographPoint),
    Noise,
}

/// Flow data found on a flow line; multi-line reports carry one field per line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowFields {
    pub flow_rate_cfs: Option<f64>,
    pub time_of_concentration_min: Option<f64>,
}

/// One row of the runoff hydrograph table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrographPoint {
    pub volume_acre_ft: f64,
    pub flow_cfs: f64,
}

/// Extract the typed fields of a classified line
pub fn extract(
    line: &RawLine<'_>,
    kind: LineKind,
    state: &ParseState<'_>,
) -> Result<Extracted, ParseIssue> {
    let normalized = normalize_phrase(line.text);
    let field = FieldContext { line };

    match kind {
        LineKind::Noise => Ok(Extracted::Noise),
        LineKind::Header(mark) => Ok(Extracted::Header(mark)),
        LineKind::NodePairBlockStart => extract_node_pair(&normalized, state, &field),
        LineKind::FlowLine => extract_flow(&normalized, state, &field),
        LineKind::PeakFlowLine => {
            let rule = state
                .rules()
                .match_peak_flow(&normalized)
                .ok_or_else(|| field.malformed("peak flow", "no peak flow phrase"))?;
            let value = phrase_value(&normalized, rule, "peak flow", &field)?;
            Ok(Extracted::PeakFlow(value))
        }
        LineKind::PeakVolumeLine => {
            let rule = state
                .rules()
                .match_peak_volume(&normalized)
                .ok_or_else(|| field.malformed("peak volume", "no peak volume phrase"))?;
            let value = phrase_value(&normalized, rule, "peak volume", &field)?;
            Ok(Extracted::PeakVolume(value))
        }
        LineKind::HydrographRow => {
            let captures = HYDROGRAPH_ROW
                .captures(&normalized)
                .ok_or_else(|| field.malformed("hydrograph row", "expected time, volume and flow"))?;
            let volume_acre_ft = parse_value(&captures[1], "hydrograph volume", &field)?;
            let flow_cfs = parse_value(&captures[2], "hydrograph flow", &field)?;
            Ok(Extracted::HydrographRow(HydrographPoint {
                volume_acre_ft,
                flow_cfs,
            }))
        }
    }
}

/// Line context used to build `MalformedField` issues
struct FieldContext<'l, 'a> {
    line: &'l RawLine<'a>,
}

impl FieldContext<'_, '_> {
    fn malformed(&self, field: &'static str, reason: impl Into<String>) -> ParseIssue {
        ParseIssue::MalformedField {
            path: self.line.path.to_path_buf(),
            line_number: self.line.number,
            line: self.line.text.trim().to_string(),
            field,
            reason: reason.into(),
        }
    }
}

fn extract_node_pair(
    normalized: &str,
    state: &ParseState<'_>,
    field: &FieldContext<'_, '_>,
) -> Result<Extracted, ParseIssue> {
    let rule = state.rules().node_pair();
    let tokens: Vec<&str> = normalized.split(' ').collect();

    let pair = if normalized.starts_with(rule.station_prefix) {
        let from = tokens
            .get(rule.from_index)
            .ok_or_else(|| field.malformed("node pair", "missing upstream station"))?;
        let to = tokens
            .get(rule.to_index)
            .ok_or_else(|| field.malformed("node pair", "missing downstream station"))?;
        NodePair::from_stations(from, to)
    } else {
        let label = tokens
            .get(rule.compact_index)
            .ok_or_else(|| field.malformed("node pair", "missing node label"))?;
        label.parse::<NodePair>()
    };

    pair.map(Extracted::NodePair)
        .map_err(|reason| field.malformed("node pair", reason))
}

fn extract_flow(
    normalized: &str,
    state: &ParseState<'_>,
    field: &FieldContext<'_, '_>,
) -> Result<Extracted, ParseIssue> {
    if let Some(q) = COMPACT_FLOW.find(normalized) {
        return extract_compact_flow(&normalized[q.end()..], field);
    }

    let rules = state.rules();
    let command = state
        .current_command()
        .ok_or_else(|| field.malformed("flow rate", "no command context for key phrase"))?;

    let mut fields = FlowFields::default();
    if let Some(rule) = rules.match_flowrate(command, normalized) {
        fields.flow_rate_cfs = Some(phrase_value(normalized, rule, "flow rate", field)?);
    } else if let Some(rule) = rules.match_time_of_concentration(command, normalized) {
        fields.time_of_concentration_min = Some(phrase_value(
            normalized,
            rule,
            "time of concentration",
            field,
        )?);
    } else {
        return Err(field.malformed("flow rate", "no flow or time of concentration phrase"));
    }

    Ok(Extracted::Flow(fields))
}

/// Both fields of `Q= <flow> TC= <tc>` are mandatory
fn extract_compact_flow(
    rest: &str,
    field: &FieldContext<'_, '_>,
) -> Result<Extracted, ParseIssue> {
    let (flow_text, tc_text) = match COMPACT_TC.find(rest) {
        Some(tc) => (&rest[..tc.start()], Some(&rest[tc.end()..])),
        None => (rest, None),
    };

    let flow_token = flow_text
        .split_whitespace()
        .next()
        .ok_or_else(|| field.malformed("flow rate", "missing value"))?;
    let flow_rate_cfs = parse_value(flow_token, "flow rate", field)?;

    let tc_token = tc_text
        .and_then(|text| text.split_whitespace().next())
        .ok_or_else(|| field.malformed("time of concentration", "missing value"))?;
    let time_of_concentration_min = parse_value(tc_token, "time of concentration", field)?;

    Ok(Extracted::Flow(FlowFields {
        flow_rate_cfs: Some(flow_rate_cfs),
        time_of_concentration_min: Some(time_of_concentration_min),
    }))
}

/// Read the value a key phrase assigns
fn phrase_value(
    normalized: &str,
    rule: &PhraseRule,
    name: &'static str,
    field: &FieldContext<'_, '_>,
) -> Result<f64, ParseIssue> {
    let token = rule
        .value_text(normalized)
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or_else(|| field.malformed(name, "missing value"))?;
    parse_value(token, name, field)
}

/// Parse a decimal token as a non-negative finite number
fn parse_value(
    token: &str,
    name: &'static str,
    field: &FieldContext<'_, '_>,
) -> Result<f64, ParseIssue> {
    let cleaned = clean_value_token(token);
    if cleaned.is_empty() {
        return Err(field.malformed(name, "missing value"));
    }
    if !DECIMAL.is_match(cleaned) {
        return Err(field.malformed(
            name,
            format!("'{}' is not a decimal number", cleaned),
        ));
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|e| field.malformed(name, format!("'{}': {}", cleaned, e)))?;
    if !value.is_finite() {
        return Err(field.malformed(name, format!("'{}' is not finite", cleaned)));
    }
    if value < 0.0 {
        return Err(field.malformed(name, format!("{} is negative", value)));
    }
    Ok(value)
}

/// Drop a glued unit suffix such as `(cfs)` and trailing separators
pub fn clean_value_token(token: &str) -> &str {
    let head = match token.find('(') {
        Some(index) => &token[..index],
        None => token,
    };
    head.trim_end_matches([',', ';', ':'])
}
