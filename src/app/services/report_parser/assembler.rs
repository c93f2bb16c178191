//! Record assembly
//!
//! The assembler is an explicit state machine fed one classified and
//! extracted line at a time. Rational method reports move between
//! [`AssemblerState::Idle`] and [`AssemblerState::InNodeBlock`]; the node
//! pair seen at the start of a block is carried across the lines that
//! follow it, since flow lines never repeat it. Unit hydrograph reports
//! ignore node state and only track peak values.

use super::field_extractor::{Extracted, FlowFields, HydrographPoint};
use super::rules::RuleSet;
use crate::app::models::{
    CommandCase, HeaderMark, LineKind, NodePair, RationalMethodRecord, RawLine, ReportKind,
    UnitHydrographRecord,
};
use crate::error::ParseIssue;
use std::path::Path;
use tracing::debug;

/// Assembler state for rational method reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    /// No current node pair
    Idle,
    /// A node pair is set and its flow data is awaited
    InNodeBlock,
}

/// The block opened by the most recent node pair line
#[derive(Debug, Clone)]
struct NodeBlock {
    node_pair: NodePair,
    start_line: usize,
    start_text: String,
    command: Option<CommandCase>,
    summary_seen: bool,
    pending: FlowFields,
    emitted: usize,
    failed: bool,
}

impl NodeBlock {
    fn new(node_pair: NodePair, line: &RawLine<'_>) -> Self {
        Self {
            node_pair,
            start_line: line.number,
            start_text: line.text.trim().to_string(),
            command: None,
            summary_seen: false,
            pending: FlowFields::default(),
            emitted: 0,
            failed: false,
        }
    }

    fn is_confluence(&self) -> bool {
        self.command.is_some_and(|c| c.is_confluence())
    }

    /// Confluence blocks list every incoming stream before the merged result
    fn awaiting_summary(&self) -> bool {
        self.is_confluence() && !self.summary_seen
    }

    /// Block has produced its output or given up
    fn is_settled(&self) -> bool {
        self.emitted > 0 || self.failed
    }
}

/// Position relative to the runoff hydrograph table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TablePhase {
    Outside,
    Inside { rows: usize },
    Closed,
}

/// Per-file parse state, discarded once the file is parsed
#[derive(Debug)]
pub struct ParseState<'r> {
    path: &'r Path,
    rules: &'r RuleSet,
    report: ReportKind,
    state: AssemblerState,
    block: Option<NodeBlock>,
    node_pair_seen: bool,
    table: TablePhase,
    peak_flow: Option<f64>,
    peak_volume: Option<f64>,
    table_max_flow: Option<f64>,
    table_max_volume: Option<f64>,
    last_line: usize,
    last_text: String,
    records: Vec<RationalMethodRecord>,
    issues: Vec<ParseIssue>,
}

impl<'r> ParseState<'r> {
    fn new(path: &'r Path, rules: &'r RuleSet, report: ReportKind) -> Self {
        Self {
            path,
            rules,
            report,
            state: AssemblerState::Idle,
            block: None,
            node_pair_seen: false,
            table: TablePhase::Outside,
            peak_flow: None,
            peak_volume: None,
            table_max_flow: None,
            table_max_volume: None,
            last_line: 0,
            last_text: String::new(),
            records: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn report(&self) -> ReportKind {
        self.report
    }

    pub fn rules(&self) -> &RuleSet {
        self.rules
    }

    pub fn assembler_state(&self) -> AssemblerState {
        self.state
    }

    pub fn current_node_pair(&self) -> Option<&NodePair> {
        self.block.as_ref().map(|b| &b.node_pair)
    }

    /// Command announced in the current block, if any
    pub fn current_command(&self) -> Option<CommandCase> {
        self.block.as_ref().and_then(|b| b.command)
    }

    pub fn in_hydrograph_table(&self) -> bool {
        matches!(self.table, TablePhase::Inside { .. })
    }

    /// Rows read so far from the open hydrograph table
    pub fn hydrograph_rows(&self) -> usize {
        match self.table {
            TablePhase::Inside { rows } => rows,
            _ => 0,
        }
    }
}

/// Builds records from a stream of classified lines
#[derive(Debug)]
pub struct RecordAssembler<'r> {
    state: ParseState<'r>,
}

impl<'r> RecordAssembler<'r> {
    pub fn new(path: &'r Path, rules: &'r RuleSet, report: ReportKind) -> Self {
        Self {
            state: ParseState::new(path, rules, report),
        }
    }

    /// Current parse state, as seen by the classifier and extractor
    pub fn state(&self) -> &ParseState<'r> {
        &self.state
    }

    /// Feed one line
    pub fn accept(
        &mut self,
        line: &RawLine<'_>,
        kind: LineKind,
        extracted: Result<Extracted, ParseIssue>,
    ) {
        self.state.last_line = line.number;
        if !line.text.trim().is_empty() {
            self.state.last_text = line.text.trim().to_string();
        }

        let extracted = match extracted {
            Ok(extracted) => extracted,
            Err(issue) => {
                self.reject(kind, issue);
                return;
            }
        };

        match extracted {
            Extracted::NodePair(pair) => self.open_block(pair, line),
            Extracted::Flow(fields) => self.accept_flow(line, fields),
            Extracted::Header(mark) => self.accept_header(mark),
            Extracted::PeakFlow(value) => {
                self.state.peak_flow = Some(self.state.peak_flow.map_or(value, |p| p.max(value)));
            }
            Extracted::PeakVolume(value) => {
                self.state.peak_volume =
                    Some(self.state.peak_volume.map_or(value, |p| p.max(value)));
            }
            Extracted::HydrographRow(point) => self.accept_row(point),
            Extracted::Noise => {
                if self.state.block.as_ref().is_some_and(NodeBlock::is_settled) {
                    self.close_block();
                }
            }
        }
    }

    fn reject(&mut self, kind: LineKind, issue: ParseIssue) {
        debug!("Rejected line: {}", issue);
        match kind {
            LineKind::NodePairBlockStart => {
                self.close_block();
                self.state.node_pair_seen = true;
            }
            LineKind::FlowLine => {
                if let Some(block) = self.state.block.as_mut() {
                    block.failed = true;
                }
            }
            _ => {}
        }
        self.state.issues.push(issue);
    }

    fn open_block(&mut self, pair: NodePair, line: &RawLine<'_>) {
        self.close_block();
        debug!("Line {}: node block {}", line.number, pair);
        self.state.block = Some(NodeBlock::new(pair, line));
        self.state.node_pair_seen = true;
        self.state.state = AssemblerState::InNodeBlock;
    }

    fn close_block(&mut self) {
        if let Some(block) = self.state.block.take() {
            let pending = &block.pending;
            let missing = match (pending.flow_rate_cfs, pending.time_of_concentration_min) {
                (Some(_), Some(_)) => None,
                (Some(_), None) => Some("time of concentration"),
                (None, Some(_)) => Some("flow rate"),
                // An emitted block has its pending values reset
                (None, None) if block.emitted == 0 => Some("flow rate and time of concentration"),
                (None, None) => None,
            };
            let reportable = !block.failed && !block.awaiting_summary();
            if let Some(missing) = missing.filter(|_| reportable) {
                self.state.issues.push(ParseIssue::IncompleteRecord {
                    path: self.state.path.to_path_buf(),
                    line_number: block.start_line,
                    line: block.start_text.clone(),
                    record: self.state.report.record_name(),
                    missing,
                    file_level: false,
                });
            }
            debug!("Closed node block {}", block.node_pair);
        }
        self.state.state = AssemblerState::Idle;
    }

    fn accept_flow(&mut self, line: &RawLine<'_>, fields: FlowFields) {
        let Some(block) = self.state.block.as_mut() else {
            if self.state.node_pair_seen {
                debug!("Line {}: flow line outside a node block ignored", line.number);
            } else {
                self.state.issues.push(ParseIssue::OrphanFlowLine {
                    path: line.path.to_path_buf(),
                    line_number: line.number,
                    line: line.text.trim().to_string(),
                });
            }
            return;
        };

        if block.failed || block.awaiting_summary() {
            debug!("Line {}: flow line skipped in block {}", line.number, block.node_pair);
            return;
        }

        let pending = &mut block.pending;
        if pending.flow_rate_cfs.is_none() {
            pending.flow_rate_cfs = fields.flow_rate_cfs;
        }
        if pending.time_of_concentration_min.is_none() {
            pending.time_of_concentration_min = fields.time_of_concentration_min;
        }

        if let (Some(flow_rate_cfs), Some(time_of_concentration_min)) =
            (pending.flow_rate_cfs, pending.time_of_concentration_min)
        {
            let record = RationalMethodRecord {
                node_pair: block.node_pair.clone(),
                flow_rate_cfs,
                time_of_concentration_min,
                confluence: block.is_confluence(),
            };
            block.pending = FlowFields::default();
            block.emitted += 1;
            debug!(
                "Line {}: record {} Q={} TC={}",
                line.number, record.node_pair, flow_rate_cfs, time_of_concentration_min
            );
            self.state.records.push(record);
        }
    }

    fn accept_header(&mut self, mark: HeaderMark) {
        match mark {
            HeaderMark::Command(command) => {
                if let Some(block) = self.state.block.as_mut() {
                    if block.command.is_none() {
                        block.command = Some(command);
                    }
                }
            }
            HeaderMark::ConfluenceSummary => {
                if let Some(block) = self.state.block.as_mut() {
                    block.summary_seen = true;
                }
            }
            HeaderMark::HydrographStart => {
                if self.state.table == TablePhase::Outside {
                    self.state.table = TablePhase::Inside { rows: 0 };
                }
            }
            HeaderMark::HydrographEnd => {
                self.state.table = TablePhase::Closed;
            }
            HeaderMark::Banner(_) => {}
        }
    }

    fn accept_row(&mut self, point: HydrographPoint) {
        if let TablePhase::Inside { rows } = &mut self.state.table {
            *rows += 1;
        }
        let state = &mut self.state;
        state.table_max_flow = Some(
            state
                .table_max_flow
                .map_or(point.flow_cfs, |m| m.max(point.flow_cfs)),
        );
        state.table_max_volume = Some(
            state
                .table_max_volume
                .map_or(point.volume_acre_ft, |m| m.max(point.volume_acre_ft)),
        );
    }

    /// Finish a rational method report
    pub fn finish_rational(mut self) -> (Vec<RationalMethodRecord>, Vec<ParseIssue>) {
        self.close_block();
        (self.state.records, self.state.issues)
    }

    /// Finish a unit hydrograph report. Peak lines take precedence over
    /// table maxima; a value still missing means no record.
    pub fn finish_unit_hydrograph(
        mut self,
        source_file_name: &str,
    ) -> (Option<UnitHydrographRecord>, Vec<ParseIssue>) {
        let state = &mut self.state;
        let peak_flow = state.peak_flow.or(state.table_max_flow);
        let peak_volume = state.peak_volume.or(state.table_max_volume);

        let missing = match (peak_flow, peak_volume) {
            (Some(peak_flow_cfs), Some(peak_volume_acre_ft)) => {
                let record = UnitHydrographRecord {
                    source_file_name: source_file_name.to_string(),
                    peak_flow_cfs,
                    peak_volume_acre_ft,
                };
                return (Some(record), std::mem::take(&mut state.issues));
            }
            (Some(_), None) => "peak volume",
            (None, Some(_)) => "peak flow",
            (None, None) => "peak flow and peak volume",
        };

        state.issues.push(ParseIssue::IncompleteRecord {
            path: state.path.to_path_buf(),
            line_number: state.last_line,
            line: state.last_text.clone(),
            record: state.report.record_name(),
            missing,
            file_level: true,
        });
        (None, std::mem::take(&mut state.issues))
    }
}
