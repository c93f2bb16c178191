//! County rule sets
//!
//! A [`RuleSet`] bundles everything that differs between county report
//! conventions: the banner signature, command banners, the key phrases that
//! carry flow and time of concentration for each command, and the unit
//! hydrograph peak phrases. Rule sets are plain values built from a
//! [`Convention`] tag, optionally merged with configured overrides.
//!
//! All phrases are stored normalized (lower case, single spaces) and are
//! matched against normalized report lines.

use crate::app::models::{CommandCase, Convention};
use crate::config::{RuleOverrides, normalize_phrase};
use std::collections::HashMap;

/// Which `=` on a line the value follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePosition {
    /// First token after the first `=` following the phrase
    AfterFirstEquals,
    /// First token after the last `=` on the line
    AfterLastEquals,
}

/// A key phrase anchored at the start of a line, followed by `= value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRule {
    pub phrase: String,
    pub position: ValuePosition,
}

impl PhraseRule {
    pub fn new(phrase: &str) -> Self {
        Self {
            phrase: normalize_phrase(phrase),
            position: ValuePosition::AfterFirstEquals,
        }
    }

    pub fn after_last_equals(phrase: &str) -> Self {
        Self {
            phrase: normalize_phrase(phrase),
            position: ValuePosition::AfterLastEquals,
        }
    }

    /// Whether a normalized line starts with this phrase and assigns a value
    pub fn matches(&self, normalized: &str) -> bool {
        let Some(rest) = normalized.strip_prefix(self.phrase.as_str()) else {
            return false;
        };
        // Reject partial words: "total runoff" must not match "total runoffs"
        let boundary = rest
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphanumeric());
        boundary && rest.contains('=')
    }

    /// Text following the `=` this rule reads its value from
    pub fn value_text<'a>(&self, normalized: &'a str) -> Option<&'a str> {
        let rest = normalized.get(self.phrase.len()..)?;
        let index = match self.position {
            ValuePosition::AfterFirstEquals => rest.find('=')?,
            ValuePosition::AfterLastEquals => rest.rfind('=')?,
        };
        Some(&rest[index + 1..])
    }
}

/// Token positions used to read node identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePairRule {
    /// Leading token of the compact `NODE 101-102` form
    pub compact_marker: &'static str,
    /// Token index of the `<id>-<id>` label in the compact form
    pub compact_index: usize,
    /// Leading phrase of the `Process from Point/Station` form
    pub station_prefix: &'static str,
    /// Token index of the upstream station
    pub from_index: usize,
    /// Token index of the downstream station
    pub to_index: usize,
}

impl Default for NodePairRule {
    fn default() -> Self {
        Self {
            compact_marker: "node",
            compact_index: 1,
            station_prefix: "process from point/station",
            from_index: 3,
            to_index: 6,
        }
    }
}

/// Classifier patterns and field rules for one county convention
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    convention: Convention,
    signature: String,
    node_pair: NodePairRule,
    commands: Vec<(CommandCase, Vec<String>)>,
    flowrate: HashMap<CommandCase, Vec<PhraseRule>>,
    time_of_concentration: HashMap<CommandCase, Vec<PhraseRule>>,
    confluence_summary: String,
    peak_flow: Vec<PhraseRule>,
    peak_volume: Vec<PhraseRule>,
    hydrograph_start: String,
}

/// Command banners shared by both county programs, in match order.
/// Street flow precedes subarea addition since its banner contains it.
const COMMAND_BANNERS: &[(CommandCase, &[&str])] = &[
    (CommandCase::InitialArea, &["initial area evaluation"]),
    (
        CommandCase::StreetFlow,
        &["street flow travel time + subarea flow addition", "street flow travel time"],
    ),
    (CommandCase::StreetInlet, &["street inlet"]),
    (CommandCase::SubareaAddition, &["subarea flow addition"]),
    (
        CommandCase::PipeflowProgram,
        &["pipeflow travel time (program estimated size)"],
    ),
    (
        CommandCase::PipeflowUser,
        &["pipeflow travel time (user specified size)"],
    ),
    (CommandCase::ChannelImproved, &["improved channel travel time"]),
    (CommandCase::ChannelIrregular, &["irregular channel travel time"]),
    (CommandCase::User, &["user specified hydrology data at a point"]),
    (CommandCase::ConfluenceMinor, &["confluence of minor streams"]),
    (CommandCase::ConfluenceMain, &["confluence of main streams"]),
];

const TRAVEL_COMMANDS: [CommandCase; 8] = [
    CommandCase::StreetFlow,
    CommandCase::StreetInlet,
    CommandCase::SubareaAddition,
    CommandCase::PipeflowProgram,
    CommandCase::PipeflowUser,
    CommandCase::ChannelImproved,
    CommandCase::ChannelIrregular,
    CommandCase::User,
];

impl RuleSet {
    /// Built-in rule set for a county convention
    pub fn for_convention(convention: Convention) -> Self {
        let commands: Vec<(CommandCase, Vec<String>)> = COMMAND_BANNERS
            .iter()
            .map(|(case, banners)| (*case, banners.iter().map(|b| normalize_phrase(b)).collect()))
            .collect();

        let mut flowrate = HashMap::new();
        let mut time_of_concentration = HashMap::new();
        for case in TRAVEL_COMMANDS {
            flowrate.insert(case, phrases(&["total runoff"]));
            time_of_concentration.insert(case, phrases(&["time of concentration"]));
        }
        time_of_concentration.insert(
            CommandCase::InitialArea,
            phrases(&["initial area time of concentration"]),
        );
        for case in [CommandCase::ConfluenceMinor, CommandCase::ConfluenceMain] {
            time_of_concentration.insert(case, phrases(&["time of concentration"]));
        }

        match convention {
            Convention::SanBernardino => {
                flowrate.insert(CommandCase::InitialArea, phrases(&["subarea runoff"]));
                for case in [CommandCase::ConfluenceMinor, CommandCase::ConfluenceMain] {
                    flowrate.insert(case, phrases(&["total flow rate"]));
                }
                Self {
                    convention,
                    signature: "san bernardino".to_string(),
                    node_pair: NodePairRule::default(),
                    commands,
                    flowrate,
                    time_of_concentration,
                    confluence_summary: "summary of stream data".to_string(),
                    peak_flow: phrases(&["peak flow rate in flood hydrograph", "peak flow"]),
                    peak_volume: vec![
                        PhraseRule::new("peak volume"),
                        PhraseRule::new("total runoff volume"),
                        PhraseRule::after_last_equals("flood volume"),
                    ],
                    hydrograph_start: normalize_phrase("R u n o f f      H y d r o g r a p h"),
                }
            }
            Convention::Riverside => {
                flowrate.insert(
                    CommandCase::InitialArea,
                    phrases(&["subarea runoff", "initial area runoff"]),
                );
                for case in [CommandCase::ConfluenceMinor, CommandCase::ConfluenceMain] {
                    flowrate.insert(case, phrases(&["total flow rate", "effective stream flow"]));
                }
                Self {
                    convention,
                    signature: "riverside".to_string(),
                    node_pair: NodePairRule::default(),
                    commands,
                    flowrate,
                    time_of_concentration,
                    confluence_summary: "confluence information".to_string(),
                    peak_flow: phrases(&["peak flow rate of this hydrograph", "peak flow"]),
                    peak_volume: vec![
                        PhraseRule::new("peak volume"),
                        PhraseRule::new("total runoff volume"),
                        PhraseRule::after_last_equals("flood volume"),
                    ],
                    hydrograph_start: normalize_phrase("R u n o f f      H y d r o g r a p h"),
                }
            }
        }
    }

    /// Built-in rule set with configured keyword lists merged in
    pub fn with_overrides(mut self, overrides: &RuleOverrides) -> Self {
        for (case, keywords) in &overrides.commands {
            let banners = keywords.phrases();
            match self.commands.iter_mut().find(|(c, _)| c == case) {
                Some((_, existing)) => *existing = banners,
                None => self.commands.push((*case, banners)),
            }
        }
        for (case, keywords) in &overrides.flowrate {
            let rules = keywords.phrases().iter().map(|p| PhraseRule::new(p)).collect();
            self.flowrate.insert(*case, rules);
        }
        for (case, keywords) in &overrides.time_of_concentration {
            let rules = keywords.phrases().iter().map(|p| PhraseRule::new(p)).collect();
            self.time_of_concentration.insert(*case, rules);
        }
        if let Some(summary) = &overrides.confluence_summary_text {
            self.confluence_summary = normalize_phrase(summary);
        }
        self
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    /// Phrase identifying this county in report banners
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn node_pair(&self) -> &NodePairRule {
        &self.node_pair
    }

    /// Command announced by a banner line
    pub fn match_command(&self, normalized: &str) -> Option<CommandCase> {
        self.commands
            .iter()
            .find(|(_, banners)| banners.iter().any(|b| normalized.contains(b.as_str())))
            .map(|(case, _)| *case)
    }

    /// Flow rate phrase matching the line for the given command
    pub fn match_flowrate(&self, command: CommandCase, normalized: &str) -> Option<&PhraseRule> {
        self.flowrate
            .get(&command)?
            .iter()
            .find(|rule| rule.matches(normalized))
    }

    /// Time of concentration phrase matching the line for the given command
    pub fn match_time_of_concentration(
        &self,
        command: CommandCase,
        normalized: &str,
    ) -> Option<&PhraseRule> {
        self.time_of_concentration
            .get(&command)?
            .iter()
            .find(|rule| rule.matches(normalized))
    }

    pub fn is_confluence_summary(&self, normalized: &str) -> bool {
        !self.confluence_summary.is_empty() && normalized.contains(self.confluence_summary.as_str())
    }

    pub fn match_peak_flow(&self, normalized: &str) -> Option<&PhraseRule> {
        self.peak_flow.iter().find(|rule| rule.matches(normalized))
    }

    pub fn match_peak_volume(&self, normalized: &str) -> Option<&PhraseRule> {
        self.peak_volume.iter().find(|rule| rule.matches(normalized))
    }

    pub fn is_hydrograph_start(&self, normalized: &str) -> bool {
        normalized.contains(self.hydrograph_start.as_str())
    }
}

fn phrases(list: &[&str]) -> Vec<PhraseRule> {
    list.iter().map(|p| PhraseRule::new(p)).collect()
}
