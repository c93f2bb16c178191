//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then the user configuration file
//! (`<config dir>/rmparse/config.yaml`) or an explicit `--config` file, then
//! command line flags applied through the `with_*` builders.
//!
//! ```yaml
//! probe_lines: 120
//! digits: 3
//! county: riverside
//! rules:
//!   san_bernardino:
//!     commands:
//!       initial_area: "initial area evaluation"
//!     flowrate:
//!       initial_area: ["subarea runoff", "initial area runoff"]
//!     time_of_concentration:
//!       initial_area: "initial area time of concentration"
//!     confluence_summary_text: "summary of stream data"
//! ```

use crate::app::models::{CommandCase, Convention};
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DIGITS, DEFAULT_PROBE_LINES, MAX_DIGITS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Leading lines searched for a county signature
    pub probe_lines: usize,

    /// Decimals used when rendering numbers
    pub digits: usize,

    /// Convention forced for every file instead of detection
    pub county: Option<Convention>,

    /// Keyword overrides merged into the built-in county rule sets
    pub rules: HashMap<Convention, RuleOverrides>,
}

/// Per-county keyword overrides, mirroring the county template files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    /// Banner phrases identifying each command
    pub commands: HashMap<CommandCase, KeywordList>,

    /// Phrases whose value is the block's flow rate
    pub flowrate: HashMap<CommandCase, KeywordList>,

    /// Phrases whose value is the block's time of concentration
    pub time_of_concentration: HashMap<CommandCase, KeywordList>,

    /// Phrase opening a confluence stream summary
    pub confluence_summary_text: Option<String>,
}

/// A single phrase or a list of phrases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordList {
    One(String),
    Many(Vec<String>),
}

impl KeywordList {
    /// Normalized phrases: lower-cased with whitespace runs collapsed
    pub fn phrases(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            KeywordList::One(phrase) => vec![phrase.as_str()],
            KeywordList::Many(phrases) => phrases.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(normalize_phrase)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Lower-case a phrase and collapse its whitespace runs
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_lines: DEFAULT_PROBE_LINES,
            digits: DEFAULT_DIGITS,
            county: None,
            rules: HashMap::new(),
        }
    }
}

impl Config {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Config =
            serde_yaml::from_str(&text).map_err(|e| Error::config_format(path, e))?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the explicit file if given, else the user file if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Location of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.probe_lines == 0 {
            return Err(Error::configuration(
                "probe_lines must be greater than 0".to_string(),
            ));
        }
        if self.digits > MAX_DIGITS {
            return Err(Error::configuration(format!(
                "digits cannot exceed {}",
                MAX_DIGITS
            )));
        }
        Ok(())
    }

    /// Override the number of rendered decimals
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    /// Force a county convention for every file
    pub fn with_county(mut self, county: Convention) -> Self {
        self.county = Some(county);
        self
    }

    /// Override the number of lines probed for a county signature
    pub fn with_probe_lines(mut self, probe_lines: usize) -> Self {
        self.probe_lines = probe_lines;
        self
    }

    /// Add keyword overrides for one county
    pub fn with_rule_overrides(mut self, convention: Convention, overrides: RuleOverrides) -> Self {
        self.rules.insert(convention, overrides);
        self
    }

    /// Overrides configured for a county, if any
    pub fn overrides_for(&self, convention: Convention) -> Option<&RuleOverrides> {
        self.rules.get(&convention)
    }
}
