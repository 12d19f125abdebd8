//! Project configuration loading and normalization.
//!
//! The configuration lives in a single `.rbspeed.yml` at the project root.
//! Two top-level keys are recognized: `speedups` (check id → enabled flag)
//! and `exclude_paths` (glob patterns relative to the root). Anything else
//! in the document is ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

/// Well-known configuration file name, looked up directly under the scan root.
pub const CONFIG_FILE_NAME: &str = ".rbspeed.yml";

/// Resolved per-run configuration. Both fields are always present; the
/// canonical empty configuration is `Config::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Per-check enable/disable flags. Checks default to enabled, so only
    /// entries mapping an id to `false` have an effect in practice.
    pub speedups: BTreeMap<String, bool>,
    /// Glob patterns matched against root-relative paths; a match removes
    /// the file from the scan.
    pub exclude_paths: Vec<String>,
}

impl Config {
    /// Load and normalize the configuration found under `root`.
    ///
    /// An absent, empty or malformed document resolves to the canonical
    /// empty configuration; nothing here is an error. The document counts
    /// as present only when it is a mapping holding a non-empty value for
    /// at least one recognized key, so a file spelling out
    /// `speedups:` / `exclude_paths:` with nothing behind them is treated
    /// exactly like no file at all. Once that bar is met, the two keys
    /// resolve independently: a non-empty value is taken verbatim, an
    /// absent or empty one falls back to its default.
    pub fn resolve(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE_NAME);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        if content.trim().is_empty() {
            return Self::default();
        }

        let doc: Value = match serde_yaml::from_str(&content) {
            Ok(doc) => doc,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Ignoring malformed config file");
                return Self::default();
            }
        };

        let speedups = non_empty_mapping(&doc, "speedups");
        let exclude_paths = non_empty_sequence(&doc, "exclude_paths");

        // Document triviality test: both keys absent or empty means the
        // whole document is treated as absent.
        if speedups.is_none() && exclude_paths.is_none() {
            return Self::default();
        }

        Self {
            speedups: speedups.map(collect_flags).unwrap_or_default(),
            exclude_paths: exclude_paths.map(collect_patterns).unwrap_or_default(),
        }
    }

    /// Whether the check with the given id should run. Checks are enabled
    /// unless the configuration explicitly maps them to `false`.
    pub fn is_check_enabled(&self, id: &str) -> bool {
        self.speedups.get(id).copied().unwrap_or(true)
    }
}

fn non_empty_mapping<'a>(doc: &'a Value, key: &str) -> Option<&'a serde_yaml::Mapping> {
    doc.get(key)?.as_mapping().filter(|m| !m.is_empty())
}

fn non_empty_sequence<'a>(doc: &'a Value, key: &str) -> Option<&'a serde_yaml::Sequence> {
    doc.get(key)?.as_sequence().filter(|s| !s.is_empty())
}

fn collect_flags(mapping: &serde_yaml::Mapping) -> BTreeMap<String, bool> {
    mapping
        .iter()
        .filter_map(|(key, value)| {
            let key = key.as_str()?;
            match value.as_bool() {
                Some(flag) => Some((key.to_string(), flag)),
                None => {
                    debug!(check = key, "Ignoring non-boolean speedups entry");
                    None
                }
            }
        })
        .collect()
}

fn collect_patterns(sequence: &serde_yaml::Sequence) -> Vec<String> {
    sequence
        .iter()
        .filter_map(|value| value.as_str().map(String::from))
        .collect()
}
