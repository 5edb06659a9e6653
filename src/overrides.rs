//! File-pattern-scoped override rules and the override merger.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The `files` key of an override rule: one glob or a list of globs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilesPattern {
    One(String),
    Many(Vec<String>),
}

impl fmt::Display for FilesPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilesPattern::One(glob) => f.write_str(glob),
            FilesPattern::Many(globs) => write!(f, "[{}]", globs.join(", ")),
        }
    }
}

impl From<&str> for FilesPattern {
    fn from(glob: &str) -> Self {
        FilesPattern::One(glob.to_string())
    }
}

/// An entry of the `overrides` list in `.prettierrc.yml`.
///
/// `files` is the rule's key. Everything else is kept as-is, in order, so
/// both `{files, tabWidth}` and `{files, options: {...}}` shapes survive a
/// read-modify-write cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub files: FilesPattern,
    #[serde(flatten)]
    pub settings: IndexMap<String, serde_yaml::Value>,
}

impl OverrideRule {
    pub fn new(files: impl Into<FilesPattern>) -> Self {
        Self {
            files: files.into(),
            settings: IndexMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<serde_yaml::Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }
}

/// An entry read from an existing `overrides` list.
///
/// Entries without a usable `files` key (a missing or numeric `files`, a
/// scalar entry) are carried through as raw YAML and never replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideEntry {
    Rule(OverrideRule),
    Other(serde_yaml::Value),
}

impl OverrideEntry {
    pub fn files(&self) -> Option<&FilesPattern> {
        match self {
            OverrideEntry::Rule(rule) => Some(&rule.files),
            OverrideEntry::Other(_) => None,
        }
    }
}

impl From<OverrideRule> for OverrideEntry {
    fn from(rule: OverrideRule) -> Self {
        OverrideEntry::Rule(rule)
    }
}

/// Merge incoming rules into an existing list.
///
/// Existing entries whose `files` pattern is re-supplied are dropped; the
/// survivors keep their order and the incoming rules follow them.
pub fn merge_overrides(
    existing: &[OverrideEntry],
    incoming: &[OverrideRule],
) -> Vec<OverrideEntry> {
    let replaced: HashSet<&FilesPattern> = incoming.iter().map(|rule| &rule.files).collect();

    existing
        .iter()
        .filter(|entry| entry.files().map_or(true, |files| !replaced.contains(files)))
        .cloned()
        .chain(incoming.iter().cloned().map(OverrideEntry::from))
        .collect()
}
