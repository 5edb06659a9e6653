//! Prettier option values and the option resolver.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single Prettier option value.
///
/// Options are scalars only; nested settings belong in override rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl OptionValue {
    /// Strict equality with numbers compared by value, so `80` and `80.0`
    /// are the same option value.
    pub fn same_as(&self, other: &OptionValue) -> bool {
        match (self, other) {
            (OptionValue::Integer(a), OptionValue::Float(b))
            | (OptionValue::Float(b), OptionValue::Integer(a)) => (*a as f64) == *b,
            _ => self == other,
        }
    }

    /// Parse a value given on the command line.
    pub fn parse(raw: &str) -> OptionValue {
        match raw {
            "true" => return OptionValue::Bool(true),
            "false" => return OptionValue::Bool(false),
            _ => {}
        }
        if let Ok(n) = raw.parse::<i64>() {
            return OptionValue::Integer(n);
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return OptionValue::Float(f);
            }
        }
        OptionValue::String(raw.to_string())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(n) => Some(*n),
            OptionValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Integer(n) => write!(f, "{n}"),
            OptionValue::Float(x) => write!(f, "{x}"),
            OptionValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Integer(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

/// Ordered map of option name to value.
pub type Options = IndexMap<String, OptionValue>;

/// Prettier's own defaults. Only used to decide which keys are redundant.
pub fn baseline_defaults() -> Options {
    [
        ("printWidth", OptionValue::Integer(80)),
        ("tabWidth", OptionValue::Integer(2)),
        ("useTabs", false.into()),
        ("semi", true.into()),
        ("singleQuote", false.into()),
        ("quoteProps", "as-needed".into()),
        ("jsxSingleQuote", false.into()),
        ("trailingComma", "es5".into()),
        ("bracketSpacing", true.into()),
        ("jsxBracketSameLine", false.into()),
        ("arrowParens", "always".into()),
        ("endOfLine", "lf".into()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// The house style. Always wins over caller-supplied options.
pub fn house_style() -> Options {
    [
        ("singleQuote", OptionValue::from(true)),
        ("printWidth", OptionValue::Integer(90)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Overlay `house` on `supplied`, then drop every key whose value equals
/// the baseline default.
pub fn resolve_options(supplied: &Options, house: &Options, baseline: &Options) -> Options {
    let mut merged = supplied.clone();
    for (key, value) in house {
        merged.insert(key.clone(), value.clone());
    }

    merged.retain(|key, value| {
        baseline
            .get(key)
            .map_or(true, |default| !value.same_as(default))
    });
    merged
}

/// The option value Prettier will actually use for `key`.
pub fn effective<'a>(
    options: &'a Options,
    baseline: &'a Options,
    key: &str,
) -> Option<&'a OptionValue> {
    options.get(key).or_else(|| baseline.get(key))
}
