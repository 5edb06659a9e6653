//! Configuration merging logic
//!
//! Priority: CLI args > prettier-setup.toml > defaults

use crate::options::{OptionValue, Options};
use crate::pattern::PatternChoice;
use crate::TaskConfig;

use super::toml_schema::PrettierSection;

/// Task settings given on the command line.
#[derive(Debug, Default)]
pub struct CliTaskOptions {
    /// `--option KEY=VALUE`, in the order given
    pub options: Vec<(String, OptionValue)>,
    /// `--pattern`
    pub pattern: Option<String>,
}

/// Parse a `KEY=VALUE` option argument.
pub fn parse_option_arg(raw: &str) -> Result<(String, OptionValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing option name in `{raw}`"));
    }
    Ok((key.to_string(), OptionValue::parse(value.trim())))
}

/// Merge CLI settings and the TOML section into a [`TaskConfig`].
///
/// Options merge key by key. Overrides only come from TOML.
pub fn merge_task_config(cli: &CliTaskOptions, toml: Option<&PrettierSection>) -> TaskConfig {
    let mut options: Options = toml.map(|t| t.options.clone()).unwrap_or_default();
    for (key, value) in &cli.options {
        options.insert(key.clone(), value.clone());
    }

    let pattern = cli
        .pattern
        .as_deref()
        .or_else(|| toml.and_then(|t| t.pattern.as_deref()))
        .map(PatternChoice::parse)
        .unwrap_or_default();

    TaskConfig {
        options,
        overrides: toml.and_then(|t| t.overrides.clone()).unwrap_or_default(),
        pattern,
    }
}
