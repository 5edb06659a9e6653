//! .editorconfig checks against the resolved Prettier options
//!
//! Prettier reads `.editorconfig` too, so a disagreement between the two
//! files is worth a warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::find_file_upward;
use crate::options::{effective, Options};

/// Settings from the `[*]` section that Prettier maps onto its options
#[derive(Debug, Default)]
pub struct EditorConfigSettings {
    pub indent_style: Option<String>,
    pub indent_size: Option<i64>,
    pub max_line_length: Option<i64>,
    pub end_of_line: Option<String>,
}

/// Find .editorconfig by searching upward from the given directory.
pub fn find_editorconfig(start_dir: &Path) -> Option<PathBuf> {
    find_file_upward(start_dir, ".editorconfig", false)
}

/// Parse the `[*]` section of an .editorconfig file.
pub fn parse_editorconfig(path: &Path) -> io::Result<EditorConfigSettings> {
    let content = fs::read_to_string(path)?;
    let mut settings = EditorConfigSettings::default();
    let mut in_global_section = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            in_global_section = line == "[*]";
            continue;
        }

        if !in_global_section {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_lowercase();
            let value = value.trim().to_lowercase();

            match key.as_str() {
                "indent_style" => settings.indent_style = Some(value),
                "indent_size" => settings.indent_size = value.parse().ok(),
                "max_line_length" => settings.max_line_length = value.parse().ok(),
                "end_of_line" => settings.end_of_line = Some(value),
                _ => {}
            }
        }
    }

    Ok(settings)
}

/// Compare .editorconfig with the options Prettier will end up using.
///
/// `options` are the resolved options, `baseline` fills in the rest.
pub fn check_editorconfig_conflicts(
    settings: &EditorConfigSettings,
    options: &Options,
    baseline: &Options,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let option = |key: &str| effective(options, baseline, key);

    if let (Some(style), Some(use_tabs)) = (
        &settings.indent_style,
        option("useTabs").and_then(|v| v.as_bool()),
    ) {
        let wants_tabs = style == "tab";
        if wants_tabs != use_tabs {
            warnings.push(format!(
                "editorconfig has indent_style={style}, but useTabs is {use_tabs}"
            ));
        }
    }

    if let (Some(size), Some(tab_width)) = (
        settings.indent_size,
        option("tabWidth").and_then(|v| v.as_i64()),
    ) {
        if size != tab_width {
            warnings.push(format!(
                "editorconfig has indent_size={size}, but tabWidth is {tab_width}"
            ));
        }
    }

    if let (Some(max), Some(print_width)) = (
        settings.max_line_length,
        option("printWidth").and_then(|v| v.as_i64()),
    ) {
        if max != print_width {
            warnings.push(format!(
                "editorconfig has max_line_length={max}, but printWidth is {print_width}"
            ));
        }
    }

    if let (Some(eol), Some(end_of_line)) = (
        &settings.end_of_line,
        option("endOfLine").and_then(|v| v.as_str()),
    ) {
        if end_of_line != "auto" && eol != end_of_line {
            warnings.push(format!(
                "editorconfig has end_of_line={eol}, but endOfLine is {end_of_line}"
            ));
        }
    }

    warnings
}
