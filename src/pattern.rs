//! File glob derivation from a project's scripts and dependencies.
//!
//! Not used when writing `.prettierrc.yml`; see `--print-pattern`.

use std::sync::OnceLock;

use regex::Regex;

use crate::manifest::PackageJson;

/// Extension always included for documentation files
const DOCS_EXT: &str = "md";
const DEFAULT_SCRIPT_EXTS: &[&str] = &["js"];
const TYPESCRIPT_EXTS: &[&str] = &["ts", "tsx"];
const DEFAULT_STYLE_EXTS: &[&str] = &["css"];

/// The `pattern` parameter: derive it, or use the one given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatternChoice {
    #[default]
    Auto,
    Explicit(String),
}

impl PatternChoice {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "auto" => PatternChoice::Auto,
            glob => PatternChoice::Explicit(glob.to_string()),
        }
    }

    pub fn resolve(&self, pkg: &PackageJson) -> String {
        match self {
            PatternChoice::Auto => derive_pattern(&PatternSources::from_manifest(pkg)),
            PatternChoice::Explicit(glob) => glob.clone(),
        }
    }
}

/// Project facts the deriver looks at.
#[derive(Debug, Default, Clone)]
pub struct PatternSources<'a> {
    pub format_script: Option<&'a str>,
    pub lint_script: Option<&'a str>,
    pub lint_css_script: Option<&'a str>,
    pub has_typescript: bool,
}

impl<'a> PatternSources<'a> {
    pub fn from_manifest(pkg: &'a PackageJson) -> Self {
        Self {
            format_script: pkg.script("format"),
            lint_script: pkg.script("lint"),
            lint_css_script: pkg.script("lint:css"),
            has_typescript: pkg.has_dev_dependency("typescript"),
        }
    }
}

fn owned(exts: &[&str]) -> Vec<String> {
    exts.iter().map(|e| e.to_string()).collect()
}

/// Build a `**/*.{...}` glob.
///
/// Script extensions: ESLint `--ext` > TypeScript > `js`.
/// Style extensions: Stylelint glob > `css`.
/// Extensions already in the format script come first, `md` last.
pub fn derive_pattern(sources: &PatternSources<'_>) -> String {
    let format_exts = exts_from_command(sources.format_script, None).unwrap_or_default();

    let script_exts = exts_from_command(sources.lint_script, Some("ext"))
        .or_else(|| sources.has_typescript.then(|| owned(TYPESCRIPT_EXTS)))
        .unwrap_or_else(|| owned(DEFAULT_SCRIPT_EXTS));

    let style_exts = exts_from_command(sources.lint_css_script, None)
        .unwrap_or_else(|| owned(DEFAULT_STYLE_EXTS));

    let mut exts: Vec<String> = Vec::new();
    for ext in format_exts
        .into_iter()
        .chain(script_exts)
        .chain(style_exts)
        .chain(std::iter::once(DOCS_EXT.to_string()))
    {
        if !ext.is_empty() && !exts.contains(&ext) {
            exts.push(ext);
        }
    }

    format!("**/*.{{{}}}", exts.join(","))
}

fn glob_ext_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*\.(?:\{([^}]*)\}|([\w-]+))").expect("glob extension regex is valid")
    })
}

fn split_exts(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_string())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Extract file extensions from a command line.
///
/// With `arg`, reads the comma-separated value of `--<arg>`. Without it,
/// reads the first glob argument (`"src/**/*.{js,ts}"`, `*.css`).
/// Returns `None` when the command is absent or holds no extensions.
pub fn exts_from_command(command: Option<&str>, arg: Option<&str>) -> Option<Vec<String>> {
    let command = command?;
    let tokens: Vec<&str> = command
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c == '"' || c == '\''))
        .collect();

    let exts = match arg {
        Some(arg) => {
            let flag = format!("--{arg}");
            let inline = format!("--{arg}=");
            let value = tokens.iter().enumerate().find_map(|(i, token)| {
                if *token == flag {
                    tokens.get(i + 1).copied()
                } else {
                    token.strip_prefix(inline.as_str())
                }
            })?;
            split_exts(value)
        }
        None => {
            let glob = tokens.iter().find(|token| token.contains("*."))?;
            let caps = glob_ext_regex().captures(glob)?;
            let list = caps.get(1).or_else(|| caps.get(2))?.as_str();
            split_exts(list)
        }
    };

    (!exts.is_empty()).then_some(exts)
}
