use crate::colors::{Colors, Tone};
use crate::options::Options;
use crate::TaskConfig;
use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Diff,
}

/// What to do about the `prettier` dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    Skip,
    /// Declare it in package.json only
    Manifest,
    /// Declare it and run the package manager
    PackageManager,
}

pub struct Config {
    pub check_only: bool,
    pub install: InstallMode,
    pub task: TaskConfig,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub verbose: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, verbose: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            verbose,
        }
    }

    fn label(&self, tone: Tone, text: &str) -> String {
        self.colors.paint(tone, text)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    /// `.prettierrc.yml` was (or in check mode, would be) rewritten
    pub prettierrc_changed: bool,
    /// `name@constraint` of every dependency added (or to be added)
    pub dependencies_added: Vec<String>,
}

impl RunResult {
    pub fn has_changes(&self) -> bool {
        self.prettierrc_changed || !self.dependencies_added.is_empty()
    }
}

pub fn print_file_result(
    name: &str,
    created: bool,
    changed: bool,
    config: &Config,
    ctx: &OutputContext,
) {
    if !changed {
        if ctx.verbose && ctx.mode != OutputMode::Quiet {
            println!("{} {name}", ctx.label(Tone::Info, "Unchanged:"));
        }
        return;
    }

    if ctx.mode == OutputMode::Quiet {
        println!("{name}");
        return;
    }

    let label = match (config.check_only, created) {
        (true, _) => ctx.label(Tone::Error, "Would update:"),
        (false, true) => ctx.label(Tone::Success, "Created:"),
        (false, false) => ctx.label(Tone::Success, "Updated:"),
    };
    println!("{label} {name}");
}

pub fn print_dependencies(
    manifest: &str,
    added: &[String],
    config: &Config,
    ctx: &OutputContext,
) {
    if added.is_empty() {
        return;
    }
    if ctx.mode == OutputMode::Quiet {
        println!("{manifest}");
        return;
    }

    let label = if config.check_only {
        ctx.label(Tone::Error, "Would add:")
    } else {
        ctx.label(Tone::Success, "Added:")
    };
    for package in added {
        println!("{label} {package} to devDependencies");
    }
}

pub fn print_warning(message: &str, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    eprintln!("{} {message}", ctx.label(Tone::Warning, "Warning:"));
}

pub fn print_options(options: &Options, ctx: &OutputContext) {
    if !ctx.verbose || ctx.mode == OutputMode::Quiet {
        return;
    }
    if options.is_empty() {
        println!("{} all options at defaults", ctx.label(Tone::Info, "Options:"));
        return;
    }
    let rendered: Vec<String> = options.iter().map(|(k, v)| format!("{k}={v}")).collect();
    println!("{} {}", ctx.label(Tone::Info, "Options:"), rendered.join(", "));
}

pub fn print_diff(label: &str, original: &str, content: &str) {
    let diff = TextDiff::from_lines(original, content);

    println!("--- {label}");
    println!("+++ {label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            println!();
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                print!("{sign}{change}");
            }
        }
    }
}
