pub mod colors;
pub mod config;
mod error;
pub mod manifest;
pub mod options;
mod output;
pub mod overrides;
pub mod pattern;
pub mod prettierrc;

pub use colors::{should_use_colors, Colors};
pub use config::{
    check_editorconfig_conflicts, find_config_file, find_editorconfig, find_project_root,
    generate_init_file_in, load_config, merge_task_config, parse_editorconfig, parse_option_arg,
    CliTaskOptions, ConfigError, PrettierSection, TaskToml, CONFIG_FILE, TASK_TOML_TEMPLATE,
};
pub use error::TaskError;
pub use manifest::{install, InstallReport, PackageJson, PackageManager, PACKAGE_JSON};
pub use options::{baseline_defaults, house_style, resolve_options, OptionValue, Options};
pub use output::{print_diff, Config, InstallMode, OutputContext, OutputMode, RunResult};
pub use overrides::{merge_overrides, FilesPattern, OverrideEntry, OverrideRule};
pub use pattern::{derive_pattern, exts_from_command, PatternChoice, PatternSources};
pub use prettierrc::{PrettierRc, PRETTIERRC};

use std::path::Path;

use manifest::Package;

/// Dependencies the task installs
const PACKAGES: &[Package<'static>] = &[("prettier", ">=2")];

/// Caller-supplied task settings
#[derive(Debug, Default, Clone)]
pub struct TaskConfig {
    /// Options to write; the house style wins on shared keys
    pub options: Options,
    /// Override rules to merge into the existing list
    pub overrides: Vec<OverrideRule>,
    /// File glob parameter. Not used when writing `.prettierrc.yml`.
    pub pattern: PatternChoice,
}

/// Main entry point: update `.prettierrc.yml` and install Prettier
pub fn run(
    project_dir: &Path,
    config: &Config,
    ctx: &OutputContext,
) -> Result<RunResult, TaskError> {
    let task = &config.task;
    let baseline = baseline_defaults();

    let options = resolve_options(&task.options, &house_style(), &baseline);
    output::print_options(&options, ctx);

    let mut prettierrc = PrettierRc::load(project_dir)?;
    let overrides = merge_overrides(&prettierrc.overrides()?, &task.overrides);

    prettierrc.merge_options(&options)?;
    prettierrc.set_overrides(&overrides)?;

    for warning in editorconfig_warnings(project_dir, &prettierrc.options(), &baseline, ctx) {
        output::print_warning(&warning, ctx);
    }

    let changed = prettierrc.is_changed()?;
    if changed {
        if !config.check_only {
            prettierrc.save()?;
        }
        if ctx.mode == OutputMode::Diff {
            let original = prettierrc.original().unwrap_or_default();
            print_diff(PRETTIERRC, original, &prettierrc.render()?);
        }
    }
    let created = prettierrc.original().is_none();
    output::print_file_result(PRETTIERRC, created, changed, config, ctx);

    let dependencies_added = match config.install {
        InstallMode::Skip => Vec::new(),
        _ if config.check_only => {
            let mut pkg = PackageJson::load(project_dir)?;
            manifest::plan_install(&mut pkg, PACKAGES)
        }
        InstallMode::Manifest => install(project_dir, PACKAGES, false)?.added,
        InstallMode::PackageManager => install(project_dir, PACKAGES, true)?.added,
    };
    output::print_dependencies(PACKAGE_JSON, &dependencies_added, config, ctx);

    Ok(RunResult {
        prettierrc_changed: changed,
        dependencies_added,
    })
}

/// Resolve the `pattern` parameter. Only `Auto` reads package.json.
pub fn resolve_pattern(project_dir: &Path, choice: &PatternChoice) -> Result<String, TaskError> {
    match choice {
        PatternChoice::Auto => Ok(choice.resolve(&PackageJson::load(project_dir)?)),
        PatternChoice::Explicit(glob) => Ok(glob.clone()),
    }
}

/// Conflicts between .editorconfig and the options in the written document.
fn editorconfig_warnings(
    project_dir: &Path,
    options: &Options,
    baseline: &Options,
    ctx: &OutputContext,
) -> Vec<String> {
    let Some(path) = find_editorconfig(project_dir) else {
        return Vec::new();
    };
    match parse_editorconfig(&path) {
        Ok(settings) => check_editorconfig_conflicts(&settings, options, baseline),
        Err(e) => {
            if ctx.verbose {
                output::print_warning(&format!("cannot read {}: {e}", path.display()), ctx);
            }
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PACKAGE_JSON), r#"{"name":"demo"}"#).unwrap();
        dir
    }

    fn quiet() -> OutputContext {
        OutputContext::new(OutputMode::Quiet, false, false)
    }

    fn config(task: TaskConfig) -> Config {
        Config {
            check_only: false,
            install: InstallMode::Manifest,
            task,
        }
    }

    fn prettierrc(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join(PRETTIERRC)).unwrap()
    }

    #[test]
    fn test_house_style_scenario_on_empty_project() {
        let dir = project();
        let mut task = TaskConfig::default();
        task.options
            .insert("singleQuote".to_string(), OptionValue::Bool(false));
        task.options
            .insert("printWidth".to_string(), OptionValue::Integer(90));

        let result = run(dir.path(), &config(task), &quiet()).unwrap();

        assert!(result.prettierrc_changed);
        assert_eq!(
            prettierrc(&dir),
            "singleQuote: true\nprintWidth: 90\noverrides: []\n"
        );
        assert_eq!(result.dependencies_added, vec!["prettier@>=2".to_string()]);
        let pkg = PackageJson::load(dir.path()).unwrap();
        assert!(pkg.has_dev_dependency("prettier"));
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let dir = project();
        let mut task = TaskConfig::default();
        task.options
            .insert("useTabs".to_string(), OptionValue::Bool(true));
        task.overrides = vec![OverrideRule::new("*.md").with("proseWrap", "always")];
        let config = config(task);

        run(dir.path(), &config, &quiet()).unwrap();
        let first = prettierrc(&dir);

        let second = run(dir.path(), &config, &quiet()).unwrap();
        assert_eq!(second, RunResult::default());
        assert_eq!(prettierrc(&dir), first);
    }

    #[test]
    fn test_incoming_override_replaces_existing_pattern() {
        let dir = project();
        fs::write(
            dir.path().join(PRETTIERRC),
            "overrides:\n  - files: '*.md'\n    proseWrap: always\n",
        )
        .unwrap();

        let task = TaskConfig {
            overrides: vec![OverrideRule::new("*.md").with("tabWidth", 4)],
            ..Default::default()
        };
        run(dir.path(), &config(task), &quiet()).unwrap();

        let rc = PrettierRc::load(dir.path()).unwrap();
        assert_eq!(
            rc.overrides().unwrap(),
            vec![OverrideRule::new("*.md").with("tabWidth", 4).into()]
        );
    }

    #[test]
    fn test_existing_keys_survive_and_overrides_move_last() {
        let dir = project();
        fs::write(
            dir.path().join(PRETTIERRC),
            "overrides:\n  - files: '*.json'\n    tabWidth: 4\nsemi: false\n",
        )
        .unwrap();

        run(dir.path(), &config(TaskConfig::default()), &quiet()).unwrap();

        let content = prettierrc(&dir);
        let positions: Vec<usize> = ["semi:", "singleQuote:", "printWidth:", "overrides:"]
            .iter()
            .map(|key| content.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let rc = PrettierRc::load(dir.path()).unwrap();
        assert_eq!(
            rc.overrides().unwrap(),
            vec![OverrideRule::new("*.json").with("tabWidth", 4).into()]
        );
    }

    #[test]
    fn test_existing_entries_without_files_are_kept() {
        let dir = project();
        fs::write(
            dir.path().join(PRETTIERRC),
            "overrides:\n  - excludeFiles: '*.min.js'\n    semi: false\n",
        )
        .unwrap();

        let task = TaskConfig {
            overrides: vec![OverrideRule::new("*.md").with("proseWrap", "always")],
            ..Default::default()
        };
        run(dir.path(), &config(task), &quiet()).unwrap();

        let overrides = PrettierRc::load(dir.path()).unwrap().overrides().unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides[0].files(), None);
        assert_eq!(
            overrides[1],
            OverrideRule::new("*.md").with("proseWrap", "always").into()
        );
        assert!(prettierrc(&dir).contains("excludeFiles"));
    }

    #[test]
    fn test_editorconfig_checked_against_existing_file_options() {
        let dir = project();
        fs::write(dir.path().join(PRETTIERRC), "useTabs: true\n").unwrap();
        fs::write(dir.path().join(".editorconfig"), "[*]\nindent_style = tab\n").unwrap();

        let mut rc = PrettierRc::load(dir.path()).unwrap();
        let baseline = baseline_defaults();
        rc.merge_options(&resolve_options(&Options::new(), &house_style(), &baseline))
            .unwrap();

        let warnings = editorconfig_warnings(dir.path(), &rc.options(), &baseline, &quiet());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

        fs::write(dir.path().join(PRETTIERRC), "useTabs: false\n").unwrap();
        let rc = PrettierRc::load(dir.path()).unwrap();
        let warnings = editorconfig_warnings(dir.path(), &rc.options(), &baseline, &quiet());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_check_mode_writes_nothing() {
        let dir = project();
        let config = Config {
            check_only: true,
            ..config(TaskConfig::default())
        };

        let result = run(dir.path(), &config, &quiet()).unwrap();

        assert!(result.has_changes());
        assert!(!dir.path().join(PRETTIERRC).exists());
        assert_eq!(
            fs::read_to_string(dir.path().join(PACKAGE_JSON)).unwrap(),
            r#"{"name":"demo"}"#
        );
    }

    #[test]
    fn test_skip_install_leaves_manifest_alone() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            install: InstallMode::Skip,
            ..config(TaskConfig::default())
        };

        let result = run(dir.path(), &config, &quiet()).unwrap();
        assert!(result.dependencies_added.is_empty());
        assert!(dir.path().join(PRETTIERRC).exists());
    }

    #[test]
    fn test_missing_manifest_propagates_after_write() {
        let dir = TempDir::new().unwrap();

        let result = run(dir.path(), &config(TaskConfig::default()), &quiet());

        assert!(
            matches!(result, Err(TaskError::Io(ref e)) if e.kind() == io::ErrorKind::NotFound)
        );
        assert!(dir.path().join(PRETTIERRC).exists());
    }

    #[test]
    fn test_malformed_prettierrc_propagates() {
        let dir = project();
        fs::write(dir.path().join(PRETTIERRC), "semi: [oops\n").unwrap();

        let result = run(dir.path(), &config(TaskConfig::default()), &quiet());
        assert!(matches!(result, Err(TaskError::Yaml(_))));
    }

    #[test]
    fn test_resolve_pattern() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{"scripts":{"lint":"eslint . --ext ts,tsx"}}"#,
        )
        .unwrap();

        let auto = resolve_pattern(dir.path(), &PatternChoice::Auto).unwrap();
        assert_eq!(auto, "**/*.{ts,tsx,css,md}");

        let explicit = PatternChoice::Explicit("src/**/*.js".to_string());
        assert_eq!(resolve_pattern(dir.path(), &explicit).unwrap(), "src/**/*.js");
    }
}
