use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use prettier_setup::{
    find_config_file, find_project_root, generate_init_file_in, load_config, merge_task_config,
    parse_option_arg, resolve_pattern, run, should_use_colors, CliTaskOptions, Config,
    InstallMode, OptionValue, OutputContext, OutputMode, TaskError, TaskToml,
};

#[derive(Parser)]
#[command(name = "prettier-setup")]
#[command(version, about = "Add Prettier with the house style to a JavaScript project")]
struct Cli {
    /// Project directory (default: nearest directory with a package.json)
    dir: Option<PathBuf>,

    /// Check only (no modifications), exit 1 if anything would change
    #[arg(short, long)]
    check: bool,

    /// Show changes to .prettierrc.yml in diff format
    #[arg(short, long)]
    diff: bool,

    /// Output only modified file names
    #[arg(short, long)]
    quiet: bool,

    /// Show resolved options and config file lookups
    #[arg(short, long)]
    verbose: bool,

    /// Set a Prettier option (repeatable); the house style still wins
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE", value_parser = parse_option_arg)]
    options: Vec<(String, OptionValue)>,

    /// File glob for formatting, or "auto" to derive one
    #[arg(long, value_name = "GLOB")]
    pattern: Option<String>,

    /// Print the resolved file glob and exit
    #[arg(long)]
    print_pattern: bool,

    /// Do not add prettier to package.json
    #[arg(long, conflicts_with = "npm_install")]
    skip_install: bool,

    /// Run the package manager after updating package.json
    #[arg(long)]
    npm_install: bool,

    /// Generate a template prettier-setup.toml configuration file
    #[arg(long)]
    init: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let project_dir = match resolve_project_dir(cli.dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if cli.init {
        return handle_init(&project_dir);
    }

    let toml_config = match load_configuration(&cli.config, &project_dir, cli.quiet, cli.verbose)
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let cli_options = CliTaskOptions {
        options: cli.options.clone(),
        pattern: cli.pattern.clone(),
    };
    // Merge configurations: CLI > TOML > defaults
    let task = merge_task_config(&cli_options, toml_config.as_ref().map(|c| &c.prettier));

    if cli.print_pattern {
        return match resolve_pattern(&project_dir, &task.pattern) {
            Ok(pattern) => {
                println!("{pattern}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from(1)
            }
        };
    }

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.diff {
        OutputMode::Diff
    } else {
        OutputMode::Normal
    };
    let ctx = OutputContext::new(
        output_mode,
        should_use_colors(cli.color, cli.no_color),
        cli.verbose,
    );

    let install = if cli.skip_install {
        InstallMode::Skip
    } else if cli.npm_install {
        InstallMode::PackageManager
    } else {
        InstallMode::Manifest
    };

    let config = Config {
        check_only: cli.check,
        install,
        task,
    };

    match run(&project_dir, &config, &ctx) {
        Ok(result) => {
            if config.check_only && result.has_changes() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn resolve_project_dir(explicit: Option<&Path>) -> std::io::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    Ok(find_project_root(&cwd).unwrap_or(cwd))
}

fn handle_init(project_dir: &Path) -> ExitCode {
    match generate_init_file_in(Some(project_dir)) {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Load the task config. A config given with `--config` must load; a
/// discovered one that fails is only a warning.
fn load_configuration(
    explicit_path: &Option<PathBuf>,
    project_dir: &Path,
    quiet: bool,
    verbose: bool,
) -> Result<Option<TaskToml>, TaskError> {
    if let Some(path) = explicit_path {
        let config = load_config(path)?;
        if verbose && !quiet {
            eprintln!("Using config: {}", path.display());
        }
        return Ok(Some(config));
    }

    let Some(path) = find_config_file(project_dir) else {
        return Ok(None);
    };
    match load_config(&path) {
        Ok(config) => {
            if verbose && !quiet {
                eprintln!("Using config: {}", path.display());
            }
            Ok(Some(config))
        }
        Err(e) => {
            eprintln!("Warning: Failed to load {}: {}", path.display(), e);
            Ok(None)
        }
    }
}
