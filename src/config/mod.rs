//! Task configuration for prettier-setup.
//!
//! This module provides:
//! - Loading `prettier-setup.toml` and finding it (search upward)
//! - Locating the project root from `package.json`
//! - Merging CLI args, config file, and defaults
//! - Template generation with `--init`
//! - `.editorconfig` conflict warnings

mod editorconfig;
mod file;
mod init;
mod merge;
mod toml_schema;

pub use editorconfig::{
    check_editorconfig_conflicts, find_editorconfig, parse_editorconfig, EditorConfigSettings,
};
pub use file::{
    find_config_file, find_file_upward, find_project_root, load_config, ConfigError, CONFIG_FILE,
};
pub use init::{generate_init_file_in, TASK_TOML_TEMPLATE};
pub use merge::{merge_task_config, parse_option_arg, CliTaskOptions};
pub use toml_schema::{PrettierSection, TaskToml};
