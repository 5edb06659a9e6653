//! Task config and project root discovery

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::toml_schema::TaskToml;
use crate::manifest::PACKAGE_JSON;

pub const CONFIG_FILE: &str = "prettier-setup.toml";

/// Error type for task config loading
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(io::Error),
    /// The file is not valid TOML for this schema
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read {CONFIG_FILE}: {e}"),
            ConfigError::Parse(e) => write!(f, "cannot parse {CONFIG_FILE}: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Search `start_dir` and its ancestors for `filename`.
///
/// With `stop_at_git_root`, the directory holding `.git` is the last one
/// searched.
pub fn find_file_upward(
    start_dir: &Path,
    filename: &str,
    stop_at_git_root: bool,
) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }

        if stop_at_git_root && current.join(".git").exists() {
            return None;
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find `prettier-setup.toml` for a project, searching upward until the
/// git root.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    find_file_upward(start_dir, CONFIG_FILE, true)
}

/// The nearest directory at or above `start_dir` that has a `package.json`.
pub fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
    find_file_upward(start_dir, PACKAGE_JSON, true)
        .and_then(|manifest| manifest.parent().map(Path::to_path_buf))
}

pub fn load_config(path: &Path) -> Result<TaskToml, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValue;
    use crate::overrides::FilesPattern;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent_dir() {
        let parent = TempDir::new().unwrap();
        let config_path = parent.path().join(CONFIG_FILE);
        fs::write(&config_path, "[prettier]\n").unwrap();

        let child = parent.path().join("packages/app");
        fs::create_dir_all(&child).unwrap();

        assert_eq!(find_config_file(&child), Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join(CONFIG_FILE), "[prettier]\n").unwrap();

        let repo = outer.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let subdir = repo.join("src");
        fs::create_dir(&subdir).unwrap();

        assert_eq!(find_config_file(&subdir), None);
    }

    #[test]
    fn test_find_project_root_prefers_closest_manifest() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(PACKAGE_JSON), "{}").unwrap();
        let package = root.path().join("packages/web");
        fs::create_dir_all(package.join("src")).unwrap();
        fs::write(package.join(PACKAGE_JSON), "{}").unwrap();

        assert_eq!(find_project_root(&package.join("src")), Some(package));
    }

    #[test]
    fn test_find_project_root_ignores_directories() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        fs::create_dir(root.path().join(PACKAGE_JSON)).unwrap();

        assert_eq!(find_project_root(root.path()), None);
    }

    #[test]
    fn test_load_config_full() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE);
        fs::write(
            &config_path,
            r#"
[prettier]
pattern = "src/**/*.ts"

[prettier.options]
printWidth = 100
semi = false
trailingComma = "all"

[[prettier.overrides]]
files = "*.md"
proseWrap = "always"

[[prettier.overrides]]
files = ["*.json", "*.jsonc"]
tabWidth = 4
"#,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        let prettier = config.prettier;
        assert_eq!(prettier.pattern.as_deref(), Some("src/**/*.ts"));
        assert_eq!(prettier.options["printWidth"], OptionValue::Integer(100));
        assert_eq!(prettier.options["semi"], OptionValue::Bool(false));
        assert_eq!(
            prettier.options["trailingComma"],
            OptionValue::String("all".to_string())
        );

        let overrides = prettier.overrides.unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides[0].files, FilesPattern::One("*.md".to_string()));
        assert_eq!(
            overrides[1].settings.get("tabWidth"),
            Some(&serde_yaml::Value::from(4))
        );
    }

    #[test]
    fn test_load_config_empty() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "").unwrap();

        let config = load_config(&config_path).unwrap();
        assert!(config.prettier.pattern.is_none());
        assert!(config.prettier.options.is_empty());
        assert!(config.prettier.overrides.is_none());
    }

    #[test]
    fn test_load_config_rejects_nested_option() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "[prettier.options.nested]\nkey = 1\n").unwrap();

        assert!(matches!(
            load_config(&config_path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_config(&dir.path().join(CONFIG_FILE));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
