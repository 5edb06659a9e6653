//! Error type for a task run

use std::fmt;
use std::io;

use crate::config::ConfigError;

/// Everything that can stop a run. Underlying errors are passed through
/// unchanged.
#[derive(Debug)]
pub enum TaskError {
    /// Filesystem or process error
    Io(io::Error),
    /// `.prettierrc.yml` could not be parsed or rendered
    Yaml(serde_yaml::Error),
    /// `package.json` could not be parsed or rendered
    Json(serde_json::Error),
    /// Task config file error
    Config(ConfigError),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Io(e) => write!(f, "{e}"),
            TaskError::Yaml(e) => write!(f, "invalid YAML: {e}"),
            TaskError::Json(e) => write!(f, "invalid JSON: {e}"),
            TaskError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaskError::Io(e) => Some(e),
            TaskError::Yaml(e) => Some(e),
            TaskError::Json(e) => Some(e),
            TaskError::Config(e) => Some(e),
        }
    }
}

impl From<io::Error> for TaskError {
    fn from(e: io::Error) -> Self {
        TaskError::Io(e)
    }
}

impl From<serde_yaml::Error> for TaskError {
    fn from(e: serde_yaml::Error) -> Self {
        TaskError::Yaml(e)
    }
}

impl From<serde_json::Error> for TaskError {
    fn from(e: serde_json::Error) -> Self {
        TaskError::Json(e)
    }
}

impl From<ConfigError> for TaskError {
    fn from(e: ConfigError) -> Self {
        TaskError::Config(e)
    }
}
