//! TOML schema for prettier-setup.toml

use serde::{Deserialize, Serialize};

use crate::options::Options;
use crate::overrides::OverrideRule;

/// Root structure for prettier-setup.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskToml {
    #[serde(default)]
    pub prettier: PrettierSection,
}

/// `[prettier]` section
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PrettierSection {
    /// File glob, or `auto` to derive one from package.json
    pub pattern: Option<String>,

    /// Options to set in `.prettierrc.yml`; the house style still wins
    #[serde(default)]
    pub options: Options,

    /// Override rules to merge into `.prettierrc.yml`
    pub overrides: Option<Vec<OverrideRule>>,
}
