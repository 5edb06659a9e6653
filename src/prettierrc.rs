//! Read-modify-write access to `.prettierrc.yml`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::TaskError;
use crate::options::{OptionValue, Options};
use crate::overrides::OverrideEntry;

pub const PRETTIERRC: &str = ".prettierrc.yml";
const OVERRIDES_KEY: &str = "overrides";

/// The `.prettierrc.yml` document of a project.
///
/// Top-level keys keep their order. Keys this crate does not know about
/// are carried through untouched.
#[derive(Debug, Clone)]
pub struct PrettierRc {
    path: PathBuf,
    doc: Mapping,
    original: Option<String>,
}

impl PrettierRc {
    /// Load the document, or start an empty one if the file does not exist.
    pub fn load(project_dir: &Path) -> Result<Self, TaskError> {
        let path = project_dir.join(PRETTIERRC);
        let original = match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let doc = match original.as_deref() {
            None => Mapping::new(),
            Some(content) if content.trim().is_empty() => Mapping::new(),
            Some(content) => match serde_yaml::from_str::<Value>(content)? {
                Value::Mapping(map) => map,
                Value::Null => Mapping::new(),
                _ => {
                    return Err(TaskError::Io(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("{} is not a YAML mapping", path.display()),
                    )))
                }
            },
        };

        Ok(Self {
            path,
            doc,
            original,
        })
    }

    /// File content as it was when loaded, `None` if there was no file.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// Top-level scalar options, as Prettier will read them.
    pub fn options(&self) -> Options {
        self.doc
            .iter()
            .filter_map(|(key, value)| {
                let key = key.as_str()?;
                let value = serde_yaml::from_value::<OptionValue>(value.clone()).ok()?;
                Some((key.to_string(), value))
            })
            .collect()
    }

    /// Existing override entries. A missing or null `overrides` key is empty.
    pub fn overrides(&self) -> Result<Vec<OverrideEntry>, TaskError> {
        match self.doc.get(OVERRIDES_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_yaml::from_value(value.clone())?),
        }
    }

    /// Set each option at the top level. Existing keys keep their position.
    pub fn merge_options(&mut self, options: &Options) -> Result<(), TaskError> {
        for (key, value) in options {
            self.doc
                .insert(Value::from(key.as_str()), serde_yaml::to_value(value)?);
        }
        Ok(())
    }

    /// Replace `overrides` and move it after every other key.
    pub fn set_overrides(&mut self, entries: &[OverrideEntry]) -> Result<(), TaskError> {
        let doc = std::mem::take(&mut self.doc);
        self.doc = doc
            .into_iter()
            .filter(|(key, _)| key.as_str() != Some(OVERRIDES_KEY))
            .collect();
        self.doc
            .insert(Value::from(OVERRIDES_KEY), serde_yaml::to_value(entries)?);
        Ok(())
    }

    pub fn render(&self) -> Result<String, TaskError> {
        Ok(serde_yaml::to_string(&self.doc)?)
    }

    /// Whether the rendered document differs from the file on disk.
    pub fn is_changed(&self) -> Result<bool, TaskError> {
        Ok(self.original() != Some(self.render()?.as_str()))
    }

    pub fn save(&self) -> Result<(), TaskError> {
        fs::write(&self.path, self.render()?)?;
        Ok(())
    }
}
