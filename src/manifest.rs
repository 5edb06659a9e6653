//! `package.json` access and dependency installation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{Map, Value};

use crate::error::TaskError;

pub const PACKAGE_JSON: &str = "package.json";

/// A loaded `package.json`. Key order is preserved on save.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    data: Map<String, Value>,
}

impl PackageJson {
    /// Load `package.json` from the project directory.
    pub fn load(project_dir: &Path) -> Result<Self, TaskError> {
        let path = project_dir.join(PACKAGE_JSON);
        let content = fs::read_to_string(&path)?;
        let data = match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => map,
            _ => {
                return Err(TaskError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} is not a JSON object", path.display()),
                )))
            }
        };
        Ok(Self { path, data })
    }

    fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.data.get(name).and_then(Value::as_object)
    }

    /// Command of a script from the `scripts` section.
    pub fn script(&self, name: &str) -> Option<&str> {
        self.section("scripts")?
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Whether `devDependencies.<name>` holds a truthy value.
    pub fn has_dev_dependency(&self, name: &str) -> bool {
        self.section("devDependencies")
            .and_then(|deps| deps.get(name))
            .is_some_and(is_truthy)
    }

    /// Whether `name` is declared in `dependencies` or `devDependencies`.
    pub fn declares(&self, name: &str) -> bool {
        ["dependencies", "devDependencies"]
            .iter()
            .any(|section| self.section(section).is_some_and(|deps| deps.contains_key(name)))
    }

    pub fn add_dev_dependency(&mut self, name: &str, constraint: &str) {
        let deps = self
            .data
            .entry("devDependencies")
            .or_insert_with(|| Value::Object(Map::new()));
        if !deps.is_object() {
            *deps = Value::Object(Map::new());
        }
        if let Value::Object(deps) = deps {
            deps.insert(name.to_string(), Value::String(constraint.to_string()));
        }
    }

    pub fn render(&self) -> Result<String, TaskError> {
        let mut out = serde_json::to_string_pretty(&self.data)?;
        out.push('\n');
        Ok(out)
    }

    pub fn save(&self) -> Result<(), TaskError> {
        fs::write(&self.path, self.render()?)?;
        Ok(())
    }
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Package name and version constraint to install.
pub type Package<'a> = (&'a str, &'a str);

/// Outcome of [`install`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Packages added to `devDependencies`, as `name@constraint`
    pub added: Vec<String>,
    pub package_manager: Option<PackageManager>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Pick the package manager from the lock file in the project.
    pub fn detect(project_dir: &Path) -> Self {
        if project_dir.join("yarn.lock").exists() {
            PackageManager::Yarn
        } else if project_dir.join("pnpm-lock.yaml").exists() {
            PackageManager::Pnpm
        } else {
            PackageManager::Npm
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            PackageManager::Yarn => &[],
            PackageManager::Npm | PackageManager::Pnpm => &["install"],
        }
    }

    fn run(self, project_dir: &Path) -> Result<(), TaskError> {
        let status = Command::new(self.program())
            .args(self.args())
            .current_dir(project_dir)
            .status()?;
        if !status.success() {
            return Err(TaskError::Io(io::Error::other(format!(
                "{} exited with {status}",
                self.program()
            ))));
        }
        Ok(())
    }
}

/// Compute the manifest change for `packages` without saving it.
pub fn plan_install(pkg: &mut PackageJson, packages: &[Package<'_>]) -> Vec<String> {
    let mut added = Vec::new();
    for (name, constraint) in packages {
        if pkg.declares(name) {
            continue;
        }
        pkg.add_dev_dependency(name, constraint);
        added.push(format!("{name}@{constraint}"));
    }
    added
}

/// Declare `packages` as dev dependencies of the project, then optionally
/// run the package manager. Packages already declared are left alone.
pub fn install(
    project_dir: &Path,
    packages: &[Package<'_>],
    run_package_manager: bool,
) -> Result<InstallReport, TaskError> {
    let mut pkg = PackageJson::load(project_dir)?;
    let added = plan_install(&mut pkg, packages);
    if !added.is_empty() {
        pkg.save()?;
    }

    let package_manager = if run_package_manager {
        let pm = PackageManager::detect(project_dir);
        pm.run(project_dir)?;
        Some(pm)
    } else {
        None
    };

    Ok(InstallReport {
        added,
        package_manager,
    })
}
