//! Template generation for `--init`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILE;

/// Template prettier-setup.toml with documentation
pub const TASK_TOML_TEMPLATE: &str = r#"# prettier-setup.toml - Options for prettier-setup
#
# prettier-setup writes .prettierrc.yml and adds prettier to devDependencies.
# The house style (singleQuote: true, printWidth: 90) always wins over the
# options below, and options equal to Prettier's defaults are left out.

[prettier]
# File glob used for formatting. "auto" derives one from the lint scripts
# and dependencies in package.json (see --print-pattern).
# pattern = "auto"

[prettier.options]
# Any Prettier option, e.g.:
# tabWidth = 4
# trailingComma = "all"
# semi = false

# Override rules are merged by `files`: a rule replaces any existing rule
# for the same pattern in .prettierrc.yml.
#
# [[prettier.overrides]]
# files = "*.md"
# proseWrap = "always"
"#;

/// Write the template into `dir` (or the current directory if None).
///
/// Fails with `AlreadyExists` rather than overwrite a config.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from(CONFIG_FILE), |d| d.join(CONFIG_FILE));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{CONFIG_FILE} already exists"),
        ));
    }

    fs::write(&path, TASK_TOML_TEMPLATE)?;
    Ok(path)
}
