//! Filesystem-backed code units.
//!
//! A dotted path maps onto a directory tree below a root:
//!
//! ```text
//! <root>/
//!   apps/
//!     echo/            <- "apps.echo"          (package, no exports)
//!       config.toml    <- "apps.echo.config"   (module, exports its scalars)
//!   contrib/
//!     apps/
//!       ping/          <- "contrib.apps.ping"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ComponentError;
use crate::value::{Options, Value};

use super::unit::{CodeUnit, UnitSource};

/// Extension of module files.
pub const MODULE_EXTENSION: &str = "toml";

/// Loads code units from directories and `.toml` modules under a root.
#[derive(Debug, Clone)]
pub struct DirectoryUnits {
    root: PathBuf,
}

impl DirectoryUnits {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative filesystem path for a dotted path, or `None` if any segment
    /// is empty or could escape the root.
    fn relative(path: &str) -> Option<PathBuf> {
        let mut rel = PathBuf::new();
        for segment in path.split('.') {
            if segment.is_empty() || segment.contains(['/', '\\']) {
                return None;
            }
            rel.push(segment);
        }
        Some(rel)
    }

    fn load_module(&self, path: &str, file: &Path) -> Result<CodeUnit, ComponentError> {
        let load_failed = |reason: String| ComponentError::LoadFailed {
            path: path.to_string(),
            reason,
        };

        let content = fs::read_to_string(file).map_err(|e| load_failed(e.to_string()))?;
        let table: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| load_failed(e.to_string()))?;

        let mut exports = Options::new();
        for (name, value) in table {
            let value = scalar(value).ok_or_else(|| {
                load_failed(format!("export '{name}' is not a scalar value"))
            })?;
            exports.insert(name, value);
        }

        Ok(CodeUnit::new(file).with_exports(exports))
    }
}

impl UnitSource for DirectoryUnits {
    fn load(&self, path: &str) -> Result<Option<CodeUnit>, ComponentError> {
        let Some(rel) = Self::relative(path) else {
            return Ok(None);
        };

        let package = self.root.join(&rel);
        if package.is_dir() {
            return Ok(Some(CodeUnit::new(package)));
        }

        let module = package.with_extension(MODULE_EXTENSION);
        if module.is_file() {
            return self.load_module(path, &module).map(Some);
        }

        Ok(None)
    }
}

fn scalar(value: toml::Value) -> Option<Value> {
    match value {
        toml::Value::String(s) => Some(Value::String(s)),
        toml::Value::Integer(i) => Some(Value::Integer(i)),
        toml::Value::Float(f) => Some(Value::Float(f)),
        toml::Value::Boolean(b) => Some(Value::Boolean(b)),
        toml::Value::Datetime(d) => Some(Value::String(d.to_string())),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DirectoryUnits) {
        let dir = TempDir::new().unwrap();
        let units = DirectoryUnits::new(dir.path());
        (dir, units)
    }

    #[test]
    fn test_directory_is_a_package() {
        let (dir, units) = setup();
        fs::create_dir_all(dir.path().join("apps/echo")).unwrap();

        let unit = units.load("apps.echo").unwrap().unwrap();
        assert_eq!(unit.location, dir.path().join("apps/echo"));
        assert!(unit.exports.is_empty());
    }

    #[test]
    fn test_toml_file_is_a_module_with_exports() {
        let (dir, units) = setup();
        fs::create_dir_all(dir.path().join("apps/echo")).unwrap();
        fs::write(
            dir.path().join("apps/echo/config.toml"),
            "reply = \"pong\"\nretries = 3\nloud = false\nratio = 0.5\n",
        )
        .unwrap();

        let unit = units.load("apps.echo.config").unwrap().unwrap();
        assert_eq!(unit.location, dir.path().join("apps/echo/config.toml"));
        assert_eq!(unit.exports["reply"], Value::from("pong"));
        assert_eq!(unit.exports["retries"], Value::Integer(3));
        assert_eq!(unit.exports["loud"], Value::Boolean(false));
        assert_eq!(unit.exports["ratio"], Value::Float(0.5));
    }

    #[test]
    fn test_missing_unit_is_none() {
        let (_dir, units) = setup();
        assert_eq!(units.load("apps.nowhere").unwrap(), None);
    }

    #[test]
    fn test_invalid_paths_are_not_found() {
        let (dir, units) = setup();
        fs::create_dir_all(dir.path().join("apps")).unwrap();

        assert_eq!(units.load("").unwrap(), None);
        assert_eq!(units.load("apps..echo").unwrap(), None);
        assert_eq!(units.load("apps./etc").unwrap(), None);
    }

    #[test]
    fn test_bad_toml_is_load_failed() {
        let (dir, units) = setup();
        fs::write(dir.path().join("broken.toml"), "this is = = not toml").unwrap();

        let err = units.load("broken").unwrap_err();
        assert!(matches!(err, ComponentError::LoadFailed { ref path, .. } if path == "broken"));
    }

    #[test]
    fn test_non_scalar_export_is_load_failed() {
        let (dir, units) = setup();
        fs::write(dir.path().join("listy.toml"), "items = [1, 2]\n").unwrap();

        let err = units.load("listy").unwrap_err();
        assert!(err.to_string().contains("items"), "got: {err}");
    }
}
