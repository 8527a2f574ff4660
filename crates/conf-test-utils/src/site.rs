//! [`TestSite`] builder for configuration test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding config files and component code units.
///
/// Components are laid out the way `DirectoryUnits` expects: a dotted path
/// `apps.echo` is the directory `apps/echo/`, and its defaults live in
/// `apps/echo/config.toml`.
///
/// # Example
///
/// ```rust,no_run
/// use conf_test_utils::TestSite;
///
/// let site = TestSite::new();
/// site.add_component("apps.echo", Some("reply = \"pong\"\n"));
/// let config = site.write_config("site.ini", "[main]\napps = echo\n");
/// site.assert_file_exists("apps/echo/config.toml");
/// ```
pub struct TestSite {
    temp_dir: TempDir,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a config file relative to the root and return its full path.
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Create the package directory for a dotted component path, optionally
    /// with a `config.toml` defaults module. Returns the package directory.
    pub fn add_component(&self, dotted: &str, defaults: Option<&str>) -> PathBuf {
        let dir = self.unit_path(dotted);
        fs::create_dir_all(&dir).unwrap();
        if let Some(defaults) = defaults {
            fs::write(dir.join("config.toml"), defaults).unwrap();
        }
        dir
    }

    /// Write a standalone module file `<dotted path>.toml`.
    pub fn add_module(&self, dotted: &str, content: &str) -> PathBuf {
        let path = self.unit_path(dotted).with_extension("toml");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Filesystem path a dotted unit path maps to (without extension).
    pub fn unit_path(&self, dotted: &str) -> PathBuf {
        dotted
            .split('.')
            .fold(self.root().to_path_buf(), |path, segment| path.join(segment))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
