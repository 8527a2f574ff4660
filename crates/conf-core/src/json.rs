//! Pass-through loader for JSON documents.
//!
//! No normalization, section parsing or component resolution happens here:
//! the document's top-level keys are the sections.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::lookup::SectionLookup;

/// A JSON object exposed section by section.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonConfig {
    data: Map<String, Value>,
    path: Option<PathBuf>,
}

impl JsonConfig {
    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Look up a top-level key.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// File the document was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The whole document.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl FromStr for JsonConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(s)? {
            Value::Object(data) => Ok(Self { data, path: None }),
            _ => Err(Error::JsonNotObject),
        }
    }
}

impl SectionLookup for JsonConfig {
    type Section = Value;

    fn section(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn section_names(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_sections_are_passed_through() {
        let config: JsonConfig = r#"{"main": {"apps": ["echo"]}, "log": {"level": "debug"}}"#
            .parse()
            .unwrap();

        assert_eq!(config.get("main"), Some(&json!({"apps": ["echo"]})));
        assert!(config.contains_section("log"));
        assert!(!config.contains_section("i18n"));
        assert_eq!(config.section_names(), vec!["log", "main"]);
    }

    #[test]
    fn test_values_are_not_normalized() {
        let config: JsonConfig = r#"{"echo": {"loud": "yes"}}"#.parse().unwrap();
        assert_eq!(config.section("echo").unwrap()["loud"], json!("yes"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = "[1, 2]".parse::<JsonConfig>().unwrap_err();
        assert!(matches!(err, Error::JsonNotObject));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = "{not json".parse::<JsonConfig>().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_records_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"main": {}}"#).unwrap();

        let config = JsonConfig::load(&path).unwrap();
        assert_eq!(config.path(), Some(path.as_path()));
        assert!(config.contains("main"));
    }
}
