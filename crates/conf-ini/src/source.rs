//! Raw, uninterpreted sections.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One named section: lower-cased key to string value.
///
/// Keys are kept sorted so that anything derived from a section (error
/// messages, dumps) is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSection {
    name: String,
    entries: BTreeMap<String, String>,
}

impl RawSection {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Build a section from key/value pairs. Later pairs win.
    pub fn from_pairs<K, V>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut section = Self::new(name);
        for (key, value) in pairs {
            section.insert(key, value);
        }
        section
    }

    /// Section name as written in the header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Key/value pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the underlying map.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

/// All sections read from one or more inputs, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSource {
    sections: Vec<RawSection>,
    sources: Vec<PathBuf>,
}

impl RawSource {
    pub(crate) fn new(sections: Vec<RawSection>, sources: Vec<PathBuf>) -> Self {
        Self { sections, sources }
    }

    /// Assemble a source from already-built sections. Later duplicates
    /// replace earlier ones in place.
    pub fn from_sections(sections: impl IntoIterator<Item = RawSection>) -> Self {
        let mut source = Self::default();
        for section in sections {
            match source.sections.iter_mut().find(|s| s.name == section.name) {
                Some(existing) => *existing = section,
                None => source.sections.push(section),
            }
        }
        source
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Whether a section with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Sections in first-seen order.
    pub fn sections(&self) -> &[RawSection] {
        &self.sections
    }

    /// Section names in first-seen order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// Files that were actually read, in read order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Whether `path` was one of the files read.
    pub fn was_read(&self, path: &Path) -> bool {
        self.sources.iter().any(|p| p == path)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no sections were read.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
