//! Top-level orchestration: three passes from text to a typed tree.
//!
//! 1. **Raw extraction** - `conf-ini` reads sections of strings.
//! 2. **Normalization** - every value of every section becomes a [`Value`].
//! 3. **Section parsing** - each section goes through its registered parser
//!    or is copied through.
//!
//! Errors in any pass abort construction. App resolution is deferred to
//! first access of each app's handle, so it cannot fail construction.
//!
//! [`Value`]: crate::value::Value

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use conf_ini::RawSource;

use crate::components::{
    AppCatalog, BackendCatalog, ComponentMerger, ComponentResolver, DirectoryUnits, FailureMode,
    Precedence, UnitRegistry, UnitSource,
};
use crate::error::{Error, Result};
use crate::lookup::SectionLookup;
use crate::sections::{
    I18N_SECTION, I18nSection, LOG_SECTION, LogSection, ParseContext, ROOT_SECTION, RootSection,
    SectionInput, SectionValue, parse_section,
};
use crate::value::{NumericPolicy, Options, normalize_section};

/// Options for building a [`ConfigStore`].
pub struct ConfigStoreBuilder {
    units: Option<Arc<dyn UnitSource>>,
    roots: Option<Vec<String>>,
    precedence: Precedence,
    numeric_policy: NumericPolicy,
    failure_mode: FailureMode,
}

impl Default for ConfigStoreBuilder {
    fn default() -> Self {
        Self {
            units: None,
            roots: None,
            precedence: Precedence::default(),
            numeric_policy: NumericPolicy::default(),
            failure_mode: FailureMode::default(),
        }
    }
}

impl ConfigStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where app code units are loaded from.
    ///
    /// Without this, [`load`](Self::load) searches the directory of the
    /// first file read, and the other constructors find no units at all.
    pub fn units(mut self, units: impl UnitSource + 'static) -> Self {
        self.units = Some(Arc::new(units));
        self
    }

    /// Replace the namespace roots searched for apps, in priority order.
    pub fn namespace_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    pub fn precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    pub fn failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Build from a single string.
    pub fn parse(self, text: &str) -> Result<ConfigStore> {
        let raw = conf_ini::parse_str(text)?;
        self.build(raw)
    }

    /// Build from files read in order. Missing files are skipped.
    pub fn load<I, P>(mut self, paths: I) -> Result<ConfigStore>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let raw = conf_ini::read_paths(paths)?;
        if self.units.is_none() {
            let base = raw
                .sources()
                .first()
                .and_then(|p| p.parent())
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            tracing::debug!(?base, "Searching component units next to the config");
            self.units = Some(Arc::new(DirectoryUnits::new(base)));
        }
        self.build(raw)
    }

    /// Run normalization and section parsing over already-read sections.
    pub fn build(self, raw: RawSource) -> Result<ConfigStore> {
        let units = self
            .units
            .unwrap_or_else(|| Arc::new(UnitRegistry::new()));
        let resolver = match self.roots {
            Some(roots) => ComponentResolver::with_roots(units, roots),
            None => ComponentResolver::new(units),
        };
        let merger = Arc::new(ComponentMerger::new(resolver, self.precedence));

        let normalized: BTreeMap<String, Options> = raw
            .sections()
            .iter()
            .map(|section| {
                (
                    section.name().to_string(),
                    normalize_section(section, self.numeric_policy),
                )
            })
            .collect();

        let ctx = ParseContext {
            sections: &normalized,
            merger: &merger,
            failure_mode: self.failure_mode,
        };
        let mut data = Vec::with_capacity(raw.len());
        for section in raw.sections() {
            let input = SectionInput {
                raw: section,
                normalized: &normalized[section.name()],
            };
            data.push((section.name().to_string(), parse_section(&ctx, &input)?));
        }

        tracing::debug!(
            sections = data.len(),
            sources = ?raw.sources(),
            "Configuration resolved"
        );

        Ok(ConfigStore {
            raw,
            normalized,
            data,
        })
    }
}

/// The fully parsed configuration tree. Read-only once built.
#[derive(Debug)]
pub struct ConfigStore {
    raw: RawSource,
    normalized: BTreeMap<String, Options>,
    data: Vec<(String, SectionValue)>,
}

impl ConfigStore {
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Build from files with default options.
    pub fn load<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::builder().load(paths)
    }

    /// Look up a parsed section.
    pub fn get(&self, name: &str) -> Option<&SectionValue> {
        self.data
            .iter()
            .find(|(section, _)| section == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Section names in first-seen order.
    pub fn section_names(&self) -> Vec<&str> {
        self.data.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Output of the raw extraction pass.
    pub fn raw(&self) -> &RawSource {
        &self.raw
    }

    /// Output of the normalization pass for one section.
    pub fn normalized(&self, name: &str) -> Option<&Options> {
        self.normalized.get(name)
    }

    /// Files that were actually read.
    pub fn sources(&self) -> &[PathBuf] {
        self.raw.sources()
    }

    pub fn root(&self) -> Option<&RootSection> {
        self.get(ROOT_SECTION).and_then(SectionValue::as_root)
    }

    pub fn apps(&self) -> Option<&AppCatalog> {
        self.root().map(|root| &root.apps)
    }

    pub fn backends(&self) -> Option<&BackendCatalog> {
        self.root().map(|root| &root.backends)
    }

    pub fn log(&self) -> Option<&LogSection> {
        self.get(LOG_SECTION).and_then(SectionValue::as_log)
    }

    pub fn i18n(&self) -> Option<&I18nSection> {
        self.get(I18N_SECTION).and_then(SectionValue::as_i18n)
    }

    /// Render the whole tree as JSON, resolving every app.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let mut tree = serde_json::Map::new();
        for (name, value) in &self.data {
            tree.insert(name.clone(), value.to_json()?);
        }
        Ok(serde_json::Value::Object(tree))
    }
}

impl FromStr for ConfigStore {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::builder().parse(s)
    }
}

impl SectionLookup for ConfigStore {
    type Section = SectionValue;

    fn section(&self, name: &str) -> Option<&SectionValue> {
        self.get(name)
    }

    fn section_names(&self) -> Vec<&str> {
        ConfigStore::section_names(self)
    }
}
