//! Code units and the sources they are loaded from.
//!
//! A code unit is whatever implements a component: it has a filesystem
//! location and may export named values. A component's defaults live in a
//! sub-unit named `<unit path>.config`.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ComponentError;
use crate::value::Options;

/// A loaded code unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeUnit {
    /// Where the unit lives on disk.
    pub location: PathBuf,
    /// Values the unit declares. Names starting with `_` are private.
    pub exports: Options,
}

impl CodeUnit {
    /// A unit with no exports.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            exports: Options::new(),
        }
    }

    /// Set the unit's exports (builder pattern).
    pub fn with_exports(mut self, exports: Options) -> Self {
        self.exports = exports;
        self
    }

    /// Exports whose names do not start with `_`.
    pub fn public_exports(&self) -> Options {
        self.exports
            .iter()
            .filter(|(name, _)| !name.starts_with('_'))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// Somewhere code units can be loaded from by fully-qualified dotted path.
///
/// `Ok(None)` means the unit is not present in this source. `Err` means it is
/// present but could not be loaded. Loading may have side effects, so callers
/// must not load the same component twice.
pub trait UnitSource: Send + Sync {
    fn load(&self, path: &str) -> Result<Option<CodeUnit>, ComponentError>;
}

/// Constructor run when a registered unit is loaded.
pub type UnitFactory = Arc<dyn Fn() -> Result<CodeUnit, String> + Send + Sync>;

#[derive(Clone)]
enum UnitEntry {
    Static(CodeUnit),
    Factory(UnitFactory),
}

/// Statically registered code units, keyed by dotted path.
#[derive(Clone, Default)]
pub struct UnitRegistry {
    units: HashMap<String, UnitEntry>,
}

impl UnitRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
        }
    }

    /// Register a ready-made unit. Replaces any unit at the same path.
    pub fn register(&mut self, path: impl Into<String>, unit: CodeUnit) {
        self.units.insert(path.into(), UnitEntry::Static(unit));
    }

    /// Register a unit built on load.
    pub fn register_factory<F>(&mut self, path: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<CodeUnit, String> + Send + Sync + 'static,
    {
        self.units
            .insert(path.into(), UnitEntry::Factory(Arc::new(factory)));
    }

    /// Register a component unit together with its `<path>.config` defaults unit.
    pub fn register_component(
        &mut self,
        path: impl Into<String>,
        location: impl Into<PathBuf>,
        defaults: Options,
    ) {
        let path = path.into();
        let location = location.into();
        self.register(
            format!("{path}.{}", super::DEFAULTS_UNIT),
            CodeUnit::new(location.join(super::DEFAULTS_UNIT)).with_exports(defaults),
        );
        self.register(path, CodeUnit::new(location));
    }

    /// Check if a unit is registered.
    pub fn contains(&self, path: &str) -> bool {
        self.units.contains_key(path)
    }

    /// List all registered paths (sorted).
    pub fn list(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.units.keys().map(String::as_str).collect();
        paths.sort();
        paths
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl fmt::Debug for UnitRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitRegistry")
            .field("units", &self.list())
            .finish()
    }
}

impl UnitSource for UnitRegistry {
    fn load(&self, path: &str) -> Result<Option<CodeUnit>, ComponentError> {
        match self.units.get(path) {
            None => Ok(None),
            Some(UnitEntry::Static(unit)) => Ok(Some(unit.clone())),
            Some(UnitEntry::Factory(factory)) => {
                factory()
                    .map(Some)
                    .map_err(|reason| ComponentError::LoadFailed {
                        path: path.to_string(),
                        reason,
                    })
            }
        }
    }
}

/// Several sources consulted in order; the first that has the unit wins.
#[derive(Clone, Default)]
pub struct ChainedUnits {
    sources: Vec<Arc<dyn UnitSource>>,
}

impl ChainedUnits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower priority than those already added.
    pub fn with(mut self, source: impl UnitSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl UnitSource for ChainedUnits {
    fn load(&self, path: &str) -> Result<Option<CodeUnit>, ComponentError> {
        for source in &self.sources {
            if let Some(unit) = source.load(path)? {
                return Ok(Some(unit));
            }
        }
        Ok(None)
    }
}
