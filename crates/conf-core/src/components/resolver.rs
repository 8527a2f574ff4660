//! Ordered search for a component's code unit.

use std::fmt;
use std::sync::Arc;

use crate::error::ComponentError;
use crate::value::Options;

use super::DEFAULTS_UNIT;
use super::unit::{CodeUnit, UnitSource};

/// Namespace roots searched when no override is configured:
/// application-local first, then contributed.
pub const DEFAULT_NAMESPACE_ROOTS: &[&str] = &["apps", "contrib.apps"];

/// A code unit together with the dotted path it was found at.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUnit {
    pub path: String,
    pub unit: CodeUnit,
}

/// Locates code units by name across a fixed, ordered list of roots.
#[derive(Clone)]
pub struct ComponentResolver {
    units: Arc<dyn UnitSource>,
    roots: Vec<String>,
}

impl ComponentResolver {
    /// Resolver searching [`DEFAULT_NAMESPACE_ROOTS`].
    pub fn new(units: Arc<dyn UnitSource>) -> Self {
        Self::with_roots(units, DEFAULT_NAMESPACE_ROOTS.iter().copied())
    }

    /// Resolver searching the given roots, in order.
    pub fn with_roots<I, S>(units: Arc<dyn UnitSource>, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            units,
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Namespace roots in search order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Find the code unit for `name`.
    ///
    /// `name` is first tried as a fully-qualified path; only if that is not
    /// present is each root tried as `<root>.<name>`, in order. A unit that
    /// exists but fails to load stops the search.
    pub fn resolve(&self, name: &str) -> Result<ResolvedUnit, ComponentError> {
        if let Some(unit) = self.try_load(name)? {
            return Ok(ResolvedUnit {
                path: name.to_string(),
                unit,
            });
        }

        for root in &self.roots {
            let candidate = format!("{root}.{name}");
            if let Some(unit) = self.try_load(&candidate)? {
                return Ok(ResolvedUnit {
                    path: candidate,
                    unit,
                });
            }
        }

        Err(ComponentError::NotFound {
            name: name.to_string(),
            roots: self.roots.clone(),
        })
    }

    /// Public exports of the `<path>.config` unit, or nothing if it is absent.
    pub fn defaults_for(&self, path: &str) -> Result<Options, ComponentError> {
        let defaults_path = format!("{path}.{DEFAULTS_UNIT}");
        Ok(self
            .try_load(&defaults_path)?
            .map(|unit| unit.public_exports())
            .unwrap_or_default())
    }

    fn try_load(&self, path: &str) -> Result<Option<CodeUnit>, ComponentError> {
        tracing::debug!(candidate = path, "Trying code unit");
        self.units.load(path)
    }
}

impl fmt::Debug for ComponentResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentResolver")
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::UnitRegistry;
    use crate::value::Value;
    use std::sync::Mutex;

    /// Records every path asked for.
    #[derive(Default)]
    struct RecordingUnits {
        inner: UnitRegistry,
        asked: Mutex<Vec<String>>,
    }

    impl UnitSource for RecordingUnits {
        fn load(&self, path: &str) -> Result<Option<CodeUnit>, ComponentError> {
            self.asked.lock().unwrap().push(path.to_string());
            self.inner.load(path)
        }
    }

    fn recording(paths: &[&str]) -> Arc<RecordingUnits> {
        let mut inner = UnitRegistry::new();
        for path in paths {
            inner.register(*path, CodeUnit::new(format!("/src/{}", path.replace('.', "/"))));
        }
        Arc::new(RecordingUnits {
            inner,
            asked: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn test_fully_qualified_name_skips_roots() {
        let units = recording(&["vendor.echo", "apps.vendor.echo"]);
        let resolver = ComponentResolver::new(units.clone());

        let resolved = resolver.resolve("vendor.echo").unwrap();

        assert_eq!(resolved.path, "vendor.echo");
        assert_eq!(*units.asked.lock().unwrap(), vec!["vendor.echo"]);
    }

    #[test]
    fn test_roots_are_searched_in_order() {
        let units = recording(&["apps.echo", "contrib.apps.echo"]);
        let resolver = ComponentResolver::new(units.clone());

        let resolved = resolver.resolve("echo").unwrap();

        assert_eq!(resolved.path, "apps.echo");
        assert_eq!(*units.asked.lock().unwrap(), vec!["echo", "apps.echo"]);
    }

    #[test]
    fn test_falls_through_to_later_root() {
        let units = recording(&["contrib.apps.ping"]);
        let resolver = ComponentResolver::new(units.clone());

        let resolved = resolver.resolve("ping").unwrap();

        assert_eq!(resolved.path, "contrib.apps.ping");
        assert_eq!(
            *units.asked.lock().unwrap(),
            vec!["ping", "apps.ping", "contrib.apps.ping"]
        );
    }

    #[test]
    fn test_not_found_lists_roots_in_order() {
        let units = recording(&[]);
        let resolver = ComponentResolver::with_roots(units, ["site", "apps", "contrib.apps"]);

        let err = resolver.resolve("ghost").unwrap_err();

        assert_eq!(
            err,
            ComponentError::NotFound {
                name: "ghost".to_string(),
                roots: vec![
                    "site".to_string(),
                    "apps".to_string(),
                    "contrib.apps".to_string()
                ],
            }
        );
        assert!(err.to_string().contains("site or apps or contrib.apps"));
    }

    #[test]
    fn test_load_failure_stops_search() {
        let mut registry = UnitRegistry::new();
        registry.register_factory("apps.bad", || Err("init exploded".to_string()));
        registry.register("contrib.apps.bad", CodeUnit::new("/never"));
        let resolver = ComponentResolver::new(Arc::new(registry));

        let err = resolver.resolve("bad").unwrap_err();
        assert!(matches!(err, ComponentError::LoadFailed { ref path, .. } if path == "apps.bad"));
    }

    #[test]
    fn test_defaults_for_missing_config_is_empty() {
        let resolver = ComponentResolver::new(recording(&["apps.echo"]));
        assert!(resolver.defaults_for("apps.echo").unwrap().is_empty());
    }

    #[test]
    fn test_defaults_for_reads_public_exports() {
        let mut registry = UnitRegistry::new();
        let mut defaults = Options::new();
        defaults.insert("reply".to_string(), Value::from("pong"));
        defaults.insert("_hidden".to_string(), Value::Boolean(true));
        registry.register_component("apps.echo", "/src/apps/echo", defaults);
        let resolver = ComponentResolver::new(Arc::new(registry));

        let found = resolver.defaults_for("apps.echo").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["reply"], Value::from("pong"));
    }
}
