//! The root orchestration section.
//!
//! ```text
//! [main]
//! apps = echo, ping
//! backends = http, http2
//! ```
//!
//! Each listed name refers to a section of the same name holding that
//! component's options. Apps become lazy handles; backends are merged now.

use std::collections::HashSet;
use std::sync::Arc;

use crate::components::{AppCatalog, BackendCatalog};
use crate::error::{ComponentKind, Error, Result};
use crate::value::Options;

use super::{ParseContext, SectionInput, SectionValue, split_list};

/// Key listing app names.
pub const APPS_KEY: &str = "apps";
/// Key listing backend names.
pub const BACKENDS_KEY: &str = "backends";

/// Parsed root section: the two component catalogs.
#[derive(Debug, Clone)]
pub struct RootSection {
    pub apps: AppCatalog,
    pub backends: BackendCatalog,
}

impl RootSection {
    /// Render both catalogs as JSON, resolving apps.
    ///
    /// Under best-effort failure handling a failed app renders as `null`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let mut apps = serde_json::Map::new();
        for app in self.apps.iter() {
            let value = match app.descriptor() {
                Ok(descriptor) => serde_json::to_value(&descriptor.options)?,
                Err(e) => {
                    self.apps.tolerate(app.name(), e)?;
                    serde_json::Value::Null
                }
            };
            apps.insert(app.name().to_string(), value);
        }

        let mut backends = serde_json::Map::new();
        for backend in self.backends.iter() {
            backends.insert(backend.name.clone(), serde_json::to_value(&backend.options)?);
        }

        let mut root = serde_json::Map::new();
        root.insert(APPS_KEY.to_string(), serde_json::Value::Object(apps));
        root.insert(BACKENDS_KEY.to_string(), serde_json::Value::Object(backends));
        Ok(serde_json::Value::Object(root))
    }
}

/// Build the app and backend catalogs from the root section.
pub fn parse_root_section(
    ctx: &ParseContext<'_>,
    input: &SectionInput<'_>,
) -> Result<SectionValue> {
    let app_names = component_names(input, APPS_KEY, ComponentKind::App)?;
    let backend_names = component_names(input, BACKENDS_KEY, ComponentKind::Backend)?;

    tracing::debug!(apps = ?app_names, backends = ?backend_names, "Building component catalogs");

    let options_for =
        |name: &str| -> Options { ctx.sections.get(name).cloned().unwrap_or_default() };

    let apps = AppCatalog::new(
        Arc::clone(ctx.merger),
        app_names.iter().map(|name| (name.as_str(), options_for(name))),
        ctx.failure_mode,
    );
    let backends = BackendCatalog::new(
        backend_names
            .iter()
            .map(|name| (name.as_str(), options_for(name))),
    );

    Ok(SectionValue::Root(RootSection { apps, backends }))
}

/// Read a comma-separated name list from the raw text, rejecting duplicates.
fn component_names(
    input: &SectionInput<'_>,
    key: &str,
    kind: ComponentKind,
) -> Result<Vec<String>> {
    let names = split_list(input.raw.get(key).unwrap_or(""), ",");

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(Error::DuplicateComponent {
                kind,
                name: name.clone(),
                section: input.name().to_string(),
            });
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        ComponentMerger, ComponentResolver, FailureMode, Precedence, UnitRegistry,
    };
    use crate::value::{NumericPolicy, Value, normalize_section};
    use conf_ini::RawSection;
    use std::collections::BTreeMap;

    fn parse(raw: RawSection, sections: BTreeMap<String, Options>) -> Result<RootSection> {
        let merger = Arc::new(ComponentMerger::new(
            ComponentResolver::new(Arc::new(UnitRegistry::new())),
            Precedence::default(),
        ));
        let ctx = ParseContext {
            sections: &sections,
            merger: &merger,
            failure_mode: FailureMode::Strict,
        };
        let normalized = normalize_section(&raw, NumericPolicy::Typed);
        let input = SectionInput {
            raw: &raw,
            normalized: &normalized,
        };
        match parse_root_section(&ctx, &input)? {
            SectionValue::Root(root) => Ok(root),
            other => panic!("expected root section, got {other:?}"),
        }
    }

    #[test]
    fn test_app_list_is_trimmed_and_ordered() {
        let raw = RawSection::from_pairs("main", [("apps", "a, b ,,c")]);
        let root = parse(raw, BTreeMap::new()).unwrap();

        assert_eq!(root.apps.names(), vec!["a", "b", "c"]);
        assert!(root.backends.is_empty());
    }

    #[test]
    fn test_missing_keys_give_empty_catalogs() {
        let root = parse(RawSection::new("main"), BTreeMap::new()).unwrap();
        assert!(root.apps.is_empty());
        assert!(root.backends.is_empty());
    }

    #[test]
    fn test_apps_are_not_resolved_while_parsing() {
        // Nothing is registered, so resolving would fail; parsing must not.
        let raw = RawSection::from_pairs("main", [("apps", "ghost")]);
        let root = parse(raw, BTreeMap::new()).unwrap();

        let ghost = root.apps.get("ghost").unwrap();
        assert!(!ghost.is_resolved());
        assert!(ghost.descriptor().is_err());
    }

    #[test]
    fn test_backends_pick_up_their_sections() {
        let raw = RawSection::from_pairs("main", [("backends", "http, http2")]);
        let mut sections = BTreeMap::new();
        let mut http2 = Options::new();
        http2.insert("type".to_string(), Value::from("http"));
        http2.insert("port".to_string(), Value::Integer(8081));
        sections.insert("http2".to_string(), http2);

        let root = parse(raw, sections).unwrap();

        let http = root.backends.get("http").unwrap();
        assert_eq!(http.get("type"), Some(&Value::from("http")));
        let http2 = root.backends.get("http2").unwrap();
        assert_eq!(http2.backend_type(), "http");
        assert_eq!(http2.get("port"), Some(&Value::Integer(8081)));
    }

    #[test]
    fn test_app_raw_options_come_from_own_section() {
        let raw = RawSection::from_pairs("main", [("apps", "echo")]);
        let mut sections = BTreeMap::new();
        let mut echo = Options::new();
        echo.insert("reply".to_string(), Value::from("pong"));
        sections.insert("echo".to_string(), echo.clone());

        let root = parse(raw, sections).unwrap();
        assert_eq!(root.apps.get("echo").unwrap().raw_options(), &echo);
    }

    #[test]
    fn test_duplicate_app_is_rejected() {
        let raw = RawSection::from_pairs("main", [("apps", "echo, ping, echo")]);
        let err = parse(raw, BTreeMap::new()).unwrap_err();

        assert!(matches!(
            err,
            Error::DuplicateComponent { kind: ComponentKind::App, ref name, .. } if name == "echo"
        ));
    }

    #[test]
    fn test_duplicate_backend_is_rejected() {
        let raw = RawSection::from_pairs("main", [("backends", "http,http")]);
        let err = parse(raw, BTreeMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "duplicate backend 'http' in [main]");
    }
}
