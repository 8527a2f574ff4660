//! Building the merged configuration record of one component.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ComponentError;
use crate::value::{Options, Value};

use super::resolver::ComponentResolver;

/// Reserved key: the component's type. Forbidden in app sections.
pub const TYPE_KEY: &str = "type";
/// Resolution metadata: dotted path of the resolved code unit.
pub const MODULE_KEY: &str = "module";
/// Resolution metadata: filesystem location of the resolved code unit.
pub const PATH_KEY: &str = "path";

/// Which side wins when user options and component defaults share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// Values from the configuration source override component defaults.
    #[default]
    UserOptions,
    /// Component-declared defaults override the configuration source.
    ComponentDefaults,
}

/// Combine user options with component defaults.
pub fn merge_options(user: &Options, defaults: &Options, precedence: Precedence) -> Options {
    let (base, overlay) = match precedence {
        Precedence::UserOptions => (defaults, user),
        Precedence::ComponentDefaults => (user, defaults),
    };
    let mut merged = base.clone();
    merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Fully merged record of an app.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppDescriptor {
    /// Name the app was requested by.
    pub name: String,
    /// Dotted path of the code unit that implements it.
    pub module: String,
    /// Filesystem location of that code unit.
    pub location: PathBuf,
    /// Merged options, including `type`, `module` and `path`.
    pub options: Options,
}

impl AppDescriptor {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn location(&self) -> &Path {
        &self.location
    }
}

/// Merged record of a backend. No code unit is resolved for backends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendDescriptor {
    pub name: String,
    pub options: Options,
}

impl BackendDescriptor {
    /// The backend's type: the explicit `type` option, or its name.
    pub fn backend_type(&self) -> String {
        self.options
            .get(TYPE_KEY)
            .map(Value::to_string)
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }
}

/// Merges component sections into descriptors.
#[derive(Debug, Clone)]
pub struct ComponentMerger {
    resolver: ComponentResolver,
    precedence: Precedence,
}

impl ComponentMerger {
    pub fn new(resolver: ComponentResolver, precedence: Precedence) -> Self {
        Self {
            resolver,
            precedence,
        }
    }

    pub fn resolver(&self) -> &ComponentResolver {
        &self.resolver
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    /// Resolve and merge an app.
    ///
    /// A `type` option is rejected before anything is resolved. The
    /// resolution metadata (`type`, `module`, `path`) is written last and is
    /// never overridden by options or defaults.
    pub fn merge_app(
        &self,
        name: &str,
        options: &Options,
    ) -> Result<AppDescriptor, ComponentError> {
        if options.contains_key(TYPE_KEY) {
            return Err(ComponentError::DeprecatedOption {
                component: name.to_string(),
                option: TYPE_KEY.to_string(),
            });
        }

        let resolved = self.resolver.resolve(name)?;
        let defaults = self.resolver.defaults_for(&resolved.path)?;

        let mut merged = merge_options(options, &defaults, self.precedence);
        merged.insert(TYPE_KEY.to_string(), Value::from(name));
        merged.insert(MODULE_KEY.to_string(), Value::from(resolved.path.as_str()));
        merged.insert(
            PATH_KEY.to_string(),
            Value::from(resolved.unit.location.display().to_string()),
        );

        tracing::debug!(
            app = name,
            module = %resolved.path,
            defaults = defaults.len(),
            "Resolved app"
        );

        Ok(AppDescriptor {
            name: name.to_string(),
            module: resolved.path,
            location: resolved.unit.location,
            options: merged,
        })
    }

    /// Merge a backend. `type` defaults to the backend's name.
    pub fn merge_backend(name: &str, options: &Options) -> BackendDescriptor {
        let mut merged = options.clone();
        merged
            .entry(TYPE_KEY.to_string())
            .or_insert_with(|| Value::from(name));

        BackendDescriptor {
            name: name.to_string(),
            options: merged,
        }
    }
}
