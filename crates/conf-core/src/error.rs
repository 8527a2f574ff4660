//! Error types for conf-core

use std::fmt;

/// Result type for conf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of pluggable component named in the root section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    App,
    Backend,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::App => f.write_str("app"),
            ComponentKind::Backend => f.write_str("backend"),
        }
    }
}

/// Failures scoped to a single component.
///
/// These are cached by lazy handles and handed out on every access, so the
/// type is `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    /// A reserved key was supplied in an app section
    #[error("the '{option}' option is not supported for app '{component}'")]
    DeprecatedOption { component: String, option: String },

    /// No namespace root yielded a code unit for the name
    #[error("couldn't resolve component '{name}' directly or under {}", .roots.join(" or "))]
    NotFound { name: String, roots: Vec<String> },

    /// A code unit exists but failed while loading
    #[error("failed to load '{path}': {reason}")]
    LoadFailed { path: String, reason: String },
}

/// Errors that can occur while building or reading a configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed source text
    #[error(transparent)]
    Parse(#[from] conf_ini::Error),

    /// A recognized section holds a value its parser cannot interpret
    #[error("[{section}] {key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        reason: String,
    },

    /// The same name appears twice in one catalog list
    #[error("duplicate {kind} '{name}' in [{section}]")]
    DuplicateComponent {
        kind: ComponentKind,
        name: String,
        section: String,
    },

    /// Component resolution failed
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// Alternate JSON document whose top level is not an object
    #[error("JSON config must be an object at the top level")]
    JsonNotObject,

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
