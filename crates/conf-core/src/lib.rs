//! Configuration resolution and component discovery.
//!
//! This crate turns sectioned key/value text into a typed configuration
//! tree, implementing:
//!
//! - **Normalization**: boolean keywords and numeric literals become typed values
//! - **Section parsing**: a fixed table of parsers for the `main`, `log` and `i18n` sections
//! - **Component resolution**: ordered search for each app's code unit across namespace roots
//! - **Component merging**: user options, component defaults and resolution metadata
//! - **Lazy handles**: apps resolve on first access, exactly once
//!
//! # Architecture
//!
//! ```text
//!   conf-ini (raw sections)
//!        |
//!   value::normalize_section
//!        |
//!   sections::parse_section ---- components (resolver, merger, lazy handles)
//!        |
//!   ConfigStore
//! ```
//!
//! # Example
//!
//! ```
//! use conf_core::{CodeUnit, ConfigStore, UnitRegistry, Value};
//!
//! let mut units = UnitRegistry::new();
//! units.register("apps.echo", CodeUnit::new("/srv/apps/echo"));
//!
//! let store = ConfigStore::builder()
//!     .units(units)
//!     .parse("[main]\napps = echo\nbackends = http\n\n[echo]\nloud = yes\n")
//!     .unwrap();
//!
//! let echo = store.apps().unwrap().get("echo").unwrap();
//! assert_eq!(echo.get("module").unwrap(), Some(&Value::from("apps.echo")));
//! assert_eq!(echo.get("loud").unwrap(), Some(&Value::Boolean(true)));
//! ```

pub mod components;
pub mod error;
pub mod json;
pub mod lookup;
pub mod sections;
pub mod store;
pub mod value;

pub use components::{
    AppCatalog, AppDescriptor, BackendCatalog, BackendDescriptor, ChainedUnits, CodeUnit,
    ComponentMerger, ComponentResolver, DEFAULT_NAMESPACE_ROOTS, DirectoryUnits, FailureMode,
    LazyApp, Precedence, UnitRegistry, UnitSource, merge_options,
};
pub use error::{ComponentError, ComponentKind, Error, Result};
pub use json::JsonConfig;
pub use lookup::SectionLookup;
pub use sections::{
    I18N_SECTION, I18nSection, LOG_SECTION, LanguageEntry, LogSection, ROOT_SECTION, RootSection,
    SectionValue,
};
pub use store::{ConfigStore, ConfigStoreBuilder};
pub use value::{NumericPolicy, Options, Value, normalize, normalize_with};
