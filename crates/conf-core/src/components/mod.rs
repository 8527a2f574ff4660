//! Component discovery and merging.
//!
//! Components are the pluggable units named in the root section: apps and
//! backends. Apps are resolved to a code unit by searching namespace roots in
//! a fixed order, merged with the defaults that unit declares, and exposed
//! through lazy handles. Backends are merged eagerly and never resolved.
//!
//! # Resolution order
//!
//! For an app named `echo` with the default roots:
//!
//! 1. `echo` (fully-qualified)
//! 2. `apps.echo`
//! 3. `contrib.apps.echo`
//!
//! The first path present in the [`UnitSource`] wins. Its defaults are read
//! from `<path>.config` if that unit exists.

mod catalog;
mod directory;
mod lazy;
mod merge;
mod resolver;
mod unit;

/// Name of the sub-unit holding a component's declared defaults.
pub const DEFAULTS_UNIT: &str = "config";

pub use catalog::{AppCatalog, BackendCatalog, FailureMode};
pub use directory::{DirectoryUnits, MODULE_EXTENSION};
pub use lazy::LazyApp;
pub use merge::{
    AppDescriptor, BackendDescriptor, ComponentMerger, MODULE_KEY, PATH_KEY, Precedence,
    TYPE_KEY, merge_options,
};
pub use resolver::{ComponentResolver, DEFAULT_NAMESPACE_ROOTS, ResolvedUnit};
pub use unit::{ChainedUnits, CodeUnit, UnitFactory, UnitRegistry, UnitSource};
