//! Deferred, memoized app resolution.
//!
//! Resolving an app loads its code unit, which may run arbitrary
//! initialization. Catalog construction therefore only records a token per
//! app; the descriptor is computed into the arena slot on first access and
//! cached, success or failure, for as long as any handle is alive.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::ComponentError;
use crate::value::{Options, Value};

use super::merge::{AppDescriptor, ComponentMerger};

type Resolution = Result<AppDescriptor, ComponentError>;

struct Slot {
    name: String,
    options: Options,
    resolution: OnceLock<Resolution>,
}

/// Storage for every app of one catalog.
pub(crate) struct AppArena {
    merger: Arc<ComponentMerger>,
    slots: Vec<Slot>,
}

impl AppArena {
    pub(crate) fn new(merger: Arc<ComponentMerger>) -> Self {
        Self {
            merger,
            slots: Vec::new(),
        }
    }

    /// Record an app without resolving it. Returns its token.
    pub(crate) fn insert(&mut self, name: impl Into<String>, options: Options) -> usize {
        self.slots.push(Slot {
            name: name.into(),
            options,
            resolution: OnceLock::new(),
        });
        self.slots.len() - 1
    }

    fn force(&self, token: usize) -> &Resolution {
        let slot = &self.slots[token];
        // OnceLock runs the initializer at most once, even under concurrent
        // first access.
        slot.resolution.get_or_init(|| {
            tracing::debug!(app = %slot.name, "Resolving app on first access");
            self.merger.merge_app(&slot.name, &slot.options)
        })
    }
}

/// Handle to one app's descriptor, resolved on first access.
///
/// Clones share the same cached result.
#[derive(Clone)]
pub struct LazyApp {
    arena: Arc<AppArena>,
    token: usize,
}

impl LazyApp {
    pub(crate) fn new(arena: Arc<AppArena>, token: usize) -> Self {
        Self { arena, token }
    }

    /// Name the app was listed under.
    pub fn name(&self) -> &str {
        &self.arena.slots[self.token].name
    }

    /// Options from the app's own section, before merging.
    pub fn raw_options(&self) -> &Options {
        &self.arena.slots[self.token].options
    }

    /// Whether resolution has already run.
    pub fn is_resolved(&self) -> bool {
        self.arena.slots[self.token].resolution.get().is_some()
    }

    /// The merged descriptor, resolving it if needed.
    pub fn descriptor(&self) -> Result<&AppDescriptor, ComponentError> {
        self.arena.force(self.token).as_ref().map_err(Clone::clone)
    }

    /// Keys of the merged options.
    pub fn keys(&self) -> Result<Vec<&str>, ComponentError> {
        Ok(self.descriptor()?.keys().collect())
    }

    /// Look up one merged option.
    pub fn get(&self, key: &str) -> Result<Option<&Value>, ComponentError> {
        Ok(self.descriptor()?.get(key))
    }
}

impl fmt::Debug for LazyApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = &self.arena.slots[self.token];
        f.debug_struct("LazyApp")
            .field("name", &slot.name)
            .field("resolution", &slot.resolution.get())
            .finish()
    }
}
