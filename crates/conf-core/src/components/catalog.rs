//! Ordered catalogs of apps and backends.

use std::sync::Arc;

use crate::error::{ComponentError, Result};
use crate::value::Options;

use super::lazy::{AppArena, LazyApp};
use super::merge::{AppDescriptor, BackendDescriptor, ComponentMerger};

/// How bulk app resolution treats a failing app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// The first failure is returned to the caller.
    #[default]
    Strict,
    /// Failures are logged and the app is left out.
    BestEffort,
}

/// Apps in listing order, each behind a lazy handle.
#[derive(Debug, Clone)]
pub struct AppCatalog {
    apps: Vec<LazyApp>,
    failure_mode: FailureMode,
}

impl AppCatalog {
    /// Record `apps` without resolving any of them.
    pub fn new<I, S>(merger: Arc<ComponentMerger>, apps: I, failure_mode: FailureMode) -> Self
    where
        I: IntoIterator<Item = (S, Options)>,
        S: Into<String>,
    {
        let mut arena = AppArena::new(merger);
        let tokens: Vec<usize> = apps
            .into_iter()
            .map(|(name, options)| arena.insert(name, options))
            .collect();

        let arena = Arc::new(arena);
        let apps = tokens
            .into_iter()
            .map(|token| LazyApp::new(Arc::clone(&arena), token))
            .collect();

        Self { apps, failure_mode }
    }

    /// Handle for the named app.
    pub fn get(&self, name: &str) -> Option<&LazyApp> {
        self.apps.iter().find(|app| app.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// App names in listing order.
    pub fn names(&self) -> Vec<&str> {
        self.apps.iter().map(LazyApp::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LazyApp> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Resolve every app in order.
    ///
    /// In [`FailureMode::Strict`] the first failure is returned. In
    /// [`FailureMode::BestEffort`] failures are logged and skipped.
    pub fn resolve_all(&self) -> Result<Vec<&AppDescriptor>> {
        let mut resolved = Vec::with_capacity(self.apps.len());
        for app in &self.apps {
            match app.descriptor() {
                Ok(descriptor) => resolved.push(descriptor),
                Err(e) => self.tolerate(app.name(), e)?,
            }
        }
        Ok(resolved)
    }

    /// Apply the failure mode to one app's error.
    pub(crate) fn tolerate(&self, name: &str, error: ComponentError) -> Result<()> {
        match self.failure_mode {
            FailureMode::Strict => Err(error.into()),
            FailureMode::BestEffort => {
                tracing::error!(app = name, %error, "Skipping app that failed to resolve");
                Ok(())
            }
        }
    }
}

/// Backends in listing order, merged eagerly.
#[derive(Debug, Clone, Default)]
pub struct BackendCatalog {
    backends: Vec<BackendDescriptor>,
}

impl BackendCatalog {
    /// Merge every backend now.
    pub fn new<I, S>(backends: I) -> Self
    where
        I: IntoIterator<Item = (S, Options)>,
        S: AsRef<str>,
    {
        Self {
            backends: backends
                .into_iter()
                .map(|(name, options)| ComponentMerger::merge_backend(name.as_ref(), &options))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&BackendDescriptor> {
        self.backends.iter().find(|b| b.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackendDescriptor> {
        self.backends.iter()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
