//! Shared test utilities for the component-config workspace.
//!
//! This crate provides on-disk fixtures so that crate test suites do not each
//! hand-roll temp directories. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`site`] - [`TestSite`] builder for config files plus component trees

pub mod site;

pub use site::TestSite;
