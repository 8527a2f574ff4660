//! Sectioned key/value source reader.
//!
//! This crate turns INI-style text into an ordered collection of named
//! sections, each a mapping of lower-cased keys to string values. It performs
//! no interpretation beyond the text format itself: every value stays a
//! string, and typing happens in `conf-core`.
//!
//! # Format
//!
//! ```text
//! [DEFAULT]
//! base = /srv/app
//!
//! [main]
//! apps = echo, ping     ; inline comment
//! backends = http
//!
//! [echo]
//! root = %(base)s/echo
//! motd = first line
//!     second line
//! ```
//!
//! # Example
//!
//! ```
//! let source = conf_ini::parse_str("[main]\napps = echo\n").unwrap();
//! assert_eq!(source.section("main").unwrap().get("apps"), Some("echo"));
//! ```

pub mod error;
mod interpolate;
pub mod reader;
pub mod source;

pub use error::{Error, Result};
pub use reader::{IniReader, parse_str, read_paths};
pub use source::{RawSection, RawSource};

/// Name of the section whose keys are visible from every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";
