//! Per-section semantic parsers.
//!
//! A section's name selects its parser from a fixed table. Sections without
//! an entry are copied through from the normalized pass unchanged.
//!
//! | section | parser | result |
//! |---|---|---|
//! | `main` | [`root::parse_root_section`] | [`SectionValue::Root`] |
//! | `log` | [`log::parse_log_section`] | [`SectionValue::Log`] |
//! | `i18n` | [`i18n::parse_i18n_section`] | [`SectionValue::I18n`] |
//! | anything else | copy | [`SectionValue::Plain`] |

pub mod i18n;
pub mod log;
pub mod root;

use std::collections::BTreeMap;
use std::sync::Arc;

use conf_ini::RawSection;

use crate::components::{ComponentMerger, FailureMode};
use crate::error::Result;
use crate::value::Options;

pub use i18n::{I18nSection, LanguageEntry};
pub use log::LogSection;
pub use root::RootSection;

/// Root orchestration section listing apps and backends.
pub const ROOT_SECTION: &str = "main";
/// Logging section.
pub const LOG_SECTION: &str = "log";
/// Internationalization section.
pub const I18N_SECTION: &str = "i18n";

/// The semantically parsed value of one section.
#[derive(Debug, Clone)]
pub enum SectionValue {
    /// No dedicated parser; the normalized options as-is.
    Plain(Options),
    Root(RootSection),
    Log(LogSection),
    I18n(I18nSection),
}

impl SectionValue {
    /// Plain or log options, if this section is a flat mapping.
    pub fn as_options(&self) -> Option<&Options> {
        match self {
            SectionValue::Plain(options) => Some(options),
            SectionValue::Log(log) => Some(log.options()),
            _ => None,
        }
    }

    pub fn as_root(&self) -> Option<&RootSection> {
        match self {
            SectionValue::Root(root) => Some(root),
            _ => None,
        }
    }

    pub fn as_log(&self) -> Option<&LogSection> {
        match self {
            SectionValue::Log(log) => Some(log),
            _ => None,
        }
    }

    pub fn as_i18n(&self) -> Option<&I18nSection> {
        match self {
            SectionValue::I18n(i18n) => Some(i18n),
            _ => None,
        }
    }

    /// Render as JSON. Apps are resolved; how failures are treated follows
    /// the catalog's [`FailureMode`].
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(match self {
            SectionValue::Plain(options) => serde_json::to_value(options)?,
            SectionValue::Log(log) => serde_json::to_value(log.options())?,
            SectionValue::I18n(i18n) => serde_json::to_value(i18n)?,
            SectionValue::Root(root) => root.to_json()?,
        })
    }
}

/// What every section parser gets to see.
pub struct ParseContext<'a> {
    /// Normalized options of every section, by name.
    pub sections: &'a BTreeMap<String, Options>,
    pub merger: &'a Arc<ComponentMerger>,
    pub failure_mode: FailureMode,
}

/// One section in both raw and normalized form.
pub struct SectionInput<'a> {
    pub raw: &'a RawSection,
    pub normalized: &'a Options,
}

impl SectionInput<'_> {
    pub fn name(&self) -> &str {
        self.raw.name()
    }
}

/// Signature shared by all section parsers.
pub type SectionParser = fn(&ParseContext<'_>, &SectionInput<'_>) -> Result<SectionValue>;

static SECTION_PARSERS: &[(&str, SectionParser)] = &[
    (ROOT_SECTION, root::parse_root_section),
    (LOG_SECTION, log::parse_log_section),
    (I18N_SECTION, i18n::parse_i18n_section),
];

/// Parser registered for a section name, if any.
pub fn parser_for(name: &str) -> Option<SectionParser> {
    SECTION_PARSERS
        .iter()
        .find(|(section, _)| *section == name)
        .map(|(_, parser)| *parser)
}

/// Section names that have a dedicated parser.
pub fn recognized_sections() -> Vec<&'static str> {
    SECTION_PARSERS.iter().map(|(name, _)| *name).collect()
}

/// Run the registered parser for a section, or copy it through.
pub fn parse_section(ctx: &ParseContext<'_>, input: &SectionInput<'_>) -> Result<SectionValue> {
    match parser_for(input.name()) {
        Some(parser) => {
            tracing::debug!(section = input.name(), "Parsing section");
            parser(ctx, input)
        }
        None => Ok(SectionValue::Plain(input.normalized.clone())),
    }
}

/// Split on `separator`, trim each item and drop empty ones.
pub fn split_list(value: &str, separator: &str) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
