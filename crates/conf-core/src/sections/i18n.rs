//! The internationalization section.
//!
//! Language lists use a nested list syntax, one parenthesized `(code, label)`
//! group per language:
//!
//! ```text
//! [i18n]
//! default_language = en
//! languages = (en,English),(fr,French)
//! web_languages = (en,English)
//! sms_languages = (en,English),(sw,Swahili)
//! locale_paths = locale, contrib/locale
//! ```
//!
//! Only the keys above are carried into the parsed section.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::value::Value;

use super::{ParseContext, SectionInput, SectionValue, split_list};

pub const DEFAULT_LANGUAGE_KEY: &str = "default_language";
pub const LANGUAGES_KEY: &str = "languages";
pub const WEB_LANGUAGES_KEY: &str = "web_languages";
pub const SMS_LANGUAGES_KEY: &str = "sms_languages";
pub const LOCALE_PATHS_KEY: &str = "locale_paths";

/// `)` then `(`, with an optional comma and whitespace between.
static GROUP_BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\s*,?\s*\(").expect("Invalid group boundary regex"));

/// One `(code, label)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub code: String,
    pub label: String,
}

impl LanguageEntry {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Parsed internationalization settings. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct I18nSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_languages: Option<Vec<LanguageEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_languages: Option<Vec<LanguageEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_paths: Option<Vec<String>>,
}

pub fn parse_i18n_section(
    _ctx: &ParseContext<'_>,
    input: &SectionInput<'_>,
) -> Result<SectionValue> {
    let section = input.name();
    let language_list = |key: &str| -> Result<Option<Vec<LanguageEntry>>> {
        input
            .raw
            .get(key)
            .map(|text| parse_language_list(section, key, text))
            .transpose()
    };

    Ok(SectionValue::I18n(I18nSection {
        default_language: input.normalized.get(DEFAULT_LANGUAGE_KEY).cloned(),
        languages: language_list(LANGUAGES_KEY)?,
        web_languages: language_list(WEB_LANGUAGES_KEY)?,
        sms_languages: language_list(SMS_LANGUAGES_KEY)?,
        locale_paths: input
            .raw
            .get(LOCALE_PATHS_KEY)
            .map(|text| split_list(text, ",")),
    }))
}

/// Parse `(code,label),(code,label),...` into ordered entries.
///
/// Groups are split at each `)(` boundary, surrounding parentheses are
/// stripped, and the remainder is split on commas into exactly two trimmed
/// fields.
pub fn parse_language_list(section: &str, key: &str, text: &str) -> Result<Vec<LanguageEntry>> {
    GROUP_BOUNDARY_REGEX
        .split(text)
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(|group| {
            let inner = group.trim_matches(['(', ')']);
            match split_list(inner, ",").as_slice() {
                [code, label] => Ok(LanguageEntry::new(code.as_str(), label.as_str())),
                _ => Err(Error::InvalidValue {
                    section: section.to_string(),
                    key: key.to_string(),
                    reason: format!("expected a (code, label) pair, got {group:?}"),
                }),
            }
        })
        .collect()
}
