//! The logging section: built-in defaults overlaid by explicit options.

use crate::error::Result;
use crate::value::{Options, Value};

use super::{ParseContext, SectionInput, SectionValue};

pub const LEVEL_KEY: &str = "level";
pub const FILE_KEY: &str = "file";

/// Level used when the section does not set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Destination used when the section does not set one.
pub const DEFAULT_LOG_FILE: &str = "component-config.log";

/// Logging options. Explicit values always win over the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSection {
    options: Options,
}

impl LogSection {
    /// Only the built-in defaults.
    pub fn defaults() -> Self {
        let mut options = Options::new();
        options.insert(LEVEL_KEY.to_string(), Value::from(DEFAULT_LOG_LEVEL));
        options.insert(FILE_KEY.to_string(), Value::from(DEFAULT_LOG_FILE));
        Self { options }
    }

    /// Defaults overlaid by `explicit`.
    pub fn from_options(explicit: &Options) -> Self {
        let mut section = Self::defaults();
        section
            .options
            .extend(explicit.iter().map(|(k, v)| (k.clone(), v.clone())));
        section
    }

    pub fn level(&self) -> String {
        self.options
            .get(LEVEL_KEY)
            .map(Value::to_string)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }

    pub fn file(&self) -> String {
        self.options
            .get(FILE_KEY)
            .map(Value::to_string)
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self::defaults()
    }
}

pub fn parse_log_section(
    _ctx: &ParseContext<'_>,
    input: &SectionInput<'_>,
) -> Result<SectionValue> {
    Ok(SectionValue::Log(LogSection::from_options(input.normalized)))
}
