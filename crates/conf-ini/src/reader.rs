//! Line-oriented reader for sectioned key/value text.
//!
//! Several inputs can be fed to one [`IniReader`]; sections with the same
//! name merge and later keys win. [`IniReader::finish`] applies `[DEFAULT]`
//! fallbacks and `%(name)s` interpolation and yields a [`RawSource`].

use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::DEFAULT_SECTION;
use crate::error::{Error, Result};
use crate::interpolate::interpolate;
use crate::source::{RawSection, RawSource};

/// `[name]`, optionally followed by a comment.
static SECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\]\s*(?:[;#].*)?$").expect("Invalid section regex")
});

/// `key = value` or `key: value`. The key cannot start with a separator or
/// whitespace.
static OPTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:=\s][^:=]*)[:=](.*)$").expect("Invalid option regex")
});

#[derive(Debug, Clone, Copy)]
enum Target {
    Defaults,
    Section(usize),
}

/// Accumulates sections from one or more inputs.
#[derive(Debug, Default)]
pub struct IniReader {
    defaults: BTreeMap<String, String>,
    sections: Vec<(String, BTreeMap<String, String>)>,
    sources: Vec<PathBuf>,
}

impl IniReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text`, merging it into what has been read so far.
    ///
    /// `origin` names the input in error messages.
    pub fn read_str(&mut self, origin: &str, text: &str) -> Result<()> {
        let mut target: Option<Target> = None;
        let mut option: Option<String> = None;

        for (idx, line) in text.lines().enumerate() {
            let lineno = idx + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }
            // Legacy "rem" comments
            if line.starts_with(['r', 'R'])
                && line.split_whitespace().next().map(str::to_lowercase).as_deref() == Some("rem")
            {
                continue;
            }

            if line.starts_with(char::is_whitespace) {
                if let (Some(t), Some(key)) = (target, option.as_ref()) {
                    let map = self.map_mut(t);
                    if let Some(existing) = map.get_mut(key) {
                        existing.push('\n');
                        existing.push_str(trimmed);
                    }
                    continue;
                }
            }

            if let Some(caps) = SECTION_REGEX.captures(line) {
                let name = caps[1].trim();
                target = Some(self.open_section(name));
                option = None;
                continue;
            }

            let Some(current) = target else {
                return Err(Error::MissingSectionHeader {
                    origin: origin.to_string(),
                    line: lineno,
                    text: line.to_string(),
                });
            };

            let Some(caps) = OPTION_REGEX.captures(line) else {
                return Err(Error::MalformedLine {
                    origin: origin.to_string(),
                    line: lineno,
                    text: line.to_string(),
                });
            };

            let key = caps[1].trim().to_lowercase();
            let value = clean_value(&caps[2]);
            self.map_mut(current).insert(key.clone(), value);
            option = Some(key);
        }

        Ok(())
    }

    /// Read a file. Returns `Ok(false)` if the file does not exist.
    pub fn read_path(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(?path, "Config source not found, skipping");
                return Ok(false);
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        tracing::debug!(?path, "Reading config source");
        self.read_str(&path.display().to_string(), &text)?;
        self.sources.push(path.to_path_buf());
        Ok(true)
    }

    /// Read several files in order, skipping missing ones.
    pub fn read_paths<I, P>(&mut self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.read_path(path)?;
        }
        Ok(())
    }

    /// Apply defaults and interpolation, producing the final sections.
    pub fn finish(self) -> Result<RawSource> {
        let mut sections = Vec::with_capacity(self.sections.len());

        for (name, entries) in self.sections {
            let mut vars = self.defaults.clone();
            vars.extend(entries);

            let mut section = RawSection::new(name.as_str());
            for (key, value) in &vars {
                section.insert(key.as_str(), interpolate(&name, key, value, &vars)?);
            }
            sections.push(section);
        }

        Ok(RawSource::new(sections, self.sources))
    }

    fn open_section(&mut self, name: &str) -> Target {
        if name == DEFAULT_SECTION {
            return Target::Defaults;
        }
        match self.sections.iter().position(|(n, _)| n == name) {
            Some(idx) => Target::Section(idx),
            None => {
                self.sections.push((name.to_string(), BTreeMap::new()));
                Target::Section(self.sections.len() - 1)
            }
        }
    }

    fn map_mut(&mut self, target: Target) -> &mut BTreeMap<String, String> {
        match target {
            Target::Defaults => &mut self.defaults,
            Target::Section(idx) => &mut self.sections[idx].1,
        }
    }
}

/// Strip an inline `;` comment (only when preceded by whitespace) and
/// surrounding whitespace. A bare `""` means the empty string.
fn clean_value(raw: &str) -> String {
    let mut value = raw;
    let bytes = raw.as_bytes();
    if let Some(pos) = raw
        .char_indices()
        .find(|&(i, c)| c == ';' && i > 0 && bytes[i - 1].is_ascii_whitespace())
        .map(|(i, _)| i)
    {
        value = &raw[..pos];
    }

    let value = value.trim();
    if value == "\"\"" {
        String::new()
    } else {
        value.to_string()
    }
}

/// Parse a single string into sections.
pub fn parse_str(text: &str) -> Result<RawSource> {
    let mut reader = IniReader::new();
    reader.read_str("<string>", text)?;
    reader.finish()
}

/// Read several files in order into one set of sections.
///
/// Missing files are skipped; [`RawSource::sources`] lists the ones read.
pub fn read_paths<I, P>(paths: I) -> Result<RawSource>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut reader = IniReader::new();
    reader.read_paths(paths)?;
    reader.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_value_strips_inline_comment() {
        assert_eq!(clean_value(" echo, ping ; the apps"), "echo, ping");
    }

    #[test]
    fn test_clean_value_keeps_semicolon_without_space() {
        assert_eq!(clean_value(" a;b "), "a;b");
    }

    #[test]
    fn test_clean_value_empty_quotes() {
        assert_eq!(clean_value(" \"\" "), "");
    }

    #[test]
    fn test_sections_keep_first_seen_order() {
        let source = parse_str("[b]\nx = 1\n[a]\ny = 2\n").unwrap();
        assert_eq!(source.section_names(), vec!["b", "a"]);
    }
}
