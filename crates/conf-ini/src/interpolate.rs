//! `%(name)s` substitution within a section.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Deepest chain of references followed before giving up.
pub(crate) const MAX_DEPTH: usize = 10;

static REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%\(([^)]+)\)s").expect("Invalid reference regex"));

/// Expand every reference in `value` against `vars`.
///
/// `%%` yields a literal `%`. Referenced names are lower-cased before lookup,
/// matching how keys are stored.
pub(crate) fn interpolate(
    section: &str,
    key: &str,
    value: &str,
    vars: &BTreeMap<String, String>,
) -> Result<String> {
    expand(section, key, value, vars, 1)
}

fn expand(
    section: &str,
    key: &str,
    value: &str,
    vars: &BTreeMap<String, String>,
    depth: usize,
) -> Result<String> {
    if depth > MAX_DEPTH {
        return Err(Error::InterpolationDepth {
            section: section.to_string(),
            key: key.to_string(),
            depth: MAX_DEPTH,
        });
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(after) = rest.strip_prefix("%%") {
            out.push('%');
            rest = after;
            continue;
        }

        let caps = REFERENCE_REGEX
            .captures(rest)
            .ok_or_else(|| Error::InterpolationSyntax {
                section: section.to_string(),
                key: key.to_string(),
                fragment: rest.chars().take(16).collect(),
            })?;
        let reference = caps[1].to_lowercase();
        let consumed = caps[0].len();

        let replacement = vars.get(&reference).ok_or_else(|| Error::MissingReference {
            section: section.to_string(),
            key: key.to_string(),
            reference: reference.clone(),
        })?;

        if replacement.contains('%') {
            out.push_str(&expand(section, key, replacement, vars, depth + 1)?);
        } else {
            out.push_str(replacement);
        }
        rest = &rest[consumed..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_value_is_untouched() {
        let out = interpolate("s", "k", "no refs here", &vars(&[])).unwrap();
        assert_eq!(out, "no refs here");
    }

    #[test]
    fn test_reference_is_expanded() {
        let v = vars(&[("base", "/srv")]);
        let out = interpolate("s", "k", "%(base)s/app", &v).unwrap();
        assert_eq!(out, "/srv/app");
    }

    #[test]
    fn test_reference_name_is_case_insensitive() {
        let v = vars(&[("base", "/srv")]);
        let out = interpolate("s", "k", "%(BASE)s", &v).unwrap();
        assert_eq!(out, "/srv");
    }

    #[test]
    fn test_nested_reference() {
        let v = vars(&[("a", "%(b)s!"), ("b", "deep")]);
        let out = interpolate("s", "k", "<%(a)s>", &v).unwrap();
        assert_eq!(out, "<deep!>");
    }

    #[test]
    fn test_double_percent_is_literal() {
        let out = interpolate("s", "k", "100%%", &vars(&[])).unwrap();
        assert_eq!(out, "100%");
    }

    #[test]
    fn test_missing_reference_errors() {
        let err = interpolate("s", "k", "%(nope)s", &vars(&[])).unwrap_err();
        assert!(
            matches!(err, Error::MissingReference { ref reference, .. } if reference == "nope")
        );
    }

    #[test]
    fn test_bare_percent_errors() {
        let err = interpolate("s", "k", "50% off", &vars(&[])).unwrap_err();
        assert!(matches!(err, Error::InterpolationSyntax { .. }));
    }

    #[test]
    fn test_cycle_hits_depth_limit() {
        let v = vars(&[("a", "%(b)s"), ("b", "%(a)s")]);
        let err = interpolate("s", "k", "%(a)s", &v).unwrap_err();
        assert!(matches!(err, Error::InterpolationDepth { depth: MAX_DEPTH, .. }));
    }
}
