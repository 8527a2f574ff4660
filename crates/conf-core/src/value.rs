//! Typed scalar values and the normalization pass.
//!
//! The source format stores every value as a string. Normalization turns the
//! usual boolean keywords into booleans and, under [`NumericPolicy::Typed`],
//! numeric literals into integers or floats:
//!
//! | raw | normalized |
//! |---|---|
//! | `"mudkips"` | `String("mudkips")` |
//! | `"false"`, `"FALSE"`, `"no"` | `Boolean(false)` |
//! | `"true"`, `"TRUE"`, `"yes"` | `Boolean(true)` |
//! | `"0"`, `"0000"`, `"-12"` | `Integer` |
//! | `"1.0"`, `"0001.00"`, `"1e3"` | `Float` |

use conf_ini::RawSection;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Merged or normalized options of one section or component.
pub type Options = BTreeMap<String, Value>;

/// A normalized configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// How numeric-looking strings are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// Integer and float literals become `Integer` / `Float`.
    #[default]
    Typed,
    /// Only boolean keywords are converted; everything else stays a string.
    Strings,
}

/// Normalize with the default [`NumericPolicy::Typed`].
pub fn normalize(raw: &str) -> Value {
    normalize_with(raw, NumericPolicy::Typed)
}

/// Convert one raw string into exactly one [`Value`] variant.
pub fn normalize_with(raw: &str, policy: NumericPolicy) -> Value {
    match raw.to_ascii_lowercase().as_str() {
        "false" | "no" => return Value::Boolean(false),
        "true" | "yes" => return Value::Boolean(true),
        _ => {}
    }

    if policy == NumericPolicy::Strings {
        return Value::String(raw.to_string());
    }

    if is_integer_literal(raw) {
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Integer(i);
        }
    }
    // Words such as "inf" or "NaN" parse as floats but are not numbers here,
    // and neither are literals that overflow to infinity.
    if raw.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
    }

    Value::String(raw.to_string())
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Normalize every value of a section independently.
pub fn normalize_section(section: &RawSection, policy: NumericPolicy) -> Options {
    section
        .iter()
        .map(|(key, value)| (key.to_string(), normalize_with(value, policy)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("false", false)]
    #[case("FALSE", false)]
    #[case("No", false)]
    #[case("no", false)]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("yes", true)]
    #[case("YeS", true)]
    fn test_boolean_keywords(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(normalize(raw), Value::Boolean(expected));
        assert_eq!(
            normalize_with(raw, NumericPolicy::Strings),
            Value::Boolean(expected)
        );
    }

    #[rstest]
    #[case("0", 0)]
    #[case("0000", 0)]
    #[case("42", 42)]
    #[case("-12", -12)]
    #[case("+7", 7)]
    fn test_integer_literals_are_typed(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(normalize(raw), Value::Integer(expected));
    }

    #[rstest]
    #[case("1.5", 1.5)]
    #[case("1.0", 1.0)]
    #[case("0001.00", 1.0)]
    #[case("1e3", 1000.0)]
    #[case("-.25", -0.25)]
    fn test_float_literals_are_typed(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(normalize(raw), Value::Float(expected));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        assert_eq!(
            normalize("99999999999999999999"),
            Value::Float(99999999999999999999.0)
        );
    }

    #[rstest]
    #[case("mudkips")]
    #[case("")]
    #[case("inf")]
    #[case("NaN")]
    #[case("0x10")]
    #[case("1_000")]
    #[case("1.2.3")]
    #[case("-")]
    #[case("echo, ping")]
    #[case("1e999")]
    #[case("-1e999")]
    fn test_other_strings_stay_strings(#[case] raw: &str) {
        assert_eq!(normalize(raw), Value::String(raw.to_string()));
    }

    #[rstest]
    #[case("0000")]
    #[case("1.5")]
    #[case("42")]
    #[case("1e3")]
    fn test_strings_policy_keeps_numbers_as_text(#[case] raw: &str) {
        assert_eq!(
            normalize_with(raw, NumericPolicy::Strings),
            Value::String(raw.to_string())
        );
    }

    #[test]
    fn test_normalize_section_touches_every_key() {
        let section = RawSection::from_pairs(
            "s",
            [("debug", "yes"), ("port", "8080"), ("host", "localhost")],
        );
        let options = normalize_section(&section, NumericPolicy::Typed);

        assert_eq!(options.len(), 3);
        assert_eq!(options["debug"], Value::Boolean(true));
        assert_eq!(options["port"], Value::Integer(8080));
        assert_eq!(options["host"], Value::from("localhost"));
    }

    #[test]
    fn test_display_round_trips_text() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
    }
}
