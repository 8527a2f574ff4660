//! Command implementations for conf-cli

pub mod components;
pub mod show;
pub mod sources;

pub use components::{run_apps, run_backends};
pub use show::{run_get, run_show};
pub use sources::run_sources;

use conf_core::{ConfigStore, DirectoryUnits, FailureMode, NumericPolicy, Precedence};

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Load the configuration described by the command line.
///
/// It is an error if none of the files exist.
pub fn load_store(args: &SourceArgs) -> Result<ConfigStore> {
    let mut builder = ConfigStore::builder()
        .precedence(if args.defaults_win {
            Precedence::ComponentDefaults
        } else {
            Precedence::UserOptions
        })
        .numeric_policy(if args.raw_numbers {
            NumericPolicy::Strings
        } else {
            NumericPolicy::Typed
        })
        .failure_mode(if args.best_effort {
            FailureMode::BestEffort
        } else {
            FailureMode::Strict
        });

    if let Some(dir) = &args.components {
        builder = builder.units(DirectoryUnits::new(dir));
    }
    if !args.roots.is_empty() {
        builder = builder.namespace_roots(args.roots.iter().cloned());
    }

    let store = builder.load(&args.config)?;
    if store.sources().is_empty() {
        let tried: Vec<String> = args
            .config
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        return Err(CliError::user(format!(
            "No configuration file found (tried {})",
            tried.join(", ")
        )));
    }

    Ok(store)
}

/// Print `value` flattened into `key = value` lines, nested keys joined
/// with dots.
pub(crate) fn print_flat(prefix: &str, value: &serde_json::Value) {
    for line in flat_lines(prefix, value) {
        println!("{line}");
    }
}

/// The lines [`print_flat`] prints. An empty object at the top level yields
/// no lines; a nested one is shown as `{}`.
pub(crate) fn flat_lines(prefix: &str, value: &serde_json::Value) -> Vec<String> {
    let mut lines = Vec::new();
    collect_flat(prefix, value, &mut lines);
    lines
}

fn collect_flat(prefix: &str, value: &serde_json::Value, lines: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) if prefix.is_empty() || !map.is_empty() => {
            for (key, inner) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_flat(&path, inner, lines);
            }
        }
        other => lines.push(format!("{} = {}", prefix, scalar_text(other))),
    }
}

/// Text form of a JSON leaf: strings unquoted, everything else as JSON.
pub(crate) fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_lines_join_nested_keys() {
        let lines = flat_lines("", &json!({"apps": {"echo": {"module": "apps.echo"}}, "n": 3}));
        assert_eq!(lines, vec!["apps.echo.module = apps.echo", "n = 3"]);
    }

    #[test]
    fn test_empty_section_has_no_lines() {
        assert!(flat_lines("", &json!({})).is_empty());
    }

    #[test]
    fn test_nested_empty_object_is_shown() {
        let lines = flat_lines("", &json!({"main": {"apps": {}}}));
        assert_eq!(lines, vec!["main.apps = {}"]);
    }
}
