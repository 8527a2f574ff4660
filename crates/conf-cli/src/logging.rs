//! Tracing subscriber setup.
//!
//! The filter comes from, in order: `--verbose` (DEBUG), `RUST_LOG`, then the
//! configuration's own `[log] level`. Output goes to stderr so that stdout
//! stays clean for `--json`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Whether the filter is known before the configuration is loaded.
pub fn filter_is_external(verbose: bool) -> bool {
    verbose || std::env::var_os(EnvFilter::DEFAULT_ENV).is_some()
}

/// Install the global subscriber.
///
/// `config_level` is only consulted when neither `verbose` nor `RUST_LOG`
/// decides the filter.
pub fn init(verbose: bool, config_level: Option<&str>) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => {
                let directive = level_directive(config_level.unwrap_or("info"));
                EnvFilter::try_new(&directive).map_err(|e| CliError::Logging {
                    directive,
                    message: e.to_string(),
                })?
            }
        }
    };

    let fmt_layer = fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact();

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    Ok(())
}

/// Map conventional level names onto tracing's.
fn level_directive(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "notset" => "trace".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("Warning"), "warn");
        assert_eq!(level_directive("critical"), "error");
        assert_eq!(level_directive(" info "), "info");
    }

    #[test]
    fn test_verbose_is_external() {
        assert!(filter_is_external(true));
    }
}
