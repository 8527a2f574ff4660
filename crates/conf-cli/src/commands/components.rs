//! App and backend listings

use colored::Colorize;
use conf_core::{AppCatalog, BackendCatalog, ConfigStore, FailureMode};

use super::scalar_text;
use crate::error::{CliError, Result};

fn apps_of(store: &ConfigStore) -> Result<&AppCatalog> {
    store
        .apps()
        .ok_or_else(|| CliError::user("The configuration has no [main] section"))
}

fn backends_of(store: &ConfigStore) -> Result<&BackendCatalog> {
    store
        .backends()
        .ok_or_else(|| CliError::user("The configuration has no [main] section"))
}

/// Run the apps command
///
/// Every app is resolved. Under best-effort failure handling a failed app is
/// reported and skipped; otherwise the first failure ends the command.
pub fn run_apps(store: &ConfigStore, json: bool) -> Result<()> {
    let apps = apps_of(store)?;

    if json {
        let mut out = serde_json::Map::new();
        for descriptor in apps.resolve_all()? {
            out.insert(
                descriptor.name.clone(),
                serde_json::to_value(&descriptor.options)?,
            );
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "Apps".bold());
    println!();

    let mut skipped = 0;
    for app in apps.iter() {
        match app.descriptor() {
            Ok(descriptor) => {
                println!(
                    "  {:<14} {} ({})",
                    descriptor.name.green(),
                    descriptor.module,
                    descriptor.location().display().to_string().dimmed()
                );
                for (key, value) in &descriptor.options {
                    if matches!(key.as_str(), "type" | "module" | "path") {
                        continue;
                    }
                    println!("      {} = {}", key, value);
                }
            }
            Err(e) if apps.failure_mode() == FailureMode::BestEffort => {
                skipped += 1;
                println!("  {:<14} {} {}", app.name().red(), "skipped:".yellow(), e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!();
    println!(
        "{} {} apps, {} skipped.",
        "Total:".dimmed(),
        apps.len() - skipped,
        skipped
    );
    Ok(())
}

/// Run the backends command
pub fn run_backends(store: &ConfigStore, json: bool) -> Result<()> {
    let backends = backends_of(store)?;

    if json {
        let mut out = serde_json::Map::new();
        for backend in backends.iter() {
            out.insert(backend.name.clone(), serde_json::to_value(&backend.options)?);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "Backends".bold());
    println!();
    for backend in backends.iter() {
        println!(
            "  {:<14} {}",
            backend.name.green(),
            format!("type={}", backend.backend_type()).dimmed()
        );
        for (key, value) in &backend.options {
            if key == "type" {
                continue;
            }
            let value = serde_json::to_value(value)?;
            println!("      {} = {}", key, scalar_text(&value));
        }
    }

    println!();
    println!("{} {} backends.", "Total:".dimmed(), backends.len());
    Ok(())
}
