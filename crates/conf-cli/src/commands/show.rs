//! Whole-tree and single-section output

use colored::Colorize;
use conf_core::ConfigStore;

use super::print_flat;
use crate::error::{CliError, Result};

/// Run the show command
pub fn run_show(store: &ConfigStore, json: bool) -> Result<()> {
    let tree = store.to_json()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    for name in store.section_names() {
        println!("{}", format!("[{name}]").cyan().bold());
        print_flat("", &tree[name]);
        println!();
    }
    Ok(())
}

/// Run the get command
pub fn run_get(store: &ConfigStore, section: &str, json: bool) -> Result<()> {
    let value = store
        .get(section)
        .ok_or_else(|| {
            CliError::user(format!(
                "No section '{}'. Available: {}",
                section,
                store.section_names().join(", ")
            ))
        })?
        .to_json()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_flat("", &value);
    }
    Ok(())
}
