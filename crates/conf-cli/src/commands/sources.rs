//! Which configuration files were read

use colored::Colorize;
use conf_core::ConfigStore;

use crate::cli::SourceArgs;
use crate::error::Result;

/// Run the sources command
pub fn run_sources(args: &SourceArgs, store: &ConfigStore) -> Result<()> {
    for path in &args.config {
        let read = store.raw().was_read(path);
        let marker = if read { "read".green() } else { "missing".yellow() };
        println!("  {:<8} {}", marker, path.display());
    }
    Ok(())
}
