//! Component configuration CLI
//!
//! Loads layered configuration files, resolves their components and prints
//! the result.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command.clone() else {
        // No command provided - show help hint
        println!("{} Component configuration CLI", "conf".green().bold());
        println!();
        println!("Run {} for available commands.", "conf --help".cyan());
        return Ok(());
    };

    let early = logging::filter_is_external(cli.verbose);
    if early {
        logging::init(cli.verbose, None)?;
        tracing::debug!("Verbose mode enabled");
    }

    let store = commands::load_store(&cli.source)?;

    if !early {
        let level = store.log().map(|log| log.level());
        logging::init(false, level.as_deref())?;
    }

    execute_command(&cli, command, &store)
}

fn execute_command(cli: &Cli, cmd: Commands, store: &conf_core::ConfigStore) -> Result<()> {
    match cmd {
        Commands::Show { json } => commands::run_show(store, json),
        Commands::Get { section, json } => commands::run_get(store, &section, json),
        Commands::Apps { json } => commands::run_apps(store, json),
        Commands::Backends { json } => commands::run_backends(store, json),
        Commands::Sources => commands::run_sources(&cli.source, store),
    }
}
