//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inspect a resolved component configuration
#[derive(Parser, Debug)]
#[command(name = "conf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub source: SourceArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the configuration comes from and how it is resolved
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SourceArgs {
    /// Configuration files, read in order; later files override earlier ones
    #[arg(
        short,
        long = "config",
        global = true,
        env = "CONF_FILES",
        value_delimiter = ',',
        default_values = ["conf.ini", "local.ini"]
    )]
    pub config: Vec<PathBuf>,

    /// Directory component code units are loaded from
    /// (defaults to the directory of the first file read)
    #[arg(long, global = true)]
    pub components: Option<PathBuf>,

    /// Namespace roots searched for apps, in priority order
    #[arg(long, global = true, value_delimiter = ',')]
    pub roots: Vec<String>,

    /// Let component defaults override values from the configuration
    #[arg(long, global = true)]
    pub defaults_win: bool,

    /// Skip apps that fail to resolve instead of failing
    #[arg(long, global = true)]
    pub best_effort: bool,

    /// Keep numeric values as strings
    #[arg(long, global = true)]
    pub raw_numbers: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the whole resolved configuration
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show a single section
    ///
    /// Examples:
    ///   conf get main          # Apps and backends, fully merged
    ///   conf get log --json    # Logging options as JSON
    Get {
        /// Name of the section
        section: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Resolve and list every app
    Apps {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List every backend
    Backends {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the configuration files and whether they were read
    Sources,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["conf", "show"]);

        assert!(!cli.verbose);
        assert_eq!(
            cli.source.config,
            vec![PathBuf::from("conf.ini"), PathBuf::from("local.ini")]
        );
        assert!(cli.source.roots.is_empty());
        assert!(!cli.source.best_effort);
        assert_eq!(cli.command, Some(Commands::Show { json: false }));
    }

    #[test]
    fn test_repeated_config_replaces_defaults() {
        let cli = Cli::parse_from(["conf", "-c", "a.ini", "--config", "b.ini", "apps"]);
        assert_eq!(
            cli.source.config,
            vec![PathBuf::from("a.ini"), PathBuf::from("b.ini")]
        );
    }

    #[test]
    fn test_roots_are_comma_separated() {
        let cli = Cli::parse_from(["conf", "--roots", "plugins,apps", "apps", "--json"]);

        assert_eq!(cli.source.roots, vec!["plugins", "apps"]);
        assert_eq!(cli.command, Some(Commands::Apps { json: true }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["conf", "get", "log", "--best-effort", "--defaults-win", "-v"]);

        assert!(cli.verbose);
        assert!(cli.source.best_effort);
        assert!(cli.source.defaults_win);
        assert_eq!(
            cli.command,
            Some(Commands::Get {
                section: "log".to_string(),
                json: false
            })
        );
    }
}
