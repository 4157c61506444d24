//! Pokedex CLI Library
//!
//! Terminal browser for a remote Pokémon catalog.
//!
//! # Overview
//!
//! - **Catalog Client**: validated, time-bounded HTTP access with retries (`api`)
//! - **Page Caches**: single-flight browse and search pagination (`cache`)
//! - **Search Resolution**: cache-first answers with remote fallback (`resolver`)
//! - **Sessions**: debounced queries driving the resolver (`session`)
//! - **Commands**: `pokedex list`, `show`, `search` and `config`

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod error;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod service;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use resolver::{resolve, ResultSource, SearchResolution};
pub use service::CatalogService;
pub use session::{SearchSession, SessionConfig};

use clap::{Parser, Subcommand};
use output::OutputFormat;

/// Pokedex - browse and search the Pokémon catalog
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog server URL
    #[arg(long, env = "POKEDEX_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    /// Print the CLI reference as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the catalog
    List {
        /// Entries per page (1-100, defaults to the configured page size)
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Offset of the first entry
        #[arg(short, long, default_value = "0", allow_negative_numbers = true, conflicts_with = "all")]
        offset: i64,

        /// Fetch every page
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show details of one or more entries
    Show {
        /// Numeric ids or names (e.g., "25" or "pikachu")
        #[arg(required = true)]
        targets: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Search by name, cached entries first
    Search {
        /// Search query terms
        #[arg(required = true)]
        query: Vec<String>,

        /// Browse pages loaded into the cache before searching
        #[arg(long, default_value = "1")]
        preload_pages: u32,

        /// Fetch every remote result page
        #[arg(long)]
        all_results: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show all configuration
    Show,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["pokedex", "search", "mr", "mime", "--all-results", "-f", "json"]).unwrap();
        match cli.command {
            Some(Commands::Search {
                query,
                preload_pages,
                all_results,
                format,
            }) => {
                assert_eq!(query, vec!["mr", "mime"]);
                assert_eq!(preload_pages, 1);
                assert!(all_results);
                assert_eq!(format, OutputFormat::Json);
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_show_targets() {
        let cli = Cli::try_parse_from(["pokedex", "show", "25", "pikachu"]).unwrap();
        match cli.command {
            Some(Commands::Show { targets, format }) => {
                assert_eq!(targets, vec!["25", "pikachu"]);
                assert_eq!(format, OutputFormat::Table);
            },
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["pokedex", "show"]).is_err());
    }

    #[test]
    fn test_parse_negative_offset() {
        let cli = Cli::try_parse_from(["pokedex", "list", "--offset", "-1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { offset: -1, .. })));
    }

    #[test]
    fn test_all_conflicts_with_offset() {
        assert!(Cli::try_parse_from(["pokedex", "list", "--all", "--offset", "20"]).is_err());
    }
}
