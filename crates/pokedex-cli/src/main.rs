//! Pokedex CLI - Main entry point

use clap::Parser;
use pokedex_cli::config::Config;
use pokedex_cli::{Cli, Commands, ConfigCommand};
use pokedex_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::debug;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Handle markdown help generation
    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Ensure a command is provided
    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    // Verbose mode logs debug output to the console; otherwise only warnings
    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("pokedex-cli".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI keeps working when logging cannot be set up
    let log_guard = init_logging(&log_config).ok();

    // Execute command
    let result = execute_command(&cli).await;

    // Handle result
    if let Err(e) = result {
        debug!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        drop(log_guard);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> pokedex_cli::Result<()> {
    let Some(ref command) = cli.command else {
        return Ok(());
    };

    let mut config = Config::from_env()?;
    if let Some(url) = &cli.server_url {
        config.set_server_url(url.clone());
    }

    match command {
        Commands::List {
            limit,
            offset,
            all,
            format,
        } => pokedex_cli::commands::list::run(&config, *limit, *offset, *all, *format).await,

        Commands::Show { targets, format } => {
            pokedex_cli::commands::show::run(&config, targets.clone(), *format).await
        },

        Commands::Search {
            query,
            preload_pages,
            all_results,
            format,
        } => {
            pokedex_cli::commands::search::run(
                &config,
                query.clone(),
                *preload_pages,
                *all_results,
                *format,
            )
            .await
        },

        Commands::Config { command } => match command {
            ConfigCommand::Get { key } => pokedex_cli::commands::config::get(&config, key),
            ConfigCommand::Show => pokedex_cli::commands::config::show(&config),
        },
    }
}
