//! Build automation tasks for Pokedex
//!
//! Currently generates the CLI reference from the clap definitions.

use anyhow::Context;
use clap::Parser;
use pokedex_cli::config::{env_var_name, Config, CONFIG_KEYS};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for Pokedex", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

/// Markdown table of configuration keys, variables and defaults
fn environment_table() -> String {
    let defaults = Config::default();
    let mut table = String::from("| Key | Variable | Default |\n|-----|----------|---------|\n");

    for key in CONFIG_KEYS {
        table.push_str(&format!(
            "| `{}` | `{}` | `{}` |\n",
            key,
            env_var_name(key),
            defaults.get(key).unwrap_or_default()
        ));
    }
    table
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    // Generate markdown from clap definitions
    let markdown = clap_markdown::help_markdown::<pokedex_cli::Cli>();

    let content = format!(
        r#"# Pokedex CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {}.

## Overview

`pokedex` browses and searches a remote Pokémon catalog. Searches are answered
from the catalog pages already loaded when any cached name matches, and from
the remote search otherwise.

## Quick Start

```bash
# First page of the catalog
pokedex list

# Every page, one entry per line
pokedex list --all --format compact

# Details by id or by name
pokedex show 25
pokedex show mr-mime

# Search the first three catalog pages, then the server
pokedex search char --preload-pages 3
pokedex search pika --all-results --format json
```

## Commands

{}

## Environment Variables

{}
Logging is controlled by `POKEDEX_LOG_LEVEL`, `POKEDEX_LOG_OUTPUT`,
`POKEDEX_LOG_FORMAT`, `POKEDEX_LOG_DIR` and `POKEDEX_LOG_FILTER`.

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown,
        environment_table()
    );

    // Create output directory if it doesn't exist
    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
