//! Search command implementation
//!
//! Answers a query from the browse pages preloaded into the cache, falling
//! back to the remote search when no cached name matches.

use crate::commands::connect;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{print_entities, print_json, OutputFormat};
use crate::progress::with_spinner;
use crate::resolver::{ResultSource, SearchResolution};
use crate::session::{SearchSession, SessionConfig};
use colored::Colorize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run the search command
///
/// # Arguments
///
/// * `query` - Search query terms (will be joined with spaces)
/// * `preload_pages` - Browse pages loaded into the cache before searching
/// * `all_results` - Keep fetching remote pages while more are available
/// * `format` - Output format (table, compact, json)
pub async fn run(
    config: &Config,
    query: Vec<String>,
    preload_pages: u32,
    all_results: bool,
    format: OutputFormat,
) -> Result<()> {
    let query_str = query.join(" ");

    if query_str.trim().is_empty() {
        return Err(CliError::invalid_input("Search query cannot be empty"));
    }

    debug!(query = %query_str, preload_pages, all_results, "Starting search");

    let mut session = SearchSession::new(connect(config)?, SessionConfig::from_config(config));

    // A failed preload leaves the cache short; the query then goes to the remote search
    let preloaded = with_spinner("Loading catalog...", async {
        for _ in 0..preload_pages {
            if !session.load_more_browse().await? {
                break;
            }
        }
        Ok::<_, CliError>(())
    })
    .await;
    if let Err(e) = preloaded {
        warn!(error = %e, "Could not load catalog pages, searching remotely");
    }

    session.set_query(query_str.as_str(), Instant::now());
    session.flush();

    info!("Searching for '{}'...", query_str);
    if let Err(e) = with_spinner("Searching...", session.refresh()).await {
        debug!(error = %e, "Remote search failed");
    }

    let mut resolution = session.resolution();
    if let Some(error) = &resolution.error {
        return Err(CliError::search(error.message.clone()));
    }

    if all_results && resolution.source == Some(ResultSource::Api) {
        with_spinner("Fetching more results...", async {
            while session.fetch_next_search_page().await? {}
            Ok::<_, CliError>(())
        })
        .await?;
        resolution = session.resolution();
    }

    if format == OutputFormat::Json {
        return print_json(&resolution);
    }

    if resolution.results.is_empty() {
        let cached = session.list().all_projected_entities();
        let names: Vec<&str> = cached.iter().map(|e| e.name.as_str()).collect();
        handle_empty_results(&resolution.query, &names);
        return Ok(());
    }

    print_entities(&resolution.results, format)?;
    if format == OutputFormat::Table {
        print_summary(&resolution);
    }
    Ok(())
}

fn print_summary(resolution: &SearchResolution) {
    let source = match resolution.source {
        Some(ResultSource::Cache) => "cached catalog".green(),
        Some(ResultSource::Api) => "remote search".cyan(),
        None => "-".normal(),
    };

    println!(
        "Showing {} of {} results (from {})",
        resolution.results.len(),
        resolution.total_count,
        source
    );
    if resolution.has_more {
        println!("{}", "More results available, rerun with --all-results".dimmed());
    }
}

/// Handle empty search results with suggestions
fn handle_empty_results(query: &str, cached_names: &[&str]) {
    println!();
    println!("{} No results found for '{}'", "✗".red(), query.bold());
    println!();

    let suggestions = find_similar_names(query, cached_names);
    if !suggestions.is_empty() {
        println!("{}", "Did you mean:".bold());
        for suggestion in suggestions {
            println!("  {} {}", "•".blue(), suggestion);
        }
        println!();
    }

    println!("{}", "Try:".bold());
    println!("  {} Check your spelling", "•".blue());
    println!("  {} Use part of the name, e.g. {}", "•".blue(), "pokedex search char".cyan());
    println!("  {} Browse the catalog: {}", "•".blue(), "pokedex list".cyan());
}

/// Cached names within a small edit distance of the query, closest first
fn find_similar_names(query: &str, names: &[&str]) -> Vec<String> {
    let query = query.trim().to_lowercase();

    let mut scored: Vec<(usize, &str)> = names
        .iter()
        .map(|name| (strsim::levenshtein(&query, name), *name))
        .filter(|(distance, _)| *distance > 0 && *distance <= 3)
        .collect();
    scored.sort();
    scored.dedup();

    // Limit to top 3 suggestions
    scored.into_iter().take(3).map(|(_, name)| name.to_string()).collect()
}
