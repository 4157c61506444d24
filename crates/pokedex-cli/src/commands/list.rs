//! `pokedex list` command implementation
//!
//! Browse the catalog one page at a time, or every page with `--all`.

use crate::cache::ListPager;
use crate::commands::connect;
use crate::config::Config;
use crate::error::Result;
use crate::output::{print_entities, print_json, OutputFormat};
use crate::progress::with_spinner;
use crate::service::CatalogService;
use colored::Colorize;
use pokedex_common::projection::project_all;
use pokedex_common::CatalogEntity;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct ListOutput<'a> {
    items: &'a [CatalogEntity],
    total_count: u32,
    offset: u32,
    limit: u32,
}

/// Run the list command
pub async fn run(
    config: &Config,
    limit: Option<i64>,
    offset: i64,
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    let repo = connect(config)?;
    let limit = limit.unwrap_or_else(|| i64::from(config.list_page_size));
    debug!(limit, offset, all, "Listing catalog");

    if all {
        let page_size = crate::api::client::validate_pagination(limit, 0)?.0;
        let pager = ListPager::new(repo, page_size);
        with_spinner("Loading catalog...", pager.fetch_all()).await?;

        let entities = pager.all_projected_entities();
        let total = pager.total_count().unwrap_or_default();
        return render(&entities, total, 0, page_size, format);
    }

    let service = CatalogService::new(repo);
    let page = with_spinner("Loading catalog...", service.get_list(limit, offset)).await?;
    let entities = project_all(&page.items);

    render(&entities, page.total_count, page.offset, page.limit, format)
}

fn render(
    entities: &[CatalogEntity],
    total: u32,
    offset: u32,
    limit: u32,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&ListOutput {
            items: entities,
            total_count: total,
            offset,
            limit,
        });
    }

    print_entities(entities, format)?;
    if format == OutputFormat::Table {
        println!("{}", format!("Showing {} of {}", entities.len(), total).dimmed());
    }
    Ok(())
}
