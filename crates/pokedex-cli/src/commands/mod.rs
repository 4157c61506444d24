//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod config;
pub mod list;
pub mod search;
pub mod show;

use crate::api::{CatalogClient, CatalogRepository};
use crate::cache::CachedCatalog;
use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;

/// Build the repository every command talks to
pub fn connect(config: &Config) -> Result<Arc<dyn CatalogRepository>> {
    let client = CatalogClient::from_config(config)?;
    Ok(Arc::new(CachedCatalog::new(Arc::new(client), config.detail_ttl_secs)))
}
