//! Catalog operations exposed to front ends

use crate::api::client::validate_pagination;
use crate::api::CatalogRepository;
use pokedex_common::{CatalogEntity, ListPage, Result, SearchPage};
use std::sync::Arc;
use tracing::debug;

/// Thin facade over one shared repository
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> Arc<dyn CatalogRepository> {
        Arc::clone(&self.repo)
    }

    pub async fn get_list(&self, limit: i64, offset: i64) -> Result<ListPage> {
        self.repo.fetch_list(limit, offset).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<CatalogEntity> {
        self.repo.fetch_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<CatalogEntity> {
        self.repo.fetch_by_name(name).await
    }

    /// Search the remote catalog.
    ///
    /// A blank query yields an empty page without a request.
    pub async fn search(&self, query: &str, limit: i64, offset: i64) -> Result<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            let (limit, offset) = validate_pagination(limit, offset)?;
            debug!("Blank search query, returning empty page");
            return Ok(SearchPage::empty("", limit, offset));
        }

        self.repo.search(query, limit, offset).await
    }
}
