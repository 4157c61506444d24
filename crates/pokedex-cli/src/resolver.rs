//! Cache-first search resolution
//!
//! [`resolve`] answers a query from the browse cache when any cached entity
//! name contains it, and from the remote search pages otherwise. Cache
//! presence alone decides the branch: a remote search is never consulted
//! once the cache has a hit, even if it would find more.
//!
//! Resolution is a pure function of the query and two snapshots, so it can
//! be re-evaluated whenever any of them changes.

use crate::cache::{CacheSnapshot, SearchSnapshot};
use pokedex_common::{CatalogEntity, CatalogError};
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Which side answered a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Cache,
    Api,
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// User-presentable description of a failed fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub kind: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl From<&CatalogError> for ErrorInfo {
    fn from(error: &CatalogError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    }
}

/// Unified result state of a query, whichever source answered it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResolution {
    pub query: String,
    /// `None` while idle (empty query)
    pub source: Option<ResultSource>,
    pub results: Vec<CatalogEntity>,
    pub is_loading: bool,
    pub error: Option<ErrorInfo>,
    /// More remote pages can be fetched; always false for cache results
    pub has_more: bool,
    pub is_fetching_next_page: bool,
    /// Remote match count, or the number of cache hits
    pub total_count: u32,
}

impl SearchResolution {
    pub fn idle() -> Self {
        Self {
            query: String::new(),
            source: None,
            results: Vec::new(),
            is_loading: false,
            error: None,
            has_more: false,
            is_fetching_next_page: false,
            total_count: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.source.is_none()
    }
}

/// Cached entities whose name contains `query`, case-insensitively
pub fn filter_cached(entities: &[CatalogEntity], query: &str) -> Vec<CatalogEntity> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    entities
        .iter()
        .filter(|entity| entity.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// The query the remote search has to run for, if the cache cannot answer it
pub fn remote_query(query: &str, cache: &CacheSnapshot) -> Option<String> {
    let query = query.trim();
    if query.is_empty() || !filter_cached(&cache.entities, query).is_empty() {
        return None;
    }
    Some(query.to_string())
}

/// Resolve `query` against the browse cache and the remote search pages.
///
/// Remote pages only count when they belong to the same query; until the
/// search pager has been switched over the resolution reports loading.
pub fn resolve(query: &str, cache: &CacheSnapshot, search: &SearchSnapshot) -> SearchResolution {
    let query = query.trim();
    if query.is_empty() {
        return SearchResolution::idle();
    }

    let hits = filter_cached(&cache.entities, query);
    if !hits.is_empty() {
        trace!(query = %query, hits = hits.len(), "Resolved from cache");
        return SearchResolution {
            query: query.to_string(),
            source: Some(ResultSource::Cache),
            total_count: hits.len() as u32,
            results: hits,
            is_loading: false,
            error: None,
            has_more: false,
            is_fetching_next_page: false,
        };
    }

    if search.query() != Some(query) {
        trace!(query = %query, "Remote search not started yet");
        return SearchResolution {
            query: query.to_string(),
            source: Some(ResultSource::Api),
            is_loading: true,
            ..SearchResolution::idle()
        };
    }

    trace!(query = %query, pages = search.pages.len(), "Resolved from remote search");
    SearchResolution {
        query: query.to_string(),
        source: Some(ResultSource::Api),
        results: search.results(),
        is_loading: search.is_loading(),
        error: search.error.as_ref().map(ErrorInfo::from),
        has_more: search.has_more(),
        is_fetching_next_page: search.is_fetching_next_page(),
        total_count: search.total_count().unwrap_or_default(),
    }
}
