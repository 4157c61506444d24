//! Remote search pagination
//!
//! One page sequence for the current `(query, page_size)` key. Switching to
//! another query drops the pages of the previous one, and responses still in
//! flight for it are discarded when they arrive.

use crate::api::CatalogRepository;
use crate::cache::pager::{fetch_next, lock, PageSequence, SharedSequence};
use pokedex_common::{CatalogEntity, CatalogError, Paginated, Result, SearchPage};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Pagination key of a remote search
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchKey {
    pub query: String,
    pub page_size: u32,
}

/// Point-in-time view of the remote search pages
#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    pub key: Option<SearchKey>,
    pub pages: Arc<Vec<SearchPage>>,
    pub version: u64,
    pub is_fetching: bool,
    pub error: Option<CatalogError>,
}

impl SearchSnapshot {
    /// Snapshot holding already fetched pages for `query`
    pub fn with_pages(query: &str, pages: Vec<SearchPage>) -> Self {
        let page_size = pages.first().map(|p| p.limit).unwrap_or_default();
        Self {
            key: Some(SearchKey {
                query: query.to_string(),
                page_size,
            }),
            version: pages.len() as u64,
            pages: Arc::new(pages),
            ..Self::default()
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.key.as_ref().map(|k| k.query.as_str())
    }

    /// Items of every fetched page, in fetch order
    pub fn results(&self) -> Vec<CatalogEntity> {
        self.pages
            .iter()
            .flat_map(|page| page.items.iter().cloned())
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.pages.last().is_some_and(Paginated::has_more)
    }

    /// First page still pending
    pub fn is_loading(&self) -> bool {
        self.is_fetching && self.pages.is_empty()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.is_fetching && !self.pages.is_empty()
    }

    /// Match count reported by the first page
    pub fn total_count(&self) -> Option<u32> {
        self.pages.first().map(|page| page.total_count)
    }
}

/// Single-flight remote search pagination with stale-response suppression
pub struct SearchPager {
    repo: Arc<dyn CatalogRepository>,
    page_size: u32,
    sequence: SharedSequence<Option<SearchKey>, SearchPage>,
}

impl SearchPager {
    pub fn new(repo: Arc<dyn CatalogRepository>, page_size: u32) -> Self {
        Self {
            repo,
            page_size,
            sequence: PageSequence::shared(None),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Point the pager at `query`; returns true when the key changed.
    ///
    /// An empty query clears the pager.
    pub fn set_query(&self, query: &str) -> bool {
        let query = query.trim();
        let key = (!query.is_empty()).then(|| SearchKey {
            query: query.to_string(),
            page_size: self.page_size,
        });

        let mut seq = lock(&self.sequence);
        if *seq.key() == key {
            return false;
        }

        debug!(
            from = seq.key().as_ref().map(|k| k.query.as_str()),
            to = key.as_ref().map(|k| k.query.as_str()),
            "Switching search query"
        );
        seq.reset(key);
        true
    }

    pub fn clear(&self) {
        self.set_query("");
    }

    pub fn query(&self) -> Option<String> {
        lock(&self.sequence).key().as_ref().map(|k| k.query.clone())
    }

    /// A query is set but nothing was fetched, requested or failed yet
    pub fn needs_first_page(&self) -> bool {
        let seq = lock(&self.sequence);
        seq.key().is_some() && seq.pages().is_empty() && !seq.is_fetching() && seq.last_error().is_none()
    }

    /// Fetch the next page for the current query.
    ///
    /// Returns `Ok(None)` without a request when no query is set or the
    /// results are exhausted, and when the query changed while the response
    /// was in flight.
    pub async fn fetch_next_page(&self) -> Result<Option<SearchPage>> {
        if lock(&self.sequence).key().is_none() {
            return Ok(None);
        }
        let repo = Arc::clone(&self.repo);

        fetch_next(&self.sequence, move |key, offset| {
            let key = key.clone();
            async move {
                match key {
                    Some(key) => {
                        repo.search(&key.query, i64::from(key.page_size), i64::from(offset))
                            .await
                    },
                    None => Err(CatalogError::invalid_argument("Search query cannot be empty")),
                }
            }
        })
        .await
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let seq = lock(&self.sequence);

        SearchSnapshot {
            key: seq.key().clone(),
            pages: seq.pages(),
            version: seq.version(),
            is_fetching: seq.is_fetching(),
            error: seq.last_error(),
        }
    }
}
