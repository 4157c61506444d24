//! Browse-mode page store
//!
//! Holds every list page fetched for one page size and exposes the projected
//! entities across all of them. Projection is recomputed only when the page
//! sequence changes.

use crate::api::CatalogRepository;
use crate::cache::pager::{fetch_next, lock, PageSequence, SharedSequence};
use pokedex_common::projection::project_all;
use pokedex_common::{CatalogEntity, CatalogError, ListPage, Paginated, Result};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Point-in-time view of the browse cache, as consumed by the resolver
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    /// Version of the page sequence the entities were projected from
    pub version: u64,
    pub entities: Arc<Vec<CatalogEntity>>,
    /// Catalog size reported by the most recent page
    pub total_count: Option<u32>,
    pub has_next_page: bool,
    pub is_fetching_next_page: bool,
    pub error: Option<CatalogError>,
}

impl CacheSnapshot {
    /// Snapshot over a fixed entity list
    pub fn from_entities(entities: Vec<CatalogEntity>) -> Self {
        Self {
            total_count: Some(entities.len() as u32),
            entities: Arc::new(entities),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
struct Projection {
    version: u64,
    entities: Arc<Vec<CatalogEntity>>,
}

/// Single-flight list pagination keyed by page size
pub struct ListPager {
    repo: Arc<dyn CatalogRepository>,
    sequence: SharedSequence<u32, ListPage>,
    projected: Mutex<Option<Projection>>,
}

impl ListPager {
    pub fn new(repo: Arc<dyn CatalogRepository>, page_size: u32) -> Self {
        Self {
            repo,
            sequence: PageSequence::shared(page_size),
            projected: Mutex::new(None),
        }
    }

    pub fn page_size(&self) -> u32 {
        *lock(&self.sequence).key()
    }

    /// True before the first fetch and while the last page is not the final one
    pub fn has_next_page(&self) -> bool {
        lock(&self.sequence).has_next_page()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        lock(&self.sequence).is_fetching()
    }

    /// Fetch and append the next page.
    ///
    /// Concurrent callers share one request. Returns `Ok(None)` once the
    /// catalog is exhausted; no request is issued in that case.
    pub async fn fetch_next_page(&self) -> Result<Option<ListPage>> {
        let repo = Arc::clone(&self.repo);

        fetch_next(&self.sequence, move |limit, offset| {
            let limit = i64::from(*limit);
            async move { repo.fetch_list(limit, i64::from(offset)).await }
        })
        .await
    }

    /// Keep fetching until the catalog is exhausted
    pub async fn fetch_all(&self) -> Result<usize> {
        let mut fetched = 0;
        while self.has_next_page() {
            if self.fetch_next_page().await?.is_none() {
                break;
            }
            fetched += 1;
        }
        debug!(pages = fetched, "Fetched remaining list pages");
        Ok(fetched)
    }

    pub fn pages(&self) -> Arc<Vec<ListPage>> {
        lock(&self.sequence).pages()
    }

    pub fn total_count(&self) -> Option<u32> {
        lock(&self.sequence).pages().last().map(Paginated::total_count)
    }

    pub fn last_error(&self) -> Option<CatalogError> {
        lock(&self.sequence).last_error()
    }

    /// Every cached list item projected into a stub entity.
    ///
    /// Entries with a malformed reference are skipped. The result is shared
    /// until the next page is appended.
    pub fn all_projected_entities(&self) -> Arc<Vec<CatalogEntity>> {
        let (version, pages) = {
            let seq = lock(&self.sequence);
            (seq.version(), seq.pages())
        };

        let mut projected = self.projected.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = projected.as_ref().filter(|p| p.version == version) {
            return Arc::clone(&cached.entities);
        }

        let entities = Arc::new(project_all(pages.iter().flat_map(|page| page.items.iter())));
        debug!(version, entities = entities.len(), "Projected cached list pages");

        *projected = Some(Projection {
            version,
            entities: Arc::clone(&entities),
        });
        entities
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        let entities = self.all_projected_entities();
        let seq = lock(&self.sequence);

        CacheSnapshot {
            version: seq.version(),
            entities,
            total_count: seq.pages().last().map(Paginated::total_count),
            has_next_page: seq.has_next_page(),
            is_fetching_next_page: seq.is_fetching(),
            error: seq.last_error(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testing::FakeCatalog;

    #[tokio::test]
    async fn test_fetch_until_exhausted() {
        let repo = Arc::new(FakeCatalog::with_names(&["a", "b", "c", "d", "e"]));
        let pager = ListPager::new(repo.clone(), 2);

        assert!(pager.has_next_page());
        let fetched = pager.fetch_all().await.unwrap();

        assert_eq!(fetched, 3);
        assert!(!pager.has_next_page());
        assert_eq!(pager.total_count(), Some(5));
        assert_eq!(repo.list_calls(), 3);

        assert!(pager.fetch_next_page().await.unwrap().is_none());
        assert_eq!(repo.list_calls(), 3);
    }

    #[tokio::test]
    async fn test_projection_is_memoized_until_append() {
        let repo = Arc::new(FakeCatalog::with_names(&["bulbasaur", "ivysaur", "venusaur"]));
        let pager = ListPager::new(repo, 2);

        pager.fetch_next_page().await.unwrap();
        let first = pager.all_projected_entities();
        let again = pager.all_projected_entities();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.len(), 2);

        pager.fetch_next_page().await.unwrap();
        let after = pager.all_projected_entities();
        assert!(!Arc::ptr_eq(&first, &after));
        let names: Vec<_> = after.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);
    }

    #[tokio::test]
    async fn test_malformed_references_are_excluded() {
        let repo = Arc::new(FakeCatalog::with_names(&["bulbasaur", "ivysaur"]).with_broken_ref("missingno"));
        let pager = ListPager::new(repo, 20);

        pager.fetch_next_page().await.unwrap();

        assert_eq!(pager.pages()[0].items.len(), 3);
        let entities = pager.all_projected_entities();
        assert_eq!(entities.len(), 2);
        assert!(entities.iter().all(|e| e.name != "missingno"));
    }

    #[tokio::test]
    async fn test_concurrent_fetches_collapse() {
        let repo = Arc::new(FakeCatalog::with_names(&["a", "b", "c", "d"]).gated());
        let pager = ListPager::new(repo.clone(), 2);

        let release = async {
            tokio::task::yield_now().await;
            assert!(pager.is_fetching_next_page());
            repo.release();
        };
        let (a, b, _) = tokio::join!(pager.fetch_next_page(), pager.fetch_next_page(), release);

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(repo.list_calls(), 1);
        assert_eq!(pager.pages().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_in_snapshot() {
        let repo = Arc::new(FakeCatalog::with_names(&["a"]).failing());
        let pager = ListPager::new(repo, 20);

        assert!(pager.fetch_next_page().await.is_err());

        let snapshot = pager.snapshot();
        assert!(snapshot.entities.is_empty());
        assert!(snapshot.has_next_page);
        assert!(matches!(snapshot.error, Some(CatalogError::Timeout { .. })));
    }
}
