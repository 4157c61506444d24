//! Search session
//!
//! Drives the resolver: debounces query edits, keeps the remote search pager
//! pointed at the query when the browse cache cannot answer it, and rebuilds
//! the resolution from fresh snapshots on demand.

use crate::api::CatalogRepository;
use crate::cache::{ListPager, SearchPager};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::resolver::{remote_query, resolve, ResultSource, SearchResolution};
use pokedex_common::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Page sizes and debounce delay of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub list_page_size: u32,
    pub search_page_size: u32,
    pub debounce: Duration,
}

impl SessionConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            list_page_size: config.list_page_size,
            search_page_size: config.search_page_size,
            debounce: config.debounce(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub struct SearchSession {
    list: ListPager,
    search: SearchPager,
    debouncer: Debouncer,
}

impl SearchSession {
    pub fn new(repo: Arc<dyn CatalogRepository>, config: SessionConfig) -> Self {
        Self {
            list: ListPager::new(Arc::clone(&repo), config.list_page_size),
            search: SearchPager::new(repo, config.search_page_size),
            debouncer: Debouncer::new(config.debounce),
        }
    }

    /// Browse-mode pages
    pub fn list(&self) -> &ListPager {
        &self.list
    }

    pub fn search_pager(&self) -> &SearchPager {
        &self.search
    }

    /// Debounced query currently in effect
    pub fn query(&self) -> &str {
        self.debouncer.settled()
    }

    /// Record a raw edit of the query text
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
        self.debouncer.set(text, now);
    }

    /// Returns true when the debounced query changed
    pub fn poll(&mut self, now: Instant) -> bool {
        self.debouncer.poll(now).is_some()
    }

    /// Apply the pending edit without waiting for the delay
    pub fn flush(&mut self) -> bool {
        self.debouncer.flush().is_some()
    }

    /// Bring the remote search in line with the current query and cache.
    ///
    /// The first remote page is fetched when the cache has no hit and nothing
    /// was requested for the query yet. A fetch failure is returned and also
    /// kept for [`SearchSession::resolution`].
    pub async fn refresh(&self) -> Result<()> {
        let cache = self.list.snapshot();

        let Some(query) = remote_query(self.query(), &cache) else {
            self.search.clear();
            return Ok(());
        };

        self.search.set_query(&query);
        if self.search.needs_first_page() {
            info!(query = %query, "No cached match, searching remote catalog");
            self.search.fetch_next_page().await?;
        }
        Ok(())
    }

    pub fn resolution(&self) -> SearchResolution {
        let resolution = resolve(self.query(), &self.list.snapshot(), &self.search.snapshot());
        debug!(
            query = %resolution.query,
            source = ?resolution.source,
            results = resolution.results.len(),
            "Resolved search"
        );
        resolution
    }

    /// Fetch another page of remote results when they drive the resolution.
    ///
    /// Returns whether a page was appended.
    pub async fn fetch_next_search_page(&self) -> Result<bool> {
        let resolution = self.resolution();
        if resolution.source != Some(ResultSource::Api) || !resolution.has_more {
            return Ok(false);
        }
        Ok(self.search.fetch_next_page().await?.is_some())
    }

    /// Fetch another browse page into the cache.
    ///
    /// Returns whether a page was appended.
    pub async fn load_more_browse(&self) -> Result<bool> {
        Ok(self.list.fetch_next_page().await?.is_some())
    }
}
