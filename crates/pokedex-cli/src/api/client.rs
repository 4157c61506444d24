//! HTTP client for the remote catalog
//!
//! Every request is bounded by the client timeout. Failures are normalized
//! into [`CatalogError`]: `Timeout`, `NetworkUnavailable` for any other
//! transport failure, and `RemoteRejected` for non-success statuses.
//! Retryable failures are repeated a bounded number of times with
//! exponential backoff before the last error is returned.

use crate::api::endpoints;
use crate::api::types::{EntityResponse, ListResponse, SearchResponse};
use crate::config::{Config, MAX_PAGE_SIZE};
use async_trait::async_trait;
use pokedex_common::{CatalogEntity, CatalogError, ListPage, Result, SearchPage};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Read-only access to the catalog.
///
/// Implemented by [`CatalogClient`] over HTTP, by the detail cache wrapper,
/// and by in-memory fakes in tests. Arguments are validated before any
/// request is made.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch one browse page; `limit` in 1..=100, `offset` >= 0
    async fn fetch_list(&self, limit: i64, offset: i64) -> Result<ListPage>;

    /// Fetch a fully populated entity by id (>= 1)
    async fn fetch_by_id(&self, id: i64) -> Result<CatalogEntity>;

    /// Fetch a fully populated entity by name (trimmed, lower-cased)
    async fn fetch_by_name(&self, name: &str) -> Result<CatalogEntity>;

    /// Fetch one page of remote search results for a non-empty query
    async fn search(&self, query: &str, limit: i64, offset: i64) -> Result<SearchPage>;
}

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Fail on the first error
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_MAX_RETRIES,
            Duration::from_millis(crate::config::DEFAULT_RETRY_BACKOFF_MS),
        )
    }
}

/// HTTP catalog client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl CatalogClient {
    /// Create a client with the default timeout and retry policy
    pub fn new(base_url: impl Into<String>) -> crate::error::Result<Self> {
        Self::with_options(
            base_url,
            Duration::from_secs(crate::config::DEFAULT_API_TIMEOUT_SECS),
            RetryPolicy::default(),
        )
    }

    /// Create a client from the CLI configuration
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        Self::with_options(
            config.server_url.clone(),
            config.timeout(),
            RetryPolicy::new(config.max_retries, config.retry_backoff()),
        )
    }

    pub fn with_options(
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> crate::error::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            retry,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// GET an endpoint, retrying retryable failures
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let mut attempt = 0;

        loop {
            match self.get_once(endpoint).await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(endpoint = %endpoint, attempt, "Request succeeded after retry");
                    }
                    return Ok(value);
                },
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    debug!(
                        endpoint = %endpoint,
                        attempt,
                        backoff_ms = delay.as_millis() as u64,
                        error = %e,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                },
                Err(e) => {
                    warn!(endpoint = %endpoint, attempts = attempt + 1, error = %e, "Request failed");
                    return Err(e);
                },
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = endpoints::join(&self.base_url, endpoint);
        trace!(url = %url, "GET");

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(e, endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::RemoteRejected {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, endpoint))?;

        serde_json::from_slice(&body).map_err(|e| CatalogError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogRepository for CatalogClient {
    async fn fetch_list(&self, limit: i64, offset: i64) -> Result<ListPage> {
        let (limit, offset) = validate_pagination(limit, offset)?;
        let endpoint = endpoints::list_path(limit, offset);

        let mut page = ListPage::from(self.get_json::<ListResponse>(&endpoint).await?);

        if page.items.len() > limit as usize {
            warn!(
                endpoint = %endpoint,
                received = page.items.len(),
                limit,
                "Server returned more items than requested"
            );
            page.items.truncate(limit as usize);
        }

        debug!(offset, limit, items = page.items.len(), total = page.total_count, "Fetched list page");
        Ok(page)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<CatalogEntity> {
        let id = u32::try_from(id)
            .ok()
            .filter(|id| *id >= 1)
            .ok_or_else(|| CatalogError::invalid_argument("Pokemon ID must be positive"))?;

        let response: EntityResponse = self.get_json(&endpoints::by_id_path(id)).await?;
        Ok(response.data)
    }

    async fn fetch_by_name(&self, name: &str) -> Result<CatalogEntity> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(CatalogError::invalid_argument("Pokemon name cannot be empty"));
        }

        let response: EntityResponse = self.get_json(&endpoints::by_name_path(&name)).await?;
        Ok(response.data)
    }

    async fn search(&self, query: &str, limit: i64, offset: i64) -> Result<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::invalid_argument("Search query cannot be empty"));
        }
        let (limit, offset) = validate_pagination(limit, offset)?;
        let endpoint = endpoints::search_path(query, limit, offset);

        let page = self
            .get_json::<SearchResponse>(&endpoint)
            .await?
            .into_page(&endpoint)?;

        debug!(query = %query, offset, items = page.items.len(), total = page.total_count, "Fetched search page");
        Ok(page)
    }
}

/// Check `limit` in 1..=100 and `offset` >= 0
pub fn validate_pagination(limit: i64, offset: i64) -> Result<(u32, u32)> {
    if !(1..=i64::from(MAX_PAGE_SIZE)).contains(&limit) {
        return Err(CatalogError::invalid_argument(format!(
            "Limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    if offset < 0 {
        return Err(CatalogError::invalid_argument("Offset must be non-negative"));
    }
    let offset = u32::try_from(offset)
        .map_err(|_| CatalogError::invalid_argument("Offset is too large"))?;

    Ok((limit as u32, offset))
}

fn transport_error(error: reqwest::Error, endpoint: &str) -> CatalogError {
    if error.is_timeout() {
        CatalogError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        CatalogError::NetworkUnavailable {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        }
    }
}
