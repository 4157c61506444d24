//! API response types
//!
//! Matches the catalog server's JSON envelopes.

use pokedex_common::{CatalogEntity, CatalogError, EntityRef, ListPage, Result, SearchPage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Response of the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: ListBody,
    pub pagination: PaginationInfo,
}

/// Upstream list body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBody {
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<EntityRef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub limit: u32,
    pub offset: u32,
}

impl From<ListResponse> for ListPage {
    fn from(response: ListResponse) -> Self {
        ListPage {
            items: response.data.results,
            total_count: response.data.count,
            offset: response.pagination.offset,
            limit: response.pagination.limit,
        }
    }
}

/// Response of the by-id and by-name endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityResponse {
    pub data: CatalogEntity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

/// Response of the search endpoint.
///
/// `data` is kept as raw JSON because upstream occasionally returns `null`
/// entries or entries without an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<serde_json::Value>,
    pub search: SearchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInfo {
    pub count: u32,
    pub limit: u32,
    pub offset: u32,
    pub query: String,
}

impl SearchResponse {
    /// Convert into a page, dropping entries with a missing, null or zero id
    pub fn into_page(self, endpoint: &str) -> Result<SearchPage> {
        let received = self.data.len();

        let items = self
            .data
            .into_iter()
            .filter(has_usable_id)
            .map(serde_json::from_value::<CatalogEntity>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::MalformedResponse {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        if items.len() < received {
            debug!(
                endpoint = %endpoint,
                dropped = received - items.len(),
                "Dropped search entries without an id"
            );
        }

        Ok(SearchPage {
            items,
            total_count: self.search.count,
            offset: self.search.offset,
            limit: self.search.limit,
            query: self.search.query,
        })
    }
}

fn has_usable_id(value: &serde_json::Value) -> bool {
    value
        .get("id")
        .and_then(serde_json::Value::as_u64)
        .is_some_and(|id| id > 0)
}
