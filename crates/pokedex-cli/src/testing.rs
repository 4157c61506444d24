//! In-memory catalog for unit tests

use crate::api::client::validate_pagination;
use crate::api::CatalogRepository;
use async_trait::async_trait;
use pokedex_common::projection::sprite_urls;
use pokedex_common::{CatalogEntity, CatalogError, EntityRef, ListPage, Result, SearchPage};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

pub(crate) fn entity(id: u32, name: &str) -> CatalogEntity {
    CatalogEntity {
        id,
        name: name.to_string(),
        height: 7,
        weight: 69,
        base_experience: 64,
        types: Vec::new(),
        sprites: sprite_urls(id),
    }
}

/// Browse catalog plus extra entities only reachable through search
#[derive(Default)]
pub(crate) struct FakeCatalog {
    listed: Vec<CatalogEntity>,
    remote_only: Vec<CatalogEntity>,
    broken_refs: Vec<String>,
    gate: Option<Notify>,
    failing: bool,
    list_calls: AtomicUsize,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeCatalog {
    pub(crate) fn with_names(names: &[&str]) -> Self {
        Self {
            listed: numbered(names, 1),
            ..Self::default()
        }
    }

    /// Entities that search finds but the list never returns
    pub(crate) fn with_remote(mut self, names: &[&str]) -> Self {
        let first_id = self.listed.len() as u32 + self.remote_only.len() as u32 + 1;
        self.remote_only.extend(numbered(names, first_id));
        self
    }

    /// Append a list entry whose reference carries no id
    pub(crate) fn with_broken_ref(mut self, name: &str) -> Self {
        self.broken_refs.push(name.to_string());
        self
    }

    /// Hold every request until [`FakeCatalog::release`]
    pub(crate) fn gated(mut self) -> Self {
        self.gate = Some(Notify::new());
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, endpoint: &str) -> Result<()> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.failing {
            return Err(CatalogError::Timeout {
                endpoint: endpoint.to_string(),
            });
        }
        Ok(())
    }

    fn references(&self) -> Vec<EntityRef> {
        self.listed
            .iter()
            .map(|e| EntityRef::new(&e.name, format!("https://pokeapi.co/api/v2/pokemon/{}/", e.id)))
            .chain(
                self.broken_refs
                    .iter()
                    .map(|name| EntityRef::new(name, "https://pokeapi.co/api/v2/pokemon/")),
            )
            .collect()
    }

    fn everything(&self) -> impl Iterator<Item = &CatalogEntity> {
        self.listed.iter().chain(self.remote_only.iter())
    }
}

fn numbered(names: &[&str], first_id: u32) -> Vec<CatalogEntity> {
    names
        .iter()
        .zip(first_id..)
        .map(|(name, id)| entity(id, name))
        .collect()
}

fn window<T: Clone>(items: &[T], limit: u32, offset: u32) -> Vec<T> {
    items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl CatalogRepository for FakeCatalog {
    async fn fetch_list(&self, limit: i64, offset: i64) -> Result<ListPage> {
        let (limit, offset) = validate_pagination(limit, offset)?;
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.respond("/pokemon").await?;

        let references = self.references();
        Ok(ListPage {
            items: window(&references, limit, offset),
            total_count: references.len() as u32,
            offset,
            limit,
        })
    }

    async fn fetch_by_id(&self, id: i64) -> Result<CatalogEntity> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.respond("/pokemon/{id}").await?;

        self.everything()
            .find(|e| i64::from(e.id) == id)
            .cloned()
            .ok_or(CatalogError::RemoteRejected {
                status: 404,
                endpoint: format!("/pokemon/{}", id),
            })
    }

    async fn fetch_by_name(&self, name: &str) -> Result<CatalogEntity> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.respond("/pokemon/name").await?;

        let name = name.trim().to_lowercase();
        self.everything()
            .find(|e| e.name == name)
            .cloned()
            .ok_or(CatalogError::RemoteRejected {
                status: 404,
                endpoint: format!("/pokemon/name/{}", name),
            })
    }

    async fn search(&self, query: &str, limit: i64, offset: i64) -> Result<SearchPage> {
        let (limit, offset) = validate_pagination(limit, offset)?;
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.respond("/pokemon/search").await?;

        let query = query.trim().to_string();
        let hits: Vec<_> = self
            .everything()
            .filter(|e| e.name_contains(&query))
            .cloned()
            .collect();

        Ok(SearchPage {
            items: window(&hits, limit, offset),
            total_count: hits.len() as u32,
            offset,
            limit,
            query,
        })
    }
}
