//! Detail caching
//!
//! Keeps fully populated entities in memory for a bounded time so repeated
//! detail lookups by id or by name do not hit the server.

use crate::api::CatalogRepository;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pokedex_common::{CatalogEntity, EntityId, ListPage, Result, SearchPage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    entity: CatalogEntity,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Entries {
    by_id: HashMap<EntityId, Entry>,
    /// Lower-cased name to id
    names: HashMap<String, EntityId>,
}

impl Entries {
    fn remove(&mut self, id: EntityId) {
        if let Some(entry) = self.by_id.remove(&id) {
            self.names.remove(&entry.entity.name.to_lowercase());
        }
    }
}

/// Time-bounded in-memory entity cache
#[derive(Debug)]
pub struct DetailCache {
    ttl: Duration,
    entries: Mutex<Entries>,
}

impl DetailCache {
    pub fn new(ttl_secs: u64) -> Self {
        let ttl_secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
            entries: Mutex::new(Entries::default()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_by_id(&self, id: EntityId) -> Option<CatalogEntity> {
        self.get_at(id, Utc::now())
    }

    pub fn get_by_name(&self, name: &str) -> Option<CatalogEntity> {
        let id = *self.entries().names.get(&name.trim().to_lowercase())?;
        self.get_at(id, Utc::now())
    }

    /// Look up an entry as of `now`; an expired entry is evicted
    pub fn get_at(&self, id: EntityId, now: DateTime<Utc>) -> Option<CatalogEntity> {
        let mut entries = self.entries();

        let lookup = entries
            .by_id
            .get(&id)
            .map(|entry| (now <= entry.expires_at).then(|| entry.entity.clone()));

        match lookup {
            Some(Some(entity)) => {
                debug!(id, "Detail cache hit");
                Some(entity)
            },
            Some(None) => {
                debug!(id, "Detail cache entry expired");
                entries.remove(id);
                None
            },
            None => {
                debug!(id, "Detail cache miss");
                None
            },
        }
    }

    pub fn insert(&self, entity: CatalogEntity) {
        self.insert_at(entity, Utc::now());
    }

    pub fn insert_at(&self, entity: CatalogEntity, now: DateTime<Utc>) {
        let mut entries = self.entries();
        entries.remove(entity.id);
        entries.names.insert(entity.name.to_lowercase(), entity.id);
        entries.by_id.insert(
            entity.id,
            Entry {
                expires_at: now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
                entity,
            },
        );
    }
}

/// Repository decorator serving detail lookups from a [`DetailCache`]
pub struct CachedCatalog {
    inner: Arc<dyn CatalogRepository>,
    cache: DetailCache,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn CatalogRepository>, ttl_secs: u64) -> Self {
        Self {
            inner,
            cache: DetailCache::new(ttl_secs),
        }
    }
}

#[async_trait]
impl CatalogRepository for CachedCatalog {
    async fn fetch_list(&self, limit: i64, offset: i64) -> Result<ListPage> {
        self.inner.fetch_list(limit, offset).await
    }

    async fn fetch_by_id(&self, id: i64) -> Result<CatalogEntity> {
        if let Some(entity) = u32::try_from(id).ok().and_then(|id| self.cache.get_by_id(id)) {
            return Ok(entity);
        }

        let entity = self.inner.fetch_by_id(id).await?;
        self.cache.insert(entity.clone());
        Ok(entity)
    }

    async fn fetch_by_name(&self, name: &str) -> Result<CatalogEntity> {
        if let Some(entity) = self.cache.get_by_name(name) {
            return Ok(entity);
        }

        let entity = self.inner.fetch_by_name(name).await?;
        self.cache.insert(entity.clone());
        Ok(entity)
    }

    async fn search(&self, query: &str, limit: i64, offset: i64) -> Result<SearchPage> {
        let page = self.inner.search(query, limit, offset).await?;
        for entity in &page.items {
            self.cache.insert(entity.clone());
        }
        Ok(page)
    }
}
