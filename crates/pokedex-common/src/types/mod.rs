//! Common types used across Pokedex

use serde::{Deserialize, Deserializer, Serialize};

/// Numeric catalog identifier (always >= 1 for real entries)
pub type EntityId = u32;

/// A catalog entry with its display attributes.
///
/// Stub entities produced from list pages carry only `id`, `name` and
/// `sprites`; every other field is zero or empty until a detail fetch
/// replaces the entity.
///
/// # Examples
///
/// ```rust,ignore
/// use pokedex_common::types::CatalogEntity;
///
/// let entity: CatalogEntity = serde_json::from_str(r#"{
///     "id": 25,
///     "name": "pikachu",
///     "height": 4,
///     "weight": 60,
///     "base_experience": 112,
///     "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}],
///     "sprites": {"front_default": "f.png", "back_default": "b.png"}
/// }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntity {
    /// Catalog id
    pub id: EntityId,

    /// Lowercase, hyphen-delimited name (e.g., "mr-mime")
    pub name: String,

    /// Height in decimetres
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u32,

    /// Weight in hectograms
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub base_experience: u32,

    /// Type tags ordered by slot
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<PokemonType>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sprites: Sprites,
}

impl CatalogEntity {
    /// Whether this entity only carries list-derived fields
    pub fn is_stub(&self) -> bool {
        self.height == 0 && self.weight == 0 && self.base_experience == 0 && self.types.is_empty()
    }

    /// Case-insensitive substring match on the name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// A type tag in a given slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: TypeInfo,
}

impl PokemonType {
    pub fn type_name(&self) -> &str {
        &self.kind.name
    }
}

/// Named reference to a type resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Front and back sprite image URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default, deserialize_with = "null_as_default")]
    pub front_default: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub back_default: String,
}

/// A `(name, url)` pair from a list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub name: String,
    pub url: String,
}

impl EntityRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Offset/limit pagination shared by list and search pages.
///
/// The cursor of the following page is `offset + limit`; pagination is
/// exhausted once that reaches `total_count`.
pub trait Paginated {
    fn offset(&self) -> u32;
    fn limit(&self) -> u32;
    fn total_count(&self) -> u32;

    /// Offset of the page after this one, if any
    fn next_offset(&self) -> Option<u32> {
        let next = self.offset().saturating_add(self.limit());
        (self.limit() > 0 && next < self.total_count()).then_some(next)
    }

    fn has_more(&self) -> bool {
        self.next_offset().is_some()
    }
}

/// One page of the default catalog browse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage {
    pub items: Vec<EntityRef>,
    pub total_count: u32,
    pub offset: u32,
    pub limit: u32,
}

impl Paginated for ListPage {
    fn offset(&self) -> u32 {
        self.offset
    }

    fn limit(&self) -> u32 {
        self.limit
    }

    fn total_count(&self) -> u32 {
        self.total_count
    }
}

/// One page of remote search results for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<CatalogEntity>,
    pub total_count: u32,
    pub offset: u32,
    pub limit: u32,
    pub query: String,
}

impl SearchPage {
    /// A page with no results that never requires a request
    pub fn empty(query: impl Into<String>, limit: u32, offset: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            offset,
            limit,
            query: query.into(),
        }
    }
}

impl Paginated for SearchPage {
    fn offset(&self) -> u32 {
        self.offset
    }

    fn limit(&self) -> u32 {
        self.limit
    }

    fn total_count(&self) -> u32 {
        self.total_count
    }
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
