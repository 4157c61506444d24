//! Entity projection
//!
//! Turns `(name, url)` list references into stub [`CatalogEntity`] values.
//! The id is the trailing numeric path segment of the reference URL and
//! sprite URLs are derived from the id alone.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogEntity, EntityId, EntityRef, Sprites};
use tracing::debug;
use url::Url;

/// Base of the external sprite image template
pub const SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Sprite URLs for an id
pub fn sprite_urls(id: EntityId) -> Sprites {
    Sprites {
        front_default: format!("{}/{}.png", SPRITE_BASE_URL, id),
        back_default: format!("{}/back/{}.png", SPRITE_BASE_URL, id),
    }
}

/// Extract the id from a reference URL such as
/// `https://pokeapi.co/api/v2/pokemon/25/`.
pub fn extract_id(reference_url: &str) -> Result<EntityId> {
    let url = Url::parse(reference_url)
        .map_err(|_| CatalogError::malformed_reference(reference_url))?;

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .and_then(|segment| segment.parse::<EntityId>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| CatalogError::malformed_reference(reference_url))
}

/// Project a list reference into a stub entity
pub fn project(entry: &EntityRef) -> Result<CatalogEntity> {
    let id = extract_id(&entry.url)?;

    Ok(CatalogEntity {
        id,
        name: entry.name.clone(),
        height: 0,
        weight: 0,
        base_experience: 0,
        types: Vec::new(),
        sprites: sprite_urls(id),
    })
}

/// Project every entry, dropping the ones with a malformed reference
pub fn project_all<'a, I>(entries: I) -> Vec<CatalogEntity>
where
    I: IntoIterator<Item = &'a EntityRef>,
{
    entries
        .into_iter()
        .filter_map(|entry| match project(entry) {
            Ok(entity) => Some(entity),
            Err(e) => {
                debug!(name = %entry.name, error = %e, "Skipping list entry");
                None
            },
        })
        .collect()
}
