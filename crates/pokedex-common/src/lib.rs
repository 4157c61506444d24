//! Pokedex Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, projection, and error handling for the Pokedex workspace.
//!
//! # Overview
//!
//! This crate provides the functionality used across all Pokedex workspace members:
//!
//! - **Error Handling**: the catalog error taxonomy and result alias
//! - **Types**: catalog entities, list pages and search pages
//! - **Projection**: turning list references into stub entities
//! - **Display**: human-readable names and stats
//! - **Logging**: tracing subscriber setup
//!
//! # Example
//!
//! ```
//! use pokedex_common::projection::project;
//! use pokedex_common::types::EntityRef;
//!
//! let entry = EntityRef::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25/");
//! let entity = project(&entry).unwrap();
//! assert_eq!(entity.id, 25);
//! assert!(entity.is_stub());
//! ```

pub mod display;
pub mod error;
pub mod logging;
pub mod projection;
pub mod types;

// Re-export commonly used types
pub use error::{CatalogError, Result};
pub use types::{CatalogEntity, EntityId, EntityRef, ListPage, Paginated, SearchPage};
