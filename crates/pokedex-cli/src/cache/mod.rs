//! Client-side caches
//!
//! - [`ListPager`]: browse pages fetched so far and their projected entities
//! - [`SearchPager`]: remote search pages for the current query
//! - [`CachedCatalog`]: time-bounded detail lookups

pub mod detail_cache;
pub mod list_pager;
mod pager;
pub mod search_pager;

pub use detail_cache::{CachedCatalog, DetailCache};
pub use list_pager::{CacheSnapshot, ListPager};
pub use search_pager::{SearchKey, SearchPager, SearchSnapshot};
