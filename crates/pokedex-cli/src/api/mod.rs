//! API client module
//!
//! HTTP client for the remote catalog service.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{CatalogClient, CatalogRepository, RetryPolicy};
pub use types::*;
