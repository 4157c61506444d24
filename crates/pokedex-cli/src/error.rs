//! Error types for the Pokedex CLI
//!
//! User-facing errors with clear, actionable messages. Catalog failures keep
//! their own taxonomy and are wrapped without losing the kind.

use pokedex_common::CatalogError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// A catalog request failed
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Remote search reported a failure
    #[error("Search failed: {0}. Check your server connection and try again.")]
    Search(String),

    /// Invalid command-line input
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables.")]
    Config(String),

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a search error
    pub fn search(msg: impl Into<String>) -> Self {
        Self::Search(msg.into())
    }
}
