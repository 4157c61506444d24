//! Configuration management for the Pokedex CLI
//!
//! Defaults overridden by `POKEDEX_*` environment variables.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default catalog server URL when not specified via environment variable.
pub const DEFAULT_SERVER_URL: &str = "https://hortifrut-backend.up.railway.app/api/v1";

/// Upper bound on a single request, in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Extra attempts for retryable failures.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// First retry delay; doubles on each further attempt.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 100;

/// Page size of the browse list.
pub const DEFAULT_LIST_PAGE_SIZE: u32 = 20;

/// Page size of remote search.
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 10;

/// Quiet period before a query edit is evaluated.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Lifetime of cached detail lookups.
pub const DEFAULT_DETAIL_TTL_SECS: u64 = 300;

/// Largest page size the catalog accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Keys accepted by `pokedex config get`
pub const CONFIG_KEYS: &[&str] = &[
    "server_url",
    "timeout_secs",
    "max_retries",
    "retry_backoff_ms",
    "list_page_size",
    "search_page_size",
    "debounce_ms",
    "detail_ttl_secs",
];

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog server URL
    pub server_url: String,

    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub list_page_size: u32,
    pub search_page_size: u32,
    pub debounce_ms: u64,
    pub detail_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            detail_ttl_secs: DEFAULT_DETAIL_TTL_SECS,
        }
    }
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("POKEDEX_SERVER_URL") {
            config.server_url = url;
        }

        config.timeout_secs = env_number("POKEDEX_API_TIMEOUT_SECS", config.timeout_secs)?;
        config.max_retries = env_number("POKEDEX_MAX_RETRIES", config.max_retries)?;
        config.retry_backoff_ms = env_number("POKEDEX_RETRY_BACKOFF_MS", config.retry_backoff_ms)?;
        config.list_page_size = env_number("POKEDEX_LIST_PAGE_SIZE", config.list_page_size)?;
        config.search_page_size =
            env_number("POKEDEX_SEARCH_PAGE_SIZE", config.search_page_size)?;
        config.debounce_ms = env_number("POKEDEX_DEBOUNCE_MS", config.debounce_ms)?;
        config.detail_ttl_secs = env_number("POKEDEX_DETAIL_TTL_SECS", config.detail_ttl_secs)?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the catalog or the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(CliError::config("server_url must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::config("timeout_secs must be greater than 0"));
        }
        for (key, size) in [
            ("list_page_size", self.list_page_size),
            ("search_page_size", self.search_page_size),
        ] {
            if !(1..=MAX_PAGE_SIZE).contains(&size) {
                return Err(CliError::config(format!(
                    "{} must be between 1 and {}, got {}",
                    key, MAX_PAGE_SIZE, size
                )));
            }
        }
        Ok(())
    }

    /// Set the server URL
    pub fn set_server_url(&mut self, url: impl Into<String>) {
        self.server_url = url.into();
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Look up a value by key, as displayed by `pokedex config get`
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "server_url" => self.server_url.clone(),
            "timeout_secs" => self.timeout_secs.to_string(),
            "max_retries" => self.max_retries.to_string(),
            "retry_backoff_ms" => self.retry_backoff_ms.to_string(),
            "list_page_size" => self.list_page_size.to_string(),
            "search_page_size" => self.search_page_size.to_string(),
            "debounce_ms" => self.debounce_ms.to_string(),
            "detail_ttl_secs" => self.detail_ttl_secs.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Format config key as environment variable name
pub fn env_var_name(key: &str) -> String {
    match key {
        "timeout_secs" => "POKEDEX_API_TIMEOUT_SECS".to_string(),
        _ => format!("POKEDEX_{}", key.to_uppercase()),
    }
}

fn env_number<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            CliError::config(format!("{} must be a non-negative integer, got '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
