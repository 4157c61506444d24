//! `pokedex config` command implementation
//!
//! Shows the effective configuration. Values come from `POKEDEX_*`
//! environment variables and the `--server-url` flag.

use crate::config::{env_var_name, Config, CONFIG_KEYS};
use crate::error::{CliError, Result};
use colored::Colorize;

/// Get configuration value
pub fn get(config: &Config, key: &str) -> Result<()> {
    let value = config.get(key).ok_or_else(|| {
        CliError::config(format!(
            "Unknown config key: {} (expected one of: {})",
            key,
            CONFIG_KEYS.join(", ")
        ))
    })?;

    println!("{}", value);
    Ok(())
}

/// Show all configuration
pub fn show(config: &Config) -> Result<()> {
    println!("{}", "Pokedex CLI Configuration:".cyan().bold());
    println!();
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{:<18} {}", format!("{}:", key), value);
    }
    println!();
    println!("{}", "Environment Variables:".cyan());
    for key in CONFIG_KEYS {
        println!("  {}", env_var_name(key));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_get() {
        let config = Config::default();
        assert!(get(&config, "server_url").is_ok());
        assert!(get(&config, "debounce_ms").is_ok());
    }

    #[test]
    fn test_config_get_unknown_key() {
        let err = get(&Config::default(), "cache_dir").unwrap_err();
        assert!(err.to_string().contains("Unknown config key: cache_dir"));
    }

    #[test]
    fn test_config_show() {
        assert!(show(&Config::default()).is_ok());
    }
}
