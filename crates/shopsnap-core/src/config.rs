use thiserror::Error;

use crate::scrape_config::{FetchPolicy, ScrapeConfig, SelectorConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load scrape configuration, applying `SHOPSNAP_*` env-var overrides on
/// top of the built-in defaults.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an override is present but unparseable.
pub fn load_config() -> Result<ScrapeConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load scrape configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if an override is present but unparseable.
pub fn load_config_from_env() -> Result<ScrapeConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build the configuration using the provided env-var lookup function.
///
/// The lookup is a parameter so tests can drive this with a plain
/// `HashMap` instead of mutating process environment.
fn build_config<F>(lookup: F) -> Result<ScrapeConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = FetchPolicy::default();

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let fetch = FetchPolicy {
        request_timeout_secs: parse_u64(
            "SHOPSNAP_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout_secs,
        )?,
        connect_timeout_secs: parse_u64(
            "SHOPSNAP_CONNECT_TIMEOUT_SECS",
            defaults.connect_timeout_secs,
        )?,
        user_agent: lookup("SHOPSNAP_USER_AGENT").unwrap_or(defaults.user_agent),
        accept_language: lookup("SHOPSNAP_ACCEPT_LANGUAGE").unwrap_or(defaults.accept_language),
        max_retries: parse_u32("SHOPSNAP_MAX_RETRIES", defaults.max_retries)?,
        backoff_base_ms: parse_u64("SHOPSNAP_BACKOFF_BASE_MS", defaults.backoff_base_ms)?,
        politeness_delay_ms: parse_u64(
            "SHOPSNAP_POLITENESS_DELAY_MS",
            defaults.politeness_delay_ms,
        )?,
    };

    Ok(ScrapeConfig {
        fetch,
        selectors: SelectorConfig::default(),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
