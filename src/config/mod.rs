//! Configuration module for Quix.
//!
//! Loads configuration from environment variables (and `.env`).

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::cache::{CacheConfig, DEFAULT_CONTEXT_TTL};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Quix backend
    pub api_url: Url,

    /// Bearer token sent with every backend request
    pub api_token: Option<String>,

    /// How long a resolved chat context may be served from cache
    pub context_ttl: Duration,

    /// Upper bound on cached contexts; unbounded when unset
    pub context_cache_capacity: Option<u64>,

    /// Per-request timeout; requests may hang forever when unset
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `QUIX_API_URL` (required)
    /// - `QUIX_API_TOKEN`
    /// - `QUIX_CONTEXT_TTL_SECS` (default 300)
    /// - `QUIX_CONTEXT_CACHE_CAPACITY`
    /// - `QUIX_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = var("QUIX_API_URL").ok_or(ConfigError::Missing("QUIX_API_URL"))?;
        let api_url = Url::parse(&api_url).map_err(|e| ConfigError::Invalid {
            name: "QUIX_API_URL",
            reason: e.to_string(),
        })?;

        let context_ttl = match var("QUIX_CONTEXT_TTL_SECS") {
            Some(v) => Duration::from_secs(parse_positive("QUIX_CONTEXT_TTL_SECS", &v)?),
            None => DEFAULT_CONTEXT_TTL,
        };

        let context_cache_capacity = var("QUIX_CONTEXT_CACHE_CAPACITY")
            .map(|v| parse_positive("QUIX_CONTEXT_CACHE_CAPACITY", &v))
            .transpose()?;

        let request_timeout = var("QUIX_REQUEST_TIMEOUT_SECS")
            .map(|v| parse_positive("QUIX_REQUEST_TIMEOUT_SECS", &v).map(Duration::from_secs))
            .transpose()?;

        Ok(Self {
            api_url,
            api_token: var("QUIX_API_TOKEN"),
            context_ttl,
            context_cache_capacity,
            request_timeout,
        })
    }

    /// Cache settings for the chat context store.
    pub fn context_cache(&self) -> CacheConfig {
        let config = CacheConfig::chat_context().ttl(self.context_ttl);
        match self.context_cache_capacity {
            Some(capacity) => config.max_capacity(capacity),
            None => config,
        }
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
