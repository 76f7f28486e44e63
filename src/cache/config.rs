//! Cache configuration.

use std::time::Duration;

/// Configuration for a cache instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    /// `None` keeps every entry until it expires or is invalidated.
    pub max_capacity: Option<u64>,

    /// Time-to-live for cache entries.
    /// An entry older than this is never returned by a read.
    pub ttl: Option<Duration>,

    /// Time-to-idle for cache entries.
    pub tti: Option<Duration>,
}

/// Default lifetime of a resolved chat context.
pub const DEFAULT_CONTEXT_TTL: Duration = Duration::from_secs(300);

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: Some(10_000),
            ttl: Some(Duration::from_secs(300)), // 5 minutes
            tti: None,
        }
    }
}

impl CacheConfig {
    /// Set max capacity for cache (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Remove the capacity bound.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_capacity = None;
        self
    }

    /// Set time-to-live for cache entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = Some(duration);
        self
    }

    /// Set time-to-idle for cache entries.
    #[must_use]
    pub fn tti(mut self, duration: Duration) -> Self {
        self.tti = Some(duration);
        self
    }

    /// Chat context snapshots: unbounded, 5 minute TTL, no idle expiry.
    pub fn chat_context() -> Self {
        Self {
            max_capacity: None,
            ttl: Some(DEFAULT_CONTEXT_TTL),
            tti: None,
        }
    }
}
