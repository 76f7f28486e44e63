//! Chat context store.
//!
//! Maps a chat identifier to the last successfully resolved snapshot.
//! Writes replace the whole entry; there is no partial update.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{CacheConfig, CacheError, CacheRegistry, TypedCache};
use crate::context::ContextSnapshot;

/// Keyed snapshot storage used by `ChatContext`.
pub trait ContextStore: Send + Sync {
    /// The snapshot for `chat_id`, unless absent or older than the TTL.
    fn get(&self, chat_id: &str) -> Option<ContextSnapshot>;

    /// Replace any entry for `chat_id` with a fresh one.
    fn set(&self, chat_id: &str, snapshot: ContextSnapshot);

    fn invalidate(&self, chat_id: &str);
}

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: ContextSnapshot,
    cached_at: DateTime<Utc>,
}

/// [`ContextStore`] over a registry cache named `chat_context`.
#[derive(Debug, Clone)]
pub struct ContextCache {
    cache: TypedCache<String, CacheEntry>,
}

impl ContextCache {
    pub const CACHE_NAME: &'static str = "chat_context";

    /// Attach to (or create) the shared context cache in `registry`.
    ///
    /// Instances built from the same registry see each other's entries.
    pub fn new(registry: &CacheRegistry, config: CacheConfig) -> Result<Self, CacheError> {
        let cache = registry.get_or_create(Self::CACHE_NAME, config)?;
        Ok(Self { cache })
    }

    /// A private store not registered anywhere.
    pub fn standalone(config: &CacheConfig) -> Self {
        Self {
            cache: TypedCache::new(Self::CACHE_NAME, config),
        }
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContextStore for ContextCache {
    fn get(&self, chat_id: &str) -> Option<ContextSnapshot> {
        let entry = self.cache.get(&chat_id.to_string());
        match &entry {
            Some(entry) => debug!(
                "Context cache hit for chat {} (age {}s)",
                chat_id,
                (Utc::now() - entry.cached_at).num_seconds()
            ),
            None => debug!("Context cache miss for chat {}", chat_id),
        }
        entry.map(|e| e.snapshot)
    }

    fn set(&self, chat_id: &str, snapshot: ContextSnapshot) {
        self.cache.insert(
            chat_id.to_string(),
            CacheEntry {
                snapshot,
                cached_at: Utc::now(),
            },
        );
    }

    fn invalidate(&self, chat_id: &str) {
        debug!("Invalidating context cache for chat {}", chat_id);
        self.cache.invalidate(&chat_id.to_string());
    }
}
