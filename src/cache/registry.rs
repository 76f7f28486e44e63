//! Cache registry - Central management for all caches.

use std::any::{Any, TypeId};
use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::Lazy;
use tracing::debug;

use super::{CacheConfig, CacheError, TypedCache};

static GLOBAL: Lazy<CacheRegistry> = Lazy::new(CacheRegistry::new);

/// Central registry for named typed caches.
///
/// Every `ChatContext` that should share lookups with other instances
/// resolves its store through the same registry, either one injected by
/// the caller or the process-wide [`CacheRegistry::global`].
///
/// ## Example
///
/// ```rust
/// use quix::cache::{CacheConfig, CacheRegistry, TypedCache};
///
/// let registry = CacheRegistry::new();
/// let scores: TypedCache<String, u32> = registry
///     .get_or_create("scores", CacheConfig::default())
///     .unwrap();
/// scores.insert("amani".to_string(), 120);
/// ```
#[derive(Clone, Default)]
pub struct CacheRegistry {
    caches: Arc<DashMap<String, RegisteredCache>>,
}

/// Type-erased cache stored in the registry.
struct RegisteredCache {
    cache: Box<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl RegisteredCache {
    fn downcast<K, V>(&self, name: &str) -> Result<TypedCache<K, V>, CacheError>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let expected = std::any::type_name::<TypedCache<K, V>>();
        if self.type_id != TypeId::of::<TypedCache<K, V>>() {
            return Err(CacheError::TypeMismatch {
                name: name.to_string(),
                expected,
                found: self.type_name,
            });
        }
        self.cache
            .downcast_ref::<TypedCache<K, V>>()
            .cloned()
            .ok_or_else(|| CacheError::TypeMismatch {
                name: name.to_string(),
                expected,
                found: self.type_name,
            })
    }
}

impl CacheRegistry {
    /// Create a new empty cache registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Get an existing cache by name, `Ok(None)` if it was never created.
    pub fn get<K, V>(&self, name: &str) -> Result<Option<TypedCache<K, V>>, CacheError>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        self.caches
            .get(name)
            .map(|entry| entry.downcast(name))
            .transpose()
    }

    /// Get an existing cache or create a new one if it doesn't exist.
    ///
    /// The config only applies on creation; an existing cache keeps the
    /// settings it was created with.
    pub fn get_or_create<K, V>(
        &self,
        name: &str,
        config: CacheConfig,
    ) -> Result<TypedCache<K, V>, CacheError>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        match self.caches.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.get().downcast(name),
            Entry::Vacant(entry) => {
                debug!("Creating cache: {}", name);
                let cache = TypedCache::<K, V>::new(name, &config);
                entry.insert(RegisteredCache {
                    cache: Box::new(cache.clone()),
                    type_id: TypeId::of::<TypedCache<K, V>>(),
                    type_name: std::any::type_name::<TypedCache<K, V>>(),
                });
                Ok(cache)
            }
        }
    }

    /// Remove a cache from the registry.
    ///
    /// Returns `true` if the cache was removed.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.caches.remove(name).is_some();
        if removed {
            debug!("Removed cache: {}", name);
        }
        removed
    }

    /// Get a list of all registered cache names.
    pub fn cache_names(&self) -> Vec<String> {
        self.caches.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("cache_count", &self.caches.len())
            .field("cache_names", &self.cache_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_shares_instance() {
        let registry = CacheRegistry::new();
        let a: TypedCache<String, u32> = registry
            .get_or_create("shared", CacheConfig::default())
            .unwrap();
        let b: TypedCache<String, u32> = registry
            .get_or_create("shared", CacheConfig::default())
            .unwrap();

        a.insert("k".to_string(), 7);
        assert_eq!(b.get(&"k".to_string()), Some(7));
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let registry = CacheRegistry::new();
        let _: TypedCache<String, u32> = registry
            .get_or_create("mixed", CacheConfig::default())
            .unwrap();

        let result = registry.get_or_create::<String, String>("mixed", CacheConfig::default());
        assert!(matches!(result, Err(CacheError::TypeMismatch { .. })));
    }

    #[test]
    fn test_get_missing_and_remove() {
        let registry = CacheRegistry::new();
        assert!(registry.get::<String, u32>("nope").unwrap().is_none());

        let _: TypedCache<String, u32> = registry
            .get_or_create("gone", CacheConfig::default())
            .unwrap();
        assert!(registry.remove("gone"));
        assert!(!registry.remove("gone"));
        assert!(registry.cache_names().is_empty());
    }
}
