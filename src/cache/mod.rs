//! Cache module - Moka-backed caches shared through a registry.
//!
//! ## Architecture
//!
//! - `CacheRegistry` - named, type-checked caches shared between callers
//! - `TypedCache` - a single Moka cache with TTL/TTI from `CacheConfig`
//! - `ContextStore` / `ContextCache` - the chat context store built on top
//!
//! ## Usage
//!
//! ```rust
//! use quix::cache::{CacheConfig, CacheRegistry, ContextCache};
//!
//! let store = ContextCache::new(CacheRegistry::global(), CacheConfig::chat_context()).unwrap();
//! assert!(quix::cache::ContextStore::get(&store, "g1").is_none());
//! ```

mod config;
mod context_store;
mod error;
mod registry;
mod typed;

pub use config::{CacheConfig, DEFAULT_CONTEXT_TTL};
pub use context_store::{ContextCache, ContextStore};
pub use error::CacheError;
pub use registry::CacheRegistry;
pub use typed::TypedCache;
