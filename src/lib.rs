//! Quix - chat context resolution for the Quix learning platform.
//!
//! Resolves the metadata shown next to a chat (group details, members,
//! pinned messages, shared resources, related quizzes, or the counterpart of
//! a direct conversation) and keeps recent results in a shared TTL cache.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `models` - Wire types of the backend JSON API
//! - `api` - Backend client (`ChatApi` trait, reqwest implementation)
//! - `cache` - Moka-backed caches and the chat context store
//! - `context` - Fetch orchestration and the live, cancellable context

pub mod api;
pub mod cache;
pub mod config;
pub mod context;
pub mod models;

pub use api::{ApiError, ChatApi, HttpChatApi};
pub use cache::{CacheConfig, CacheRegistry, ContextCache, ContextStore};
pub use config::{Config, ConfigError};
pub use context::{ChatContext, ChatKind, ChatRef, ContextError, ContextPhase, ContextState};
