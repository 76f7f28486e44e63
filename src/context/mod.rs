//! Chat context resolution.
//!
//! - `ContextResolver` - fetches one context from the backend
//! - `ChatContext` - the live, cancellable view of the selected chat
//! - `ContextState` / `ContextSnapshot` - what callers and the cache see

mod error;
mod handle;
mod resolver;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ContextError;
pub use handle::ChatContext;
pub use resolver::ContextResolver;
pub use state::{ChatKind, ChatRef, ContextPhase, ContextSnapshot, ContextState};
