use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum ContextError {
    /// The fetch cycle was superseded or its owner went away.
    #[error("Context fetch cancelled")]
    Cancelled,
    #[error("Failed to load group {group_id}: {source}")]
    Group {
        group_id: String,
        #[source]
        source: ApiError,
    },
    #[error("Failed to load user {user_id}: {source}")]
    User {
        user_id: String,
        #[source]
        source: ApiError,
    },
}

impl ContextError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
