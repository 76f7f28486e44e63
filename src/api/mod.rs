//! Backend access for chat metadata.
//!
//! `ChatApi` is the seam the resolver depends on; `HttpChatApi` is the
//! production implementation over the REST backend.

mod error;
mod rest;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::models::{GroupMeta, PinnedMessage, RelatedQuiz, SharedResource, UserMeta};

pub use error::{ApiError, ApiResult};
pub use rest::HttpChatApi;

/// Chat metadata endpoints.
///
/// Every call receives the cancellation token of the fetch cycle it belongs
/// to. Implementations should stop work and return [`ApiError::Cancelled`]
/// once the token fires; callers discard anything returned afterwards anyway.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn group(&self, group_id: &str, cancel: &CancellationToken) -> ApiResult<GroupMeta>;

    async fn group_quizzes(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<RelatedQuiz>>;

    async fn group_pins(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<PinnedMessage>>;

    async fn group_resources(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<SharedResource>>;

    async fn user(&self, user_id: &str, cancel: &CancellationToken) -> ApiResult<UserMeta>;
}
