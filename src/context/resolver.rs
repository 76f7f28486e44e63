//! Fetch orchestration for a single chat context.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{ChatKind, ChatRef, ContextError, ContextSnapshot};
use crate::api::{ApiError, ApiResult, ChatApi};

/// Resolves a [`ContextSnapshot`] from the backend.
///
/// Group chats need the group metadata call to succeed; quizzes, pins and
/// resources are fetched alongside it and fall back to empty lists on
/// failure. Direct chats need only the user call.
#[derive(Clone)]
pub struct ContextResolver {
    api: Arc<dyn ChatApi>,
}

impl ContextResolver {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self { api }
    }

    /// Resolve the context for `chat`.
    ///
    /// Returns [`ContextError::Cancelled`] whenever `cancel` fired before the
    /// result was assembled, regardless of what the individual calls returned.
    pub async fn resolve(
        &self,
        chat: &ChatRef,
        cancel: &CancellationToken,
    ) -> Result<ContextSnapshot, ContextError> {
        let result = match chat.kind {
            ChatKind::Group => self.resolve_group(&chat.chat_id, cancel).await,
            ChatKind::Direct => self.resolve_direct(&chat.chat_id, cancel).await,
        };

        if cancel.is_cancelled() {
            debug!("Context fetch for {} cancelled", chat);
            return Err(ContextError::Cancelled);
        }
        result
    }

    async fn resolve_group(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ContextSnapshot, ContextError> {
        // Settle all four before looking at any of them.
        let (group, quizzes, pins, resources) = tokio::join!(
            self.api.group(group_id, cancel),
            self.api.group_quizzes(group_id, cancel),
            self.api.group_pins(group_id, cancel),
            self.api.group_resources(group_id, cancel),
        );

        let group = group.map_err(|source| match source {
            ApiError::Cancelled => ContextError::Cancelled,
            source => ContextError::Group {
                group_id: group_id.to_string(),
                source,
            },
        })?;

        let related_quizzes = or_empty(quizzes, "related quizzes", group_id);
        let pins = or_empty(pins, "pinned messages", group_id);
        let resources = or_empty(resources, "shared resources", group_id);

        Ok(ContextSnapshot {
            chat_id: group_id.to_string(),
            kind: ChatKind::Group,
            members: group.members.clone(),
            activity: group.activity.clone(),
            rules: group.rules(),
            group_meta: Some(group),
            user_meta: None,
            pins,
            resources,
            related_quizzes,
        })
    }

    async fn resolve_direct(
        &self,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ContextSnapshot, ContextError> {
        let user = self
            .api
            .user(user_id, cancel)
            .await
            .map_err(|source| match source {
                ApiError::Cancelled => ContextError::Cancelled,
                source => ContextError::User {
                    user_id: user_id.to_string(),
                    source,
                },
            })?;

        let mut snapshot = ContextSnapshot::empty(user_id, ChatKind::Direct);
        snapshot.resources = user.shared_files.clone();
        snapshot.user_meta = Some(user);
        Ok(snapshot)
    }
}

/// Degrade an optional sub-fetch to an empty list.
fn or_empty<T>(result: ApiResult<Vec<T>>, what: &str, chat_id: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(ApiError::Cancelled) => Vec::new(),
        Err(e) => {
            warn!("Failed to load {} for chat {}: {}", what, chat_id, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{FakeApi, group_meta, user_meta};

    #[tokio::test]
    async fn test_group_with_failing_optionals() {
        let api = Arc::new(
            FakeApi::new()
                .with_group(group_meta("g1", "Study Group", &["u1", "u2"]))
                .fail_optionals(),
        );
        let resolver = ContextResolver::new(api.clone());

        let snapshot = resolver
            .resolve(&ChatRef::group("g1"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(snapshot.members.len(), 2);
        assert!(snapshot.pins.is_empty());
        assert!(snapshot.resources.is_empty());
        assert!(snapshot.related_quizzes.is_empty());
        assert_eq!(snapshot.group_meta.unwrap().name, "Study Group");
        assert_eq!(api.calls("pins:g1"), 1);
    }

    #[tokio::test]
    async fn test_group_merges_optionals() {
        let api = Arc::new(FakeApi::new().with_group(group_meta("g1", "Biology", &["u1"])));
        let resolver = ContextResolver::new(api);

        let snapshot = resolver
            .resolve(&ChatRef::group("g1"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(snapshot.pins.len(), 1);
        assert_eq!(snapshot.resources.len(), 1);
        assert_eq!(snapshot.related_quizzes.len(), 1);
    }

    #[tokio::test]
    async fn test_only_pins_failing() {
        let api = Arc::new(
            FakeApi::new()
                .with_group(group_meta("g1", "Biology", &["u1"]))
                .fail_endpoint("pins"),
        );
        let resolver = ContextResolver::new(api);

        let snapshot = resolver
            .resolve(&ChatRef::group("g1"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(snapshot.pins.is_empty());
        assert_eq!(snapshot.resources.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_group_is_error() {
        let api = Arc::new(FakeApi::new());
        let resolver = ContextResolver::new(api);

        let err = resolver
            .resolve(&ChatRef::group("nope"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ContextError::Group { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn test_direct_uses_shared_files() {
        let api = Arc::new(FakeApi::new().with_user(user_meta("u7", "Grace", 2)));
        let resolver = ContextResolver::new(api.clone());

        let snapshot = resolver
            .resolve(&ChatRef::direct("u7"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(snapshot.kind, ChatKind::Direct);
        assert_eq!(snapshot.resources.len(), 2);
        assert!(snapshot.group_meta.is_none());
        assert_eq!(api.calls("resources:u7"), 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let api = Arc::new(FakeApi::new().with_group(group_meta("g1", "Biology", &[])));
        let resolver = ContextResolver::new(api);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = resolver
            .resolve(&ChatRef::group("g1"), &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
