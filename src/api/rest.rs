//! REST implementation of [`ChatApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use super::{ApiError, ApiResult, ChatApi};
use crate::models::{
    GroupMeta, PinnedMessage, PinsEnvelope, QuizzesEnvelope, RelatedQuiz, ResourcesEnvelope,
    SharedResource, UserMeta,
};

/// Chat metadata client over the backend's JSON routes:
///
/// - `GET /api/groups/{id}`
/// - `GET /api/groups/{id}/quizzes`
/// - `GET /api/groups/{id}/pins`
/// - `GET /api/groups/{id}/resources`
/// - `GET /api/users/{id}`
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpChatApi {
    /// Create a client without a request timeout.
    pub fn new(base_url: Url) -> ApiResult<Self> {
        Self::build(base_url, None)
    }

    /// Create a client whose requests fail after `timeout`.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> ApiResult<Self> {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: Url, timeout: Option<Duration>) -> ApiResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build an endpoint URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `build`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        segments: &[&str],
        cancel: &CancellationToken,
    ) -> ApiResult<R> {
        let url = self.endpoint(segments);
        debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let fetch = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status(
                    status,
                    response.text().await.unwrap_or_default(),
                ));
            }
            let body = response.bytes().await?;
            Ok::<R, ApiError>(serde_json::from_slice(&body)?)
        };

        // Dropping `fetch` aborts the in-flight request.
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("GET {} cancelled", url);
                Err(ApiError::Cancelled)
            }
            result = fetch => result,
        }
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn group(&self, group_id: &str, cancel: &CancellationToken) -> ApiResult<GroupMeta> {
        self.get_json(&["api", "groups", group_id], cancel).await
    }

    async fn group_quizzes(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<RelatedQuiz>> {
        let envelope: QuizzesEnvelope = self
            .get_json(&["api", "groups", group_id, "quizzes"], cancel)
            .await?;
        Ok(envelope.quizzes)
    }

    async fn group_pins(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<PinnedMessage>> {
        let envelope: PinsEnvelope = self
            .get_json(&["api", "groups", group_id, "pins"], cancel)
            .await?;
        Ok(envelope.pins)
    }

    async fn group_resources(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<SharedResource>> {
        let envelope: ResourcesEnvelope = self
            .get_json(&["api", "groups", group_id, "resources"], cancel)
            .await?;
        Ok(envelope.resources)
    }

    async fn user(&self, user_id: &str, cancel: &CancellationToken) -> ApiResult<UserMeta> {
        self.get_json(&["api", "users", user_id], cancel).await
    }
}
