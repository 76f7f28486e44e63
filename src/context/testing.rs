//! In-memory `ChatApi` for resolver and handle tests.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, ApiResult, ChatApi};
use crate::models::{GroupMeta, Member, PinnedMessage, RelatedQuiz, SharedResource, UserMeta};

#[derive(Default)]
pub(crate) struct FakeApi {
    groups: HashMap<String, GroupMeta>,
    users: HashMap<String, UserMeta>,
    delays: HashMap<String, Duration>,
    failing: HashSet<&'static str>,
    ignore_cancel: bool,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: GroupMeta) -> Self {
        self.groups.insert(group.id.clone(), group);
        self
    }

    pub fn with_user(mut self, user: UserMeta) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    /// Every call for `chat_id` takes `delay` to answer.
    pub fn with_delay(mut self, chat_id: &str, delay: Duration) -> Self {
        self.delays.insert(chat_id.to_string(), delay);
        self
    }

    /// `quizzes`, `pins` or `resources` answer 500.
    pub fn fail_endpoint(mut self, endpoint: &'static str) -> Self {
        self.failing.insert(endpoint);
        self
    }

    pub fn fail_optionals(self) -> Self {
        self.fail_endpoint("quizzes")
            .fail_endpoint("pins")
            .fail_endpoint("resources")
    }

    /// Answer even after the token fired, like a request past its last check.
    pub fn ignore_cancel(mut self) -> Self {
        self.ignore_cancel = true;
        self
    }

    /// Number of calls made to `<endpoint>:<id>`.
    pub fn calls(&self, key: &str) -> usize {
        self.calls.lock().get(key).copied().unwrap_or(0)
    }

    async fn enter(&self, endpoint: &str, id: &str, cancel: &CancellationToken) -> ApiResult<()> {
        *self.calls.lock().entry(format!("{endpoint}:{id}")).or_default() += 1;

        if self.ignore_cancel {
            if let Some(delay) = self.delays.get(id) {
                tokio::time::sleep(*delay).await;
            }
            return Ok(());
        }

        let delay = self.delays.get(id).copied().unwrap_or_default();
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ApiError::Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }

    fn optional<T>(&self, endpoint: &'static str, id: &str, item: T) -> ApiResult<Vec<T>> {
        if self.failing.contains(endpoint) {
            return Err(ApiError::Status(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ));
        }
        if self.groups.contains_key(id) {
            Ok(vec![item])
        } else {
            Ok(Vec::new())
        }
    }
}

fn not_found() -> ApiError {
    ApiError::Status(StatusCode::NOT_FOUND, "not found".to_string())
}

#[async_trait]
impl ChatApi for FakeApi {
    async fn group(&self, group_id: &str, cancel: &CancellationToken) -> ApiResult<GroupMeta> {
        self.enter("group", group_id, cancel).await?;
        self.groups.get(group_id).cloned().ok_or_else(not_found)
    }

    async fn group_quizzes(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<RelatedQuiz>> {
        self.enter("quizzes", group_id, cancel).await?;
        self.optional(
            "quizzes",
            group_id,
            RelatedQuiz {
                id: format!("{group_id}-quiz"),
                title: "Fractions".to_string(),
                subject: Some("Mathematics".to_string()),
                question_count: Some(10),
            },
        )
    }

    async fn group_pins(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<PinnedMessage>> {
        self.enter("pins", group_id, cancel).await?;
        self.optional(
            "pins",
            group_id,
            PinnedMessage {
                id: format!("{group_id}-pin"),
                content: "Exam on Friday".to_string(),
                pinned_by: None,
                pinned_at: None,
            },
        )
    }

    async fn group_resources(
        &self,
        group_id: &str,
        cancel: &CancellationToken,
    ) -> ApiResult<Vec<SharedResource>> {
        self.enter("resources", group_id, cancel).await?;
        self.optional("resources", group_id, resource(&format!("{group_id}-file")))
    }

    async fn user(&self, user_id: &str, cancel: &CancellationToken) -> ApiResult<UserMeta> {
        self.enter("user", user_id, cancel).await?;
        self.users.get(user_id).cloned().ok_or_else(not_found)
    }
}

pub(crate) fn group_meta(id: &str, name: &str, members: &[&str]) -> GroupMeta {
    GroupMeta {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        subject: None,
        is_public: false,
        created_by: None,
        created_at: None,
        updated_at: None,
        teacher: None,
        settings: None,
        members: members
            .iter()
            .map(|m| Member {
                id: (*m).to_string(),
                name: format!("Student {m}"),
                role: None,
                avatar: None,
                joined_at: None,
            })
            .collect(),
        activity: None,
    }
}

pub(crate) fn user_meta(id: &str, name: &str, files: usize) -> UserMeta {
    UserMeta {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@example.rw"),
        role: "student".to_string(),
        school: None,
        level: None,
        last_active: None,
        shared_files: (0..files).map(|i| resource(&format!("{id}-file-{i}"))).collect(),
    }
}

fn resource(id: &str) -> SharedResource {
    SharedResource {
        id: id.to_string(),
        name: format!("{id}.pdf"),
        url: None,
        kind: Some("pdf".to_string()),
        shared_by: None,
        shared_at: None,
    }
}
