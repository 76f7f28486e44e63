//! Context state observed by callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{
    ActivitySummary, ChatRules, GroupMeta, Member, PinnedMessage, RelatedQuiz, SharedResource,
    UserMeta,
};

/// Which metadata shape a chat identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Direct,
    Group,
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Group => f.write_str("group"),
        }
    }
}

impl FromStr for ChatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "group" => Ok(Self::Group),
            other => Err(format!("unknown chat kind '{other}' (expected direct or group)")),
        }
    }
}

/// The chat a context is requested for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatRef {
    pub chat_id: String,
    pub kind: ChatKind,
}

impl ChatRef {
    pub fn group(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            kind: ChatKind::Group,
        }
    }

    pub fn direct(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            kind: ChatKind::Direct,
        }
    }
}

impl fmt::Display for ChatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.chat_id)
    }
}

/// A fully resolved context, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    pub chat_id: String,
    pub kind: ChatKind,
    pub group_meta: Option<GroupMeta>,
    pub user_meta: Option<UserMeta>,
    pub members: Vec<Member>,
    pub pins: Vec<PinnedMessage>,
    pub resources: Vec<SharedResource>,
    pub related_quizzes: Vec<RelatedQuiz>,
    pub activity: Option<ActivitySummary>,
    pub rules: Option<ChatRules>,
}

impl ContextSnapshot {
    /// A snapshot with no metadata and empty collections.
    pub fn empty(chat_id: impl Into<String>, kind: ChatKind) -> Self {
        Self {
            chat_id: chat_id.into(),
            kind,
            group_meta: None,
            user_meta: None,
            members: Vec::new(),
            pins: Vec::new(),
            resources: Vec::new(),
            related_quizzes: Vec::new(),
            activity: None,
            rules: None,
        }
    }
}

/// Lifecycle of a [`ContextState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextPhase {
    /// No chat selected
    #[default]
    Idle,
    Loading,
    Ready,
    /// The required metadata call failed
    Error,
}

/// Everything a caller can observe about the selected chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextState {
    pub chat_id: Option<String>,
    pub kind: Option<ChatKind>,
    pub group_meta: Option<GroupMeta>,
    pub user_meta: Option<UserMeta>,
    pub members: Vec<Member>,
    pub pins: Vec<PinnedMessage>,
    pub resources: Vec<SharedResource>,
    pub related_quizzes: Vec<RelatedQuiz>,
    pub activity: Option<ActivitySummary>,
    pub rules: Option<ChatRules>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub phase: ContextPhase,
}

impl ContextState {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Empty state for `chat` with a fetch in flight.
    pub fn loading(chat: &ChatRef) -> Self {
        Self {
            chat_id: Some(chat.chat_id.clone()),
            kind: Some(chat.kind),
            is_loading: true,
            phase: ContextPhase::Loading,
            ..Self::default()
        }
    }

    /// Empty state for `chat` after its required call failed.
    pub fn failed(chat: &ChatRef, error: impl Into<String>) -> Self {
        Self {
            chat_id: Some(chat.chat_id.clone()),
            kind: Some(chat.kind),
            error: Some(error.into()),
            phase: ContextPhase::Error,
            ..Self::default()
        }
    }

    pub fn ready(snapshot: ContextSnapshot) -> Self {
        Self {
            chat_id: Some(snapshot.chat_id),
            kind: Some(snapshot.kind),
            group_meta: snapshot.group_meta,
            user_meta: snapshot.user_meta,
            members: snapshot.members,
            pins: snapshot.pins,
            resources: snapshot.resources,
            related_quizzes: snapshot.related_quizzes,
            activity: snapshot.activity,
            rules: snapshot.rules,
            is_loading: false,
            error: None,
            phase: ContextPhase::Ready,
        }
    }

    pub fn members_count(&self) -> usize {
        self.members.len()
    }

    pub fn pins_count(&self) -> usize {
        self.pins.len()
    }

    pub fn resources_count(&self) -> usize {
        self.resources.len()
    }
}
