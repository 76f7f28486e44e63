//! Optional group sub-resources and their response envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedQuiz {
    #[serde(alias = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedMessage {
    #[serde(alias = "_id")]
    pub id: String,

    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_at: Option<DateTime<Utc>>,
}

/// A file or link shared in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedResource {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_at: Option<DateTime<Utc>>,
}

/// `{ "quizzes": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizzesEnvelope {
    #[serde(default)]
    pub quizzes: Vec<RelatedQuiz>,
}

/// `{ "pins": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PinsEnvelope {
    #[serde(default)]
    pub pins: Vec<PinnedMessage>,
}

/// `{ "resources": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourcesEnvelope {
    #[serde(default)]
    pub resources: Vec<SharedResource>,
}
