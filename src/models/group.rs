//! Group chat metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Group metadata as returned by the group endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMeta {
    /// Group identifier (`_id` on documents straight from the store)
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default)]
    pub is_public: bool,

    /// User id of the creator
    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<TeacherRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<GroupSettings>,

    #[serde(default)]
    pub members: Vec<Member>,

    /// Recent activity, when the backend computes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivitySummary>,
}

impl GroupMeta {
    /// Rules configured for this group, if any.
    pub fn rules(&self) -> Option<ChatRules> {
        self.settings
            .as_ref()
            .and_then(|s| s.rules.as_ref())
            .filter(|items| !items.is_empty())
            .map(|items| ChatRules {
                items: items.clone(),
            })
    }
}

/// Teacher attached to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRef {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

/// Per-group moderation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSettings {
    #[serde(default)]
    pub allow_member_invites: bool,

    #[serde(default)]
    pub allow_file_sharing: bool,

    #[serde(default)]
    pub mute_non_admins: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
}

/// Group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(alias = "_id", alias = "userId")]
    pub id: String,

    pub name: String,

    /// `admin`, `teacher` or `member`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

/// Activity summary for a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    #[serde(default)]
    pub messages_today: u32,

    #[serde(default)]
    pub active_members: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime<Utc>>,
}

/// Chat rules shown alongside a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRules {
    pub items: Vec<String>,
}
