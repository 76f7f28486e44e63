//! Direct-chat counterpart metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SharedResource;

/// User metadata as returned by the user endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMeta {
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    pub email: String,

    /// `student`, `teacher` or `admin`
    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,

    /// Class level, e.g. `S3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,

    /// Files shared in the direct conversation
    #[serde(default)]
    pub shared_files: Vec<SharedResource>,
}
