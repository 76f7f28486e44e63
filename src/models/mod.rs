//! Wire models returned by the chat backend.
//!
//! All types deserialize from camelCase JSON and ignore unknown fields.

pub mod group;
pub mod resources;
pub mod user;

pub use group::{ActivitySummary, ChatRules, GroupMeta, GroupSettings, Member, TeacherRef};
pub use resources::{
    PinnedMessage, PinsEnvelope, QuizzesEnvelope, RelatedQuiz, ResourcesEnvelope, SharedResource,
};
pub use user::UserMeta;
