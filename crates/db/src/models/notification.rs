use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A notification owned by `user_id` (the recipient).
///
/// Immutable once stored, except for `is_read`, which only ever moves from
/// `false` to `true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub actor_id: ObjectId,
    pub action: String,
    pub related_id: ObjectId,
    pub reference_type: ReferenceType,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    Task,
    Project,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Task => "task",
            ReferenceType::Project => "project",
        }
    }
}

impl Notification {
    pub const COLLECTION: &'static str = "notifications";
}
