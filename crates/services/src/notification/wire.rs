use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhub_db::models::Notification;

/// The JSON shape of a notification, both in REST responses and as the
/// single text frame pushed over a live channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    pub actor_id: String,
    pub action: String,
    pub related_id: String,
    pub reference_type: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_hex(),
            user_id: n.user_id.to_hex(),
            actor_id: n.actor_id.to_hex(),
            action: n.action.clone(),
            related_id: n.related_id.to_hex(),
            reference_type: n.reference_type.as_str().to_string(),
            message: n.message.clone(),
            is_read: n.is_read,
            created_at: n.created_at.to_chrono(),
        }
    }
}
