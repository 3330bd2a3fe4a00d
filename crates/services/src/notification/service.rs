use bson::oid::ObjectId;
use std::sync::Arc;
use taskhub_db::models::Notification;
use tracing::debug;

use super::store::NotificationStore;
use crate::dao::base::DaoResult;

/// Read-side operations on a recipient's own notifications.
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        recipient_id: ObjectId,
        limit: u64,
        offset: u64,
    ) -> DaoResult<Vec<Notification>> {
        self.store.list_by_recipient(recipient_id, limit, offset).await
    }

    /// Marks the given ids read for `recipient_id`. Ids that are malformed,
    /// unknown or owned by someone else are skipped without error.
    pub async fn mark_as_read(&self, recipient_id: ObjectId, ids: &[String]) -> DaoResult<()> {
        let parsed: Vec<ObjectId> = ids
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect();

        if parsed.is_empty() {
            return Ok(());
        }

        let updated = self.store.mark_read(&parsed, recipient_id).await?;
        debug!(%recipient_id, requested = ids.len(), updated, "Notifications marked read");
        Ok(())
    }

    pub async fn mark_all_as_read(&self, recipient_id: ObjectId) -> DaoResult<()> {
        let updated = self.store.mark_all_read(recipient_id).await?;
        debug!(%recipient_id, updated, "All notifications marked read");
        Ok(())
    }
}
