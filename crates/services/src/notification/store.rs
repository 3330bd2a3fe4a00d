use async_trait::async_trait;
use bson::oid::ObjectId;
use parking_lot::RwLock;
use taskhub_db::models::Notification;

use crate::dao::base::DaoResult;

/// Persistence for notification records.
///
/// Updates are always scoped to `recipient_id`: ids owned by someone else
/// are left untouched without error. The `u64` returned by the mark
/// operations is the number of records that actually flipped to read.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create(&self, notification: &Notification) -> DaoResult<()>;

    /// Newest first. A zero `limit` returns an empty page.
    async fn list_by_recipient(
        &self,
        recipient_id: ObjectId,
        limit: u64,
        offset: u64,
    ) -> DaoResult<Vec<Notification>>;

    async fn mark_read(&self, ids: &[ObjectId], recipient_id: ObjectId) -> DaoResult<u64>;

    async fn mark_all_read(&self, recipient_id: ObjectId) -> DaoResult<u64>;
}

/// Process-local store with the same semantics as the MongoDB one.
#[derive(Default)]
pub struct MemoryNotificationStore {
    rows: RwLock<Vec<Notification>>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, notification: &Notification) -> DaoResult<()> {
        self.rows.write().push(notification.clone());
        Ok(())
    }

    async fn list_by_recipient(
        &self,
        recipient_id: ObjectId,
        limit: u64,
        offset: u64,
    ) -> DaoResult<Vec<Notification>> {
        let mut owned: Vec<Notification> = self
            .rows
            .read()
            .iter()
            .filter(|n| n.user_id == recipient_id)
            .cloned()
            .collect();

        owned.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(owned.into_iter().skip(skip).take(take).collect())
    }

    async fn mark_read(&self, ids: &[ObjectId], recipient_id: ObjectId) -> DaoResult<u64> {
        let mut updated = 0;
        for row in self.rows.write().iter_mut() {
            if row.user_id == recipient_id && !row.is_read && ids.contains(&row.id) {
                row.is_read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn mark_all_read(&self, recipient_id: ObjectId) -> DaoResult<u64> {
        let mut updated = 0;
        for row in self.rows.write().iter_mut() {
            if row.user_id == recipient_id && !row.is_read {
                row.is_read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }
}
