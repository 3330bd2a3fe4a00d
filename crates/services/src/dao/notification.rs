use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::Database;
use taskhub_db::models::Notification;

use super::base::{BaseDao, DaoResult};
use crate::notification::store::NotificationStore;

/// MongoDB-backed notification record store.
pub struct NotificationDao {
    pub base: BaseDao<Notification>,
}

impl NotificationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Notification::COLLECTION),
        }
    }
}

#[async_trait]
impl NotificationStore for NotificationDao {
    async fn create(&self, notification: &Notification) -> DaoResult<()> {
        self.base.insert_one(notification).await
    }

    async fn list_by_recipient(
        &self,
        recipient_id: ObjectId,
        limit: u64,
        offset: u64,
    ) -> DaoResult<Vec<Notification>> {
        self.base
            .find_page(
                doc! { "user_id": recipient_id },
                doc! { "created_at": -1, "_id": -1 },
                offset,
                limit,
            )
            .await
    }

    async fn mark_read(&self, ids: &[ObjectId], recipient_id: ObjectId) -> DaoResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.base
            .update_many(
                doc! { "_id": { "$in": ids.to_vec() }, "user_id": recipient_id, "is_read": false },
                doc! { "$set": { "is_read": true } },
            )
            .await
    }

    async fn mark_all_read(&self, recipient_id: ObjectId) -> DaoResult<u64> {
        self.base
            .update_many(
                doc! { "user_id": recipient_id, "is_read": false },
                doc! { "$set": { "is_read": true } },
            )
            .await
    }
}
