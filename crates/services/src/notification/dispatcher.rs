use bson::{oid::ObjectId, DateTime};
use std::sync::Arc;
use taskhub_db::models::{Notification, ReferenceType};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::events::DomainEvent;
use super::store::NotificationStore;
use super::wire::NotificationResponse;
use crate::dao::base::DaoResult;
use crate::realtime::Hub;

/// Everything a producer supplies for one recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub recipient_id: ObjectId,
    pub actor_id: ObjectId,
    pub action: String,
    pub reference_type: ReferenceType,
    pub related_id: ObjectId,
    pub message: String,
}

/// Persists notifications and pushes them to the recipient's live channels.
#[derive(Clone)]
pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
    hub: Hub,
    permits: Arc<Semaphore>,
}

impl NotificationDispatcher {
    pub fn new(store: Arc<dyn NotificationStore>, hub: Hub, max_concurrent: usize) -> Self {
        Self {
            store,
            hub,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Builds the record, stores it, then schedules live delivery on its own
    /// task. Only a storage failure is reported; delivery is best-effort and
    /// happens whether or not the recipient is connected.
    pub async fn notify(&self, new: NewNotification) -> DaoResult<Notification> {
        let notification = Notification {
            id: ObjectId::new(),
            user_id: new.recipient_id,
            actor_id: new.actor_id,
            action: new.action,
            related_id: new.related_id,
            reference_type: new.reference_type,
            message: new.message,
            is_read: false,
            created_at: DateTime::now(),
        };

        self.store.create(&notification).await?;

        let hub = self.hub.clone();
        let recipient_id = notification.user_id;
        let frame = NotificationResponse::from(&notification);
        tokio::spawn(async move {
            let delivered = hub.send_to_user(&recipient_id, &frame).await;
            debug!(%recipient_id, notification_id = %frame.id, delivered, "Notification pushed");
        });

        Ok(notification)
    }

    /// Runs [`notify`](Self::notify) on a separate task so the caller never
    /// waits on notification plumbing. Failures are logged here, nowhere
    /// else.
    pub fn notify_detached(&self, new: NewNotification) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let _permit = match this.permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!(%e, "Notification worker pool closed");
                    return;
                }
            };

            let recipient_id = new.recipient_id;
            let action = new.action.clone();
            if let Err(e) = this.notify(new).await {
                error!(%recipient_id, %action, %e, "Failed to persist notification");
            }
        })
    }

    /// Fans a domain event out into one detached notify per recipient. The
    /// actor of the event is never among them.
    pub fn publish(&self, event: &DomainEvent) -> Vec<JoinHandle<()>> {
        event
            .notices()
            .into_iter()
            .map(|notice| self.notify_detached(notice))
            .collect()
    }
}
