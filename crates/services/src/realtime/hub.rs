use bson::oid::ObjectId;
use dashmap::DashMap;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::channel::{ChannelHandle, PushChannel};

/// Process-wide directory of live push channels, keyed by user.
///
/// A user may hold several channels at once (tabs, devices). Cloning the hub
/// is cheap and every clone shares the same registry, so construct it once
/// at startup and hand clones to whoever needs to push.
///
/// Locking: the per-user list is only touched under the map's shard lock.
/// `send_to_user` copies the list out under a read guard and performs all
/// network writes after the guard is released, so a stalled client never
/// blocks registration or delivery to other users.
#[derive(Clone, Default)]
pub struct Hub {
    connections: Arc<DashMap<ObjectId, Vec<ChannelHandle>>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `channel` for `user_id` and returns the handle that must be
    /// passed to [`Hub::unregister`]. Registration never fails and does not
    /// deduplicate.
    pub fn register(&self, user_id: ObjectId, channel: Arc<dyn PushChannel>) -> ChannelHandle {
        let handle = ChannelHandle::new(user_id, channel);

        let total = {
            let mut channels = self.connections.entry(user_id).or_default();
            channels.push(handle.clone());
            channels.len()
        };

        info!(%user_id, connection_id = %handle.id(), total, "Push channel registered");
        handle
    }

    /// Removes `handle` and closes its transport.
    ///
    /// Unknown or already-removed handles are ignored, so the read loop and a
    /// failed write may both try to clean up the same dead channel.
    pub async fn unregister(&self, handle: &ChannelHandle) {
        let user_id = handle.user_id();

        let remaining = match self.connections.get_mut(&user_id) {
            Some(mut channels) => match channels.iter().position(|c| c == handle) {
                Some(index) => {
                    channels.remove(index);
                    Some(channels.len())
                }
                None => None,
            },
            None => None,
        };

        let Some(remaining) = remaining else {
            debug!(%user_id, connection_id = %handle.id(), "Push channel already unregistered");
            return;
        };

        if remaining == 0 {
            // A concurrent register may have refilled the list in between.
            self.connections.remove_if(&user_id, |_, channels| channels.is_empty());
        }

        handle.channel().close().await;
        info!(%user_id, connection_id = %handle.id(), remaining, "Push channel unregistered");
    }

    /// Serializes `payload` once and writes it as a text frame to every
    /// channel `user_id` has open right now. Returns how many writes
    /// succeeded.
    ///
    /// A user with no channels is a silent no-op. A failed write does not
    /// stop the fan-out; the failing channel is unregistered once all writes
    /// for this call have finished.
    pub async fn send_to_user<T: Serialize>(&self, user_id: &ObjectId, payload: &T) -> usize {
        let channels = self.channels_for(user_id);
        if channels.is_empty() {
            return 0;
        }

        let text = match serde_json::to_string(payload) {
            Ok(text) => text,
            Err(e) => {
                warn!(%user_id, %e, "Failed to serialize push payload");
                return 0;
            }
        };

        let results = join_all(channels.iter().map(|handle| {
            let text = text.clone();
            async move { handle.channel().send_text(text).await }
        }))
        .await;

        let mut delivered = 0;
        for (handle, result) in channels.iter().zip(results) {
            match result {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(%user_id, connection_id = %handle.id(), %e, "Push write failed, dropping channel");
                    self.unregister(handle).await;
                }
            }
        }

        debug!(%user_id, delivered, attempted = channels.len(), "Push fan-out finished");
        delivered
    }

    /// Number of channels currently registered for `user_id`.
    pub fn channel_count(&self, user_id: &ObjectId) -> usize {
        self.connections.get(user_id).map(|c| c.len()).unwrap_or(0)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.iter().map(|r| r.value().len()).sum()
    }

    fn channels_for(&self, user_id: &ObjectId) -> Vec<ChannelHandle> {
        self.connections
            .get(user_id)
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}
