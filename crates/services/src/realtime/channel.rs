use async_trait::async_trait;
use bson::oid::ObjectId;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel closed")]
    Closed,
    #[error("Transport error: {0}")]
    Transport(String),
}

/// A single live client connection that accepts server-pushed text frames.
///
/// A channel is considered dead as soon as `send_text` returns an error;
/// there is no other liveness signal.
#[async_trait]
pub trait PushChannel: Send + Sync {
    async fn send_text(&self, text: String) -> Result<(), ChannelError>;

    /// Close the underlying transport. Called at most once by the hub, but
    /// implementations must tolerate a transport that is already gone.
    async fn close(&self);
}

/// A push channel bound to the user it was registered under.
///
/// Handles compare by their connection id, never by the transport, so a
/// reconnect always yields a distinct handle.
#[derive(Clone)]
pub struct ChannelHandle {
    id: Uuid,
    user_id: ObjectId,
    channel: Arc<dyn PushChannel>,
}

impl ChannelHandle {
    pub(crate) fn new(user_id: ObjectId, channel: Arc<dyn PushChannel>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            channel,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> ObjectId {
        self.user_id
    }

    pub(crate) fn channel(&self) -> &Arc<dyn PushChannel> {
        &self.channel
    }
}

impl PartialEq for ChannelHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ChannelHandle {}

impl fmt::Debug for ChannelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelHandle")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .finish()
    }
}
