use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::mpsc;

use super::channel::{ChannelError, PushChannel};

/// Records every frame written to it; fails once closed.
pub(crate) struct RecordingChannel {
    tx: mpsc::UnboundedSender<String>,
    closed: AtomicBool,
}

impl RecordingChannel {
    pub(crate) fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let channel = Arc::new(Self {
            tx,
            closed: AtomicBool::new(false),
        });
        (channel, rx)
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushChannel for RecordingChannel {
    async fn send_text(&self, text: String) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        self.tx.send(text).map_err(|_| ChannelError::Closed)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Every write fails, as a dropped client would.
#[derive(Default)]
pub(crate) struct FailingChannel {
    pub(crate) attempts: AtomicUsize,
    pub(crate) closes: AtomicUsize,
}

#[async_trait]
impl PushChannel for FailingChannel {
    async fn send_text(&self, _text: String) -> Result<(), ChannelError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ChannelError::Transport("connection reset by peer".to_string()))
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
