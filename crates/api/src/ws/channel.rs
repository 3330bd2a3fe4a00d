use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, stream::SplitSink};
use taskhub_services::realtime::{ChannelError, PushChannel};
use tokio::sync::Mutex;

/// Write half of an upgraded socket, exposed to the hub as a push channel.
pub struct WsChannel {
    sink: Mutex<SplitSink<WebSocket, Message>>,
}

impl WsChannel {
    pub fn new(sink: SplitSink<WebSocket, Message>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }
}

#[async_trait]
impl PushChannel for WsChannel {
    async fn send_text(&self, text: String) -> Result<(), ChannelError> {
        let mut sink = self.sink.lock().await;
        sink.send(Message::text(text))
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))
    }

    async fn close(&self) {
        let mut sink = self.sink.lock().await;
        // Already-closed sockets just report an error here.
        let _ = sink.close().await;
    }
}
