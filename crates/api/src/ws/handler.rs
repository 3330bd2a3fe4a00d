use axum::{
    extract::{Query, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    response::Response,
};
use bson::oid::ObjectId;
use futures::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::channel::WsChannel;
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
    /// Unauthenticated identity, honoured only when
    /// `notifications.allow_query_user_id` is enabled.
    pub user_id: Option<String>,
}

pub async fn ws_upgrade(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    // Identify the user before accepting the WebSocket
    let user_id = resolve_identity(&state, &params)?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)))
}

fn resolve_identity(state: &AppState, params: &WsParams) -> Result<ObjectId, ApiError> {
    if let Some(token) = params.token.as_deref() {
        return Ok(state.auth.authenticate(token)?);
    }

    match params.user_id.as_deref() {
        Some(raw) if state.settings.notifications.allow_query_user_id => ObjectId::parse_str(raw)
            .map_err(|_| ApiError::BadRequest("Invalid user_id".to_string())),
        _ => Err(ApiError::Unauthorized("No token provided".to_string())),
    }
}

async fn handle_socket(socket: WebSocket, state: AppState, user_id: ObjectId) {
    let (sender, mut receiver) = socket.split();

    let handle = state
        .hub
        .register(user_id, Arc::new(WsChannel::new(sender)));
    info!(%user_id, connection_id = %handle.id(), "WebSocket connected");

    // Inbound frames carry no meaning; drain them until the peer goes away.
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(%user_id, connection_id = %handle.id(), "WebSocket error: {}", e);
                break;
            }
        }
    }

    state.hub.unregister(&handle).await;
    debug!(%user_id, connection_id = %handle.id(), "WebSocket disconnected");
}
