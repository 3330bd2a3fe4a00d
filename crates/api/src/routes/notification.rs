use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use taskhub_services::notification::NotificationResponse;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct MarkAsReadRequest {
    #[serde(default)]
    pub ids: Vec<String>,
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let defaults = &state.settings.notifications;
    let limit = params.limit.unwrap_or(defaults.default_page_size);
    let offset = params.offset.unwrap_or(defaults.default_offset);

    let notifications = state
        .notifications
        .list(auth.user_id, limit, offset)
        .await?;

    Ok(Json(
        notifications.iter().map(NotificationResponse::from).collect(),
    ))
}

pub async fn mark_as_read(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<MarkAsReadRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(body) = body?;

    state
        .notifications
        .mark_as_read(auth.user_id, &body.ids)
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn mark_all_as_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.notifications.mark_all_as_read(auth.user_id).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}
