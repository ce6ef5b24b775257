//! Notification handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::str::FromStr;

use core_kernel::NotificationId;

use crate::dto::notifications::{
    MarkAllReadResponse, NotificationListResponse, NotificationResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Lists notifications for the admin feed, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<NotificationListResponse>, ApiError> {
    let notifications = state.channel.list().await?;
    let unread_count = state.channel.unread_count().await?;
    Ok(Json(NotificationListResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
        unread_count,
    }))
}

/// Marks a single notification as read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let id = NotificationId::from_str(&id)
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a notification id", id)))?;
    state.channel.mark_read(id).await?;

    let notification = state
        .channel
        .list()
        .await?
        .into_iter()
        .find(|n| n.id == id)
        .ok_or_else(|| ApiError::NotFound(format!("Notification '{}' not found", id)))?;
    Ok(Json(notification.into()))
}

/// Marks every notification as read
pub async fn mark_all_read(
    State(state): State<AppState>,
) -> Result<Json<MarkAllReadResponse>, ApiError> {
    let marked = state.channel.mark_all_read().await?;
    Ok(Json(MarkAllReadResponse { marked }))
}
