//! HTTP handlers for organization notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::Notification;

use crate::error::AppResult;
use crate::services::notification::{NotificationService, UnreadCount};
use crate::AppState;

fn service(state: &AppState) -> NotificationService {
    NotificationService::new(
        state.store.clone(),
        state.config.notifications.default_radius_km,
    )
}

/// Get notifications for an organization, newest first
pub async fn get_notifications(
    State(state): State<AppState>,
    Path(organization_id): Path<Uuid>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = service(&state).list_for_organization(organization_id).await?;
    Ok(Json(notifications))
}

/// Get unread notification count
pub async fn get_unread_count(
    State(state): State<AppState>,
    Path(organization_id): Path<Uuid>,
) -> AppResult<Json<UnreadCount>> {
    let count = service(&state).unread_count(organization_id).await?;
    Ok(Json(count))
}

/// Mark notification as read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> AppResult<Json<Notification>> {
    let notification = service(&state).mark_as_read(notification_id).await?;
    Ok(Json(notification))
}
