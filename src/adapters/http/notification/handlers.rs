//! HTTP handlers for the in-app notification feed.
//!
//! These endpoints are scoped to the caller, not to a clinic path, so
//! no membership guard runs here. The application handlers only ever
//! touch rows owned by the requesting user.

use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::handlers::notification::{
    ListNotificationsHandler, ListNotificationsQuery, MarkAllReadCommand, MarkAllReadHandler,
    MarkNotificationReadCommand, MarkNotificationReadHandler,
};
use crate::domain::foundation::NotificationId;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    ListNotificationsParams, MarkAllReadResponse, MarkReadRequest, NotificationResponse,
    NotificationsResponse,
};

/// GET /api/notifications - The caller's notification feed
pub async fn list_notifications(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListNotificationsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = ListNotificationsHandler::new(state.notifications.clone());
    let query = ListNotificationsQuery {
        clinic_id: params.clinic_id,
        user_id: user.id.clone(),
        unread_only: params.unread_only,
    };

    let notifications = handler.handle(query).await?;

    let response = NotificationsResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    };

    Ok(Json(response))
}

/// POST /api/notifications/:id/read - Mark one notification read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(notification_id): Path<NotificationId>,
    Json(request): Json<MarkReadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = MarkNotificationReadHandler::new(state.notifications.clone());
    let cmd = MarkNotificationReadCommand {
        clinic_id: request.clinic_id,
        user_id: user.id.clone(),
        notification_id,
    };

    let notification = handler.handle(cmd).await?;

    Ok(Json(NotificationResponse::from(notification)))
}

/// POST /api/notifications/read-all - Mark the whole feed read
pub async fn mark_all_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<MarkReadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = MarkAllReadHandler::new(state.notifications.clone());
    let cmd = MarkAllReadCommand {
        clinic_id: request.clinic_id,
        user_id: user.id.clone(),
    };

    let marked_read = handler.handle(cmd).await?;

    Ok(Json(MarkAllReadResponse { marked_read }))
}
