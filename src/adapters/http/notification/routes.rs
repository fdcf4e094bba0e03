//! Axum router for notification endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{list_notifications, mark_all_read, mark_notification_read};

/// Create the notification router.
///
/// # Routes
/// - `GET /notifications` - The caller's feed for a clinic
/// - `POST /notifications/:id/read` - Mark one notification read
/// - `POST /notifications/read-all` - Mark the whole feed read
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/read-all", post(mark_all_read))
        .route(
            "/notifications/:notification_id/read",
            post(mark_notification_read),
        )
}
