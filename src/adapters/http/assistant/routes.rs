//! Axum router for assistant endpoints.

use axum::routing::post;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{ask_assistant, draft_client_email};

/// Create the assistant router.
///
/// # Routes
/// - `POST /clinics/:id/assistant/ask` - Ask about the practice
/// - `POST /clinics/:id/assistant/draft-email` - Draft a client email
pub fn assistant_routes() -> Router<AppState> {
    Router::new()
        .route("/clinics/:clinic_id/assistant/ask", post(ask_assistant))
        .route(
            "/clinics/:clinic_id/assistant/draft-email",
            post(draft_client_email),
        )
}
