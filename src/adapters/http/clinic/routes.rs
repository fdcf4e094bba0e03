//! Axum router for clinic endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{add_member, create_clinic, get_clinic, list_members, list_my_clinics};

/// Create the clinic API router.
///
/// # Routes
/// - `POST /clinics` - Register a clinic owned by the caller
/// - `GET /clinics` - List clinics the caller belongs to
/// - `GET /clinics/:id` - Fetch one clinic (members only)
/// - `POST /clinics/:id/members` - Add a member (owner/admin)
/// - `GET /clinics/:id/members` - List the roster (members only)
pub fn clinic_routes() -> Router<AppState> {
    Router::new()
        .route("/clinics", post(create_clinic).get(list_my_clinics))
        .route("/clinics/:clinic_id", get(get_clinic))
        .route(
            "/clinics/:clinic_id/members",
            post(add_member).get(list_members),
        )
}
