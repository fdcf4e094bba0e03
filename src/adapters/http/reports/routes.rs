//! Axum router for reports endpoints.

use axum::routing::get;
use axum::Router;

use super::super::state::AppState;
use super::handlers::get_overview;

/// Create the reports router.
///
/// # Routes
/// - `GET /clinics/:id/reports/overview` - Practice overview (owner/admin)
pub fn reports_routes() -> Router<AppState> {
    Router::new().route("/clinics/:clinic_id/reports/overview", get(get_overview))
}
