//! Axum router for client roster endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{archive_client, create_client, get_client, list_clients, update_client};

/// Create the client roster router.
///
/// # Routes
/// - `POST /clinics/:id/clients` - Add a client (plan limit enforced)
/// - `GET /clinics/:id/clients` - List the roster
/// - `GET /clinics/:id/clients/:cid` - Fetch one client
/// - `PUT /clinics/:id/clients/:cid` - Update client details
/// - `DELETE /clinics/:id/clients/:cid` - Archive a client
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clinics/:clinic_id/clients",
            post(create_client).get(list_clients),
        )
        .route(
            "/clinics/:clinic_id/clients/:client_id",
            get(get_client).put(update_client).delete(archive_client),
        )
}
