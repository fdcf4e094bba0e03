//! Axum routers for billing endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{get_subscription, handle_payment_webhook, list_plans, start_trial};

/// Create the billing router.
///
/// # Routes
/// - `GET /plans` - The plan catalog
/// - `GET /clinics/:id/subscription` - Current subscription and plan
/// - `POST /clinics/:id/subscription/trial` - Start a trial (owner/admin)
pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/clinics/:clinic_id/subscription", get(get_subscription))
        .route("/clinics/:clinic_id/subscription/trial", post(start_trial))
}

/// Create the payment webhook router.
///
/// Separate from the billing routes because webhook deliveries carry
/// no session token; they are verified by signature instead.
///
/// # Routes
/// - `POST /webhooks/payment` - Payment provider events
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhooks/payment", post(handle_payment_webhook))
}
