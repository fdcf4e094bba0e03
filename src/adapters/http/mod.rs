//! HTTP adapter: REST API over the application layer.
//!
//! Each domain module contributes its own router; [`app_router`]
//! merges them under `/api` behind the session middleware, with the
//! public invoice and webhook routes mounted outside it.

pub mod assistant;
pub mod billing;
pub mod client;
pub mod clinic;
pub mod error;
pub mod invoicing;
pub mod middleware;
pub mod notification;
pub mod reports;
pub mod scheduling;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::extract::Json;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// GET /health - Liveness probe
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the complete application router.
///
/// Session-guarded routes live under `/api`. The public invoice
/// routes and the payment webhook skip the session middleware: the
/// former are authenticated by an unguessable token, the latter by
/// signature. CORS and timeouts are environment concerns and are
/// layered on by the binary.
pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(clinic::clinic_routes())
        .merge(client::client_routes())
        .merge(scheduling::scheduling_routes())
        .merge(billing::billing_routes())
        .merge(invoicing::invoicing_routes())
        .merge(notification::notification_routes())
        .merge(reports::reports_routes())
        .merge(assistant::assistant_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.sessions.clone(),
            middleware::auth_middleware,
        ));

    let api = protected
        .merge(invoicing::public_invoice_routes())
        .merge(billing::webhook_routes());

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::stripe::StripeWebhookVerifier;
    use crate::application::handlers::test_support::{
        MockAppointmentRepository, MockAssistantProvider, MockClientRepository, MockClinicAccess,
        MockClinicRepository, MockEmailSender, MockInvoiceRepository, MockMemberRepository,
        MockNotificationRepository, MockPaymentProvider, MockPlanRepository, MockReportsReader,
        MockServiceTypeRepository, MockSubscriptionRepository,
    };
    use crate::domain::clinic::MemberRole;

    fn test_state() -> AppState {
        AppState {
            clinics: Arc::new(MockClinicRepository::new()),
            members: Arc::new(MockMemberRepository::new()),
            clients: Arc::new(MockClientRepository::new()),
            service_types: Arc::new(MockServiceTypeRepository::new()),
            appointments: Arc::new(MockAppointmentRepository::new()),
            plans: Arc::new(MockPlanRepository::seeded()),
            subscriptions: Arc::new(MockSubscriptionRepository::new()),
            invoices: Arc::new(MockInvoiceRepository::new()),
            notifications: Arc::new(MockNotificationRepository::new()),
            reports: Arc::new(MockReportsReader::empty()),
            access: Arc::new(MockClinicAccess::allowing(MemberRole::Owner)),
            payments: Arc::new(MockPaymentProvider::new()),
            email: Arc::new(MockEmailSender::new()),
            assistant: Arc::new(MockAssistantProvider::with_reply("ok")),
            sessions: Arc::new(MockSessionValidator::default()),
            webhook_verifier: Arc::new(StripeWebhookVerifier::new("whsec_test", 300)),
            frontend_base_url: "http://localhost:3000".to_string(),
        }
    }

    #[test]
    fn app_router_assembles() {
        let _router = app_router(test_state());
    }
}
