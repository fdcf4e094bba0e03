//! HTTP handlers for plans, subscriptions, and payment webhooks.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    CheckSubscriptionStatusHandler, CheckSubscriptionStatusQuery, HandlePaymentWebhookHandler,
    ListPlansHandler, PaymentWebhookCommand, StartTrialCommand, StartTrialHandler,
};
use crate::domain::clinic::MemberRole;
use crate::domain::foundation::{ClinicId, DomainError};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    PlanResponse, PlansResponse, StartTrialRequest, SubscriptionResponse,
    SubscriptionStatusResponse, WebhookAckResponse,
};

/// GET /api/clinics/:id/subscription - Current subscription and plan
///
/// Lazily expires an overdue trial before reporting, so the response
/// always reflects the effective plan.
pub async fn get_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler =
        CheckSubscriptionStatusHandler::new(state.subscriptions.clone(), state.plans.clone());
    let result = handler
        .handle(CheckSubscriptionStatusQuery { clinic_id })
        .await?;

    let response = SubscriptionStatusResponse {
        subscription: SubscriptionResponse::from(result.subscription),
        plan: PlanResponse::from(result.plan),
    };

    Ok(Json(response))
}

/// POST /api/clinics/:id/subscription/trial - Start a trial (owner/admin)
pub async fn start_trial(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Json(request): Json<StartTrialRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .access
        .require_role(&clinic_id, &user.id, MemberRole::Admin)
        .await?;

    let handler = StartTrialHandler::new(state.subscriptions.clone(), state.plans.clone());
    let cmd = StartTrialCommand {
        clinic_id,
        tier: request.tier,
    };

    let result = handler.handle(cmd).await?;

    let response = SubscriptionStatusResponse {
        subscription: SubscriptionResponse::from(result.subscription),
        plan: PlanResponse::from(result.plan),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/plans - The plan catalog
pub async fn list_plans(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = ListPlansHandler::new(state.plans.clone());
    let result = handler.handle().await?;

    let response = PlansResponse {
        plans: result.plans.into_iter().map(PlanResponse::from).collect(),
    };

    Ok(Json(response))
}

/// POST /api/webhooks/payment - Payment provider events
///
/// No session auth; the request is authenticated by its signature.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            DomainError::validation("Stripe-Signature", "Missing Stripe-Signature header")
        })?;

    let event = state.webhook_verifier.verify_and_parse(&body, signature)?;

    let handler = HandlePaymentWebhookHandler::new(
        state.invoices.clone(),
        state.members.clone(),
        state.notifications.clone(),
    );
    let cmd = PaymentWebhookCommand {
        event_type: event.event_type,
        payment_intent_id: event.payment_intent_id,
    };

    let outcome = handler.handle(cmd).await?;

    Ok(Json(WebhookAckResponse::from(outcome)))
}
