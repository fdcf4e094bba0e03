//! HTTP DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::WebhookOutcome;
use crate::domain::billing::{Plan, PlanTier, Subscription, SubscriptionStatus};

/// Request to start a trial on a paid plan.
#[derive(Debug, Clone, Deserialize)]
pub struct StartTrialRequest {
    pub tier: PlanTier,
}

/// A subscription as returned by the API.
///
/// Payment-provider identifiers stay server-side.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub clinic_id: String,
    pub plan_id: String,
    pub status: SubscriptionStatus,
    pub trial_start: Option<String>,
    pub trial_end: Option<String>,
    pub cancelled_at: Option<String>,
    pub created_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id.to_string(),
            clinic_id: subscription.clinic_id.to_string(),
            plan_id: subscription.plan_id.to_string(),
            status: subscription.status,
            trial_start: subscription
                .trial_start
                .map(|t| t.as_datetime().to_rfc3339()),
            trial_end: subscription.trial_end.map(|t| t.as_datetime().to_rfc3339()),
            cancelled_at: subscription
                .cancelled_at
                .map(|t| t.as_datetime().to_rfc3339()),
            created_at: subscription.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Feature switches of a plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanFeaturesResponse {
    pub reports: bool,
    pub ai_assistant: bool,
    pub email_invoicing: bool,
}

/// A plan as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub id: String,
    pub tier: PlanTier,
    pub name: String,
    pub monthly_price: f64,
    /// Zero means unlimited.
    pub client_limit: u32,
    pub features: PlanFeaturesResponse,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id.to_string(),
            tier: plan.tier,
            name: plan.name,
            monthly_price: plan.monthly_price,
            client_limit: plan.client_limit,
            features: PlanFeaturesResponse {
                reports: plan.features.reports,
                ai_assistant: plan.features.ai_assistant,
                email_invoicing: plan.features.email_invoicing,
            },
        }
    }
}

/// Response for the subscription status check.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionStatusResponse {
    pub subscription: SubscriptionResponse,
    pub plan: PlanResponse,
}

/// Response for the plan catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<PlanResponse>,
}

/// Acknowledgement returned to the payment provider.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub received: bool,
    pub outcome: &'static str,
}

impl From<WebhookOutcome> for WebhookAckResponse {
    fn from(outcome: WebhookOutcome) -> Self {
        let outcome = match outcome {
            WebhookOutcome::InvoicePaid(_) => "invoice_paid",
            WebhookOutcome::AlreadyPaid(_) => "already_paid",
            WebhookOutcome::Ignored => "ignored",
        };
        Self {
            received: true,
            outcome,
        }
    }
}
