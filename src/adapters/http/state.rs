//! Shared application state for the HTTP layer.
//!
//! One state struct of Arc-wrapped ports, cloned per request. Handlers
//! construct their application handler from the ports they need, so the
//! wiring stays visible at the call site.

use std::sync::Arc;

use crate::adapters::stripe::StripeWebhookVerifier;
use crate::ports::{
    AppointmentRepository, AssistantProvider, ClientRepository, ClinicAccess, ClinicRepository,
    EmailSender, InvoiceRepository, MemberRepository, NotificationRepository, PaymentProvider,
    PlanRepository, ReportsReader, ServiceTypeRepository, SessionValidator,
    SubscriptionRepository,
};

/// Everything a request handler can reach.
#[derive(Clone)]
pub struct AppState {
    pub clinics: Arc<dyn ClinicRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub service_types: Arc<dyn ServiceTypeRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub reports: Arc<dyn ReportsReader>,
    pub access: Arc<dyn ClinicAccess>,
    pub payments: Arc<dyn PaymentProvider>,
    pub email: Arc<dyn EmailSender>,
    pub assistant: Arc<dyn AssistantProvider>,
    pub sessions: Arc<dyn SessionValidator>,

    /// Verifies payment webhook signatures before any parsing.
    pub webhook_verifier: Arc<StripeWebhookVerifier>,

    /// Base URL the public invoice links point at.
    pub frontend_base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }
}
