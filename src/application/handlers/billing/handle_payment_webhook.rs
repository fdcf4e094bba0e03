//! HandlePaymentWebhookHandler - applies verified payment events.
//!
//! Signature verification happens at the adapter edge; this handler
//! trusts its input. Payment providers redeliver events, so every path
//! here is idempotent: a retry of an already-applied event reports
//! `AlreadyPaid` and changes nothing.

use std::sync::Arc;

use crate::domain::billing::BillingError;
use crate::domain::clinic::MemberRole;
use crate::domain::foundation::{ClinicId, InvoiceId};
use crate::domain::invoicing::InvoicingError;
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{InvoiceRepository, MemberRepository, NotificationRepository};

/// A verified payment event.
#[derive(Debug, Clone)]
pub struct PaymentWebhookCommand {
    /// Provider event type, e.g. `payment_intent.succeeded`.
    pub event_type: String,
    pub payment_intent_id: Option<String>,
}

/// What the handler did with the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The linked invoice was marked paid.
    InvoicePaid(InvoiceId),
    /// Redelivery of an event that was already applied.
    AlreadyPaid(InvoiceId),
    /// Event type or intent we do not act on.
    Ignored,
}

/// Handler for payment provider webhooks.
pub struct HandlePaymentWebhookHandler {
    invoices: Arc<dyn InvoiceRepository>,
    members: Arc<dyn MemberRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        members: Arc<dyn MemberRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            invoices,
            members,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: PaymentWebhookCommand,
    ) -> Result<WebhookOutcome, BillingError> {
        // 1. Only successful payments move invoices
        if cmd.event_type != "payment_intent.succeeded" {
            return Ok(WebhookOutcome::Ignored);
        }
        let Some(payment_intent_id) = cmd.payment_intent_id else {
            return Ok(WebhookOutcome::Ignored);
        };

        // 2. Events for intents we never issued are not ours to handle
        let Some(mut invoice) = self.invoices.find_by_payment_intent(&payment_intent_id).await?
        else {
            return Ok(WebhookOutcome::Ignored);
        };

        // 3. Apply the payment, absorbing redeliveries
        match invoice.mark_paid(Some(payment_intent_id)) {
            Ok(()) => {}
            Err(InvoicingError::AlreadyPaid(id)) => {
                return Ok(WebhookOutcome::AlreadyPaid(id));
            }
            Err(err) => {
                return Err(BillingError::invalid_state(
                    invoice.status.display_name(),
                    err.to_string(),
                ));
            }
        }
        self.invoices.update(&invoice).await?;

        // 4. Tell the clinic. Best effort: the payment is recorded.
        self.notify_owners(invoice.clinic_id, invoice.total).await;

        Ok(WebhookOutcome::InvoicePaid(invoice.id))
    }

    async fn notify_owners(&self, clinic_id: ClinicId, total: f64) {
        let Ok(members) = self.members.list_for_clinic(&clinic_id).await else {
            return;
        };
        for member in members.into_iter().filter(|m| m.role == MemberRole::Owner) {
            let Ok(notification) = Notification::create(
                member.user_id,
                clinic_id,
                NotificationKind::Invoice,
                "Invoice paid",
                format!("An invoice for {:.2} was just paid.", total),
            ) else {
                continue;
            };
            let _ = self.notifications.save(&notification).await;
        }
    }
}
