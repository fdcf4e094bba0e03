//! SendInvoiceHandler - emails a client their invoice link.
//!
//! The link points at the public, token-addressed invoice page on the
//! frontend, so the client pays without an account. Delivery happens
//! before the status transition: an email failure leaves the invoice
//! draft. Re-sending a sent invoice is allowed and delivers again
//! without touching the status.

use std::sync::Arc;

use crate::domain::billing::PlanTier;
use crate::domain::foundation::{ClinicId, InvoiceId, Timestamp};
use crate::domain::invoicing::{Invoice, InvoiceStatus, InvoicingError};
use crate::ports::{
    ClientRepository, ClinicRepository, EmailSender, InvoiceRepository, OutboundEmail,
    PlanRepository, SubscriptionRepository,
};

/// Command to email an invoice link.
#[derive(Debug, Clone)]
pub struct SendInvoiceCommand {
    pub clinic_id: ClinicId,
    pub invoice_id: InvoiceId,
}

/// The sent invoice and where the email went.
#[derive(Debug, Clone)]
pub struct SendInvoiceResult {
    pub invoice: Invoice,
    pub delivered_to: String,
}

/// Handler for sending invoices.
pub struct SendInvoiceHandler {
    invoices: Arc<dyn InvoiceRepository>,
    clients: Arc<dyn ClientRepository>,
    clinics: Arc<dyn ClinicRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
    email: Arc<dyn EmailSender>,
    frontend_base_url: String,
}

impl SendInvoiceHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        clients: Arc<dyn ClientRepository>,
        clinics: Arc<dyn ClinicRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
        email: Arc<dyn EmailSender>,
        frontend_base_url: impl Into<String>,
    ) -> Self {
        Self {
            invoices,
            clients,
            clinics,
            subscriptions,
            plans,
            email,
            frontend_base_url: frontend_base_url.into(),
        }
    }

    pub async fn handle(&self, cmd: SendInvoiceCommand) -> Result<SendInvoiceResult, InvoicingError> {
        // 1. Load the invoice scoped to the clinic
        let mut invoice = self
            .invoices
            .find_by_id(&cmd.invoice_id)
            .await?
            .filter(|i| i.clinic_id == cmd.clinic_id)
            .ok_or(InvoicingError::NotFound(cmd.invoice_id))?;

        // 2. Paid and void invoices have nothing to deliver
        match invoice.status {
            InvoiceStatus::Paid => return Err(InvoicingError::already_paid(invoice.id)),
            InvoiceStatus::Void => {
                return Err(InvoicingError::invalid_state(
                    invoice.status.display_name(),
                    "send",
                ));
            }
            InvoiceStatus::Draft | InvoiceStatus::Sent => {}
        }

        // 3. Emailing invoices is a paid-plan feature. A lapsed trial
        //    no longer grants it, even before the downgrade lands.
        let free_plan = self.plans.find_by_tier(PlanTier::Free).await?;
        let subscription = self
            .subscriptions
            .ensure_default(&cmd.clinic_id, &free_plan.id)
            .await?;
        let plan = if subscription.is_trial_expired(Timestamp::now()) {
            free_plan
        } else {
            self.plans
                .find_by_id(&subscription.plan_id)
                .await?
                .unwrap_or(free_plan)
        };
        if !plan.features.email_invoicing {
            return Err(InvoicingError::feature_not_available("email invoicing"));
        }

        // 4. Resolve the sender and recipient
        let clinic = self
            .clinics
            .find_by_id(&cmd.clinic_id)
            .await?
            .ok_or_else(|| InvoicingError::infrastructure("invoice references a missing clinic"))?;
        let client = self
            .clients
            .find_by_id(&invoice.client_id)
            .await?
            .ok_or_else(|| InvoicingError::infrastructure("invoice references a missing client"))?;

        // 5. Deliver first so a failed send leaves the status alone
        let link = format!(
            "{}/invoices/{}",
            self.frontend_base_url.trim_end_matches('/'),
            invoice.public_token
        );
        let subject = format!("Invoice from {}", clinic.name);
        let html = format!(
            "<p>Hi {},</p><p>{} has sent you an invoice for {:.2}.</p>\
             <p><a href=\"{}\">View and pay your invoice</a></p>",
            client.first_name, clinic.name, invoice.total, link
        );
        let text = format!(
            "Hi {},\n\n{} has sent you an invoice for {:.2}.\nView and pay: {}\n",
            client.first_name, clinic.name, invoice.total, link
        );
        self.email
            .send(OutboundEmail::new(client.email.clone(), subject, html).with_text(text))
            .await?;

        // 6. First delivery moves the invoice to sent
        if invoice.status == InvoiceStatus::Draft {
            invoice.send()?;
            self.invoices.update(&invoice).await?;
        }

        Ok(SendInvoiceResult {
            invoice,
            delivered_to: client.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockClientRepository, MockClinicRepository, MockEmailSender, MockInvoiceRepository,
        MockPlanRepository, MockSubscriptionRepository,
    };
    use crate::domain::billing::Subscription;
    use crate::domain::client::Client;
    use crate::domain::clinic::Clinic;
    use crate::domain::invoicing::LineItem;

    struct Fixture {
        invoices: Arc<MockInvoiceRepository>,
        email: Arc<MockEmailSender>,
        handler: SendInvoiceHandler,
        clinic_id: ClinicId,
        invoice_id: InvoiceId,
    }

    /// Clinic on the professional plan with one draft invoice.
    fn fixture() -> Fixture {
        fixture_with(PlanTier::Professional, Arc::new(MockEmailSender::new()))
    }

    fn fixture_with(tier: PlanTier, email: Arc<MockEmailSender>) -> Fixture {
        let clinic = Clinic::create("North Shore Therapy", "hello@northshore.example").unwrap();
        let clinic_id = clinic.id;
        let client = Client::create(clinic_id, "Maya", "Singh", "maya@example.com").unwrap();
        let items = vec![LineItem::new("Consultation", 2.0, 50.0, 100.0)];
        let invoice =
            Invoice::create(clinic_id, client.id, items, 100.0, 10.0, 110.0).unwrap();
        let invoice_id = invoice.id;

        let plans = MockPlanRepository::seeded();
        let free = plans.plan_for(PlanTier::Free);
        let plan = plans.plan_for(tier);
        let mut subscription = Subscription::create_free(clinic_id, free.id);
        if tier.is_paid() {
            subscription.start_trial(plan.id, Timestamp::now()).unwrap();
            subscription.convert_trial("sub_test".to_string()).unwrap();
        }

        let invoices = Arc::new(MockInvoiceRepository::with_invoice(invoice));
        let handler = SendInvoiceHandler::new(
            invoices.clone(),
            Arc::new(MockClientRepository::with_clients(vec![client])),
            Arc::new(MockClinicRepository::with_clinic(clinic)),
            Arc::new(MockSubscriptionRepository::with_subscription(subscription)),
            Arc::new(plans),
            email.clone(),
            "https://app.clinikit.example",
        );

        Fixture {
            invoices,
            email,
            handler,
            clinic_id,
            invoice_id,
        }
    }

    #[tokio::test]
    async fn emails_the_link_and_marks_sent() {
        let f = fixture();

        let result = f
            .handler
            .handle(SendInvoiceCommand {
                clinic_id: f.clinic_id,
                invoice_id: f.invoice_id,
            })
            .await
            .unwrap();

        assert_eq!(result.invoice.status, InvoiceStatus::Sent);
        assert_eq!(result.delivered_to, "maya@example.com");

        let sent = f.email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "maya@example.com");
        assert!(sent[0].subject.contains("North Shore Therapy"));
        let token = result.invoice.public_token.to_string();
        assert!(sent[0]
            .html
            .contains(&format!("https://app.clinikit.example/invoices/{}", token)));

        assert_eq!(f.invoices.find(f.invoice_id).unwrap().status, InvoiceStatus::Sent);
    }

    #[tokio::test]
    async fn resend_delivers_again_without_a_transition() {
        let f = fixture();
        let cmd = SendInvoiceCommand {
            clinic_id: f.clinic_id,
            invoice_id: f.invoice_id,
        };

        f.handler.handle(cmd.clone()).await.unwrap();
        let result = f.handler.handle(cmd).await.unwrap();

        assert_eq!(result.invoice.status, InvoiceStatus::Sent);
        assert_eq!(f.email.sent().len(), 2);
    }

    #[tokio::test]
    async fn free_plan_cannot_email_invoices() {
        let f = fixture_with(PlanTier::Free, Arc::new(MockEmailSender::new()));

        let err = f
            .handler
            .handle(SendInvoiceCommand {
                clinic_id: f.clinic_id,
                invoice_id: f.invoice_id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InvoicingError::FeatureNotAvailable { .. }));
        assert!(f.email.sent().is_empty());
        assert_eq!(f.invoices.find(f.invoice_id).unwrap().status, InvoiceStatus::Draft);
    }

    #[tokio::test]
    async fn delivery_failure_leaves_the_invoice_draft() {
        let f = fixture_with(PlanTier::Professional, Arc::new(MockEmailSender::failing()));

        let result = f
            .handler
            .handle(SendInvoiceCommand {
                clinic_id: f.clinic_id,
                invoice_id: f.invoice_id,
            })
            .await;

        assert!(result.is_err());
        assert_eq!(f.invoices.find(f.invoice_id).unwrap().status, InvoiceStatus::Draft);
    }

    #[tokio::test]
    async fn another_clinics_invoice_reads_as_missing() {
        let f = fixture();

        let err = f
            .handler
            .handle(SendInvoiceCommand {
                clinic_id: ClinicId::new(),
                invoice_id: f.invoice_id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InvoicingError::NotFound(_)));
    }
}
