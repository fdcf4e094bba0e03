//! PayPublicInvoiceHandler - starts payment for a token-addressed invoice.
//!
//! Creates a payment intent at the gateway and stores its id on the
//! invoice. The invoice is not marked paid here; that happens when the
//! gateway confirms the payment through the webhook.

use std::sync::Arc;

use crate::domain::invoicing::{InvoiceStatus, InvoicingError, PublicToken};
use crate::ports::{CreatePaymentIntent, InvoiceRepository, PaymentIntentStatus, PaymentProvider};

/// Command to start paying an invoice.
#[derive(Debug, Clone)]
pub struct PayPublicInvoiceCommand {
    pub token: String,
}

/// What the browser needs to confirm the payment.
#[derive(Debug, Clone)]
pub struct PayPublicInvoiceResult {
    pub payment_intent_id: String,
    pub client_secret: Option<String>,
    pub amount: f64,
}

/// Handler for public invoice payment.
pub struct PayPublicInvoiceHandler {
    invoices: Arc<dyn InvoiceRepository>,
    payments: Arc<dyn PaymentProvider>,
}

impl PayPublicInvoiceHandler {
    pub fn new(invoices: Arc<dyn InvoiceRepository>, payments: Arc<dyn PaymentProvider>) -> Self {
        Self { invoices, payments }
    }

    pub async fn handle(
        &self,
        cmd: PayPublicInvoiceCommand,
    ) -> Result<PayPublicInvoiceResult, InvoicingError> {
        // 1. Resolve the token
        let token =
            PublicToken::parse(cmd.token).map_err(|_| InvoicingError::token_not_found())?;
        let mut invoice = self
            .invoices
            .find_by_public_token(&token)
            .await?
            .ok_or_else(InvoicingError::token_not_found)?;

        // 2. Paid invoices take no further payments; void ones never do
        match invoice.status {
            InvoiceStatus::Paid => return Err(InvoicingError::already_paid(invoice.id)),
            InvoiceStatus::Void => {
                return Err(InvoicingError::invalid_state(
                    invoice.status.display_name(),
                    "pay",
                ));
            }
            InvoiceStatus::Draft | InvoiceStatus::Sent => {}
        }

        // 3. Reuse the intent from an earlier attempt so a refreshed
        //    pay page does not stack duplicates at the gateway
        if let Some(existing) = &invoice.payment_intent_id {
            if let Some(intent) = self.payments.get_payment_intent(existing).await? {
                if intent.status != PaymentIntentStatus::Cancelled {
                    return Ok(PayPublicInvoiceResult {
                        payment_intent_id: intent.id,
                        client_secret: intent.client_secret,
                        amount: invoice.total,
                    });
                }
            }
        }

        // 4. Create a fresh intent and remember it
        let intent = self
            .payments
            .create_payment_intent(CreatePaymentIntent {
                invoice_id: invoice.id,
                amount: invoice.total,
                currency: "usd".to_string(),
                description: format!("Invoice {}", invoice.id),
            })
            .await?;
        invoice.attach_payment_intent(intent.id.clone())?;
        self.invoices.update(&invoice).await?;

        Ok(PayPublicInvoiceResult {
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
            amount: invoice.total,
        })
    }
}
