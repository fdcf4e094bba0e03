//! Payment provider port for external payment processing.
//!
//! Defines the contract for the payment gateway (e.g., Stripe).
//! Invoice payment is asynchronous: we create an intent, the client
//! confirms it in their browser, and the gateway tells us the outcome
//! through a webhook.

use crate::domain::foundation::{DomainError, InvoiceId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request to create a payment intent for an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePaymentIntent {
    pub invoice_id: InvoiceId,
    /// Major currency units; the adapter converts to the gateway's
    /// minor units.
    pub amount: f64,
    pub currency: String,
    pub description: String,
}

/// State of a payment intent at the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPayment,
    Processing,
    Succeeded,
    Cancelled,
}

/// A payment intent as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Gateway identifier, e.g. `pi_...`.
    pub id: String,
    /// Secret the browser needs to confirm the payment.
    pub client_secret: Option<String>,
    pub status: PaymentIntentStatus,
}

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for an invoice.
    ///
    /// # Errors
    ///
    /// - `PaymentProviderError` when the gateway rejects the request
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntent,
    ) -> Result<PaymentIntent, DomainError>;

    /// Fetch the current state of a payment intent.
    ///
    /// Returns `None` if the gateway doesn't know the ID.
    async fn get_payment_intent(&self, id: &str) -> Result<Option<PaymentIntent>, DomainError>;
}
