//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port against the Stripe HTTP API.
//! Requests are form-encoded with the secret key as basic auth, the
//! way Stripe's API expects. Amounts cross the wire in minor units.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CreatePaymentIntent, PaymentIntent, PaymentIntentStatus, PaymentProvider};

/// Stripe implementation of the PaymentProvider port.
pub struct StripePaymentAdapter {
    api_key: SecretString,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Creates an adapter using the given secret key (sk_test_... or
    /// sk_live_...).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe PaymentIntent object, reduced to the fields we read.
#[derive(Debug, Clone, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: Option<String>,
    status: String,
}

impl TryFrom<StripePaymentIntent> for PaymentIntent {
    type Error = DomainError;

    fn try_from(intent: StripePaymentIntent) -> Result<Self, Self::Error> {
        Ok(PaymentIntent {
            status: parse_intent_status(&intent.status)?,
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}

fn parse_intent_status(s: &str) -> Result<PaymentIntentStatus, DomainError> {
    match s {
        "requires_payment_method" | "requires_confirmation" | "requires_action" => {
            Ok(PaymentIntentStatus::RequiresPayment)
        }
        "processing" | "requires_capture" => Ok(PaymentIntentStatus::Processing),
        "succeeded" => Ok(PaymentIntentStatus::Succeeded),
        "canceled" => Ok(PaymentIntentStatus::Cancelled),
        other => Err(DomainError::new(
            ErrorCode::PaymentProviderError,
            format!("Unknown payment intent status: {}", other),
        )),
    }
}

/// Convert major currency units to the gateway's integer minor units.
fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntent,
    ) -> Result<PaymentIntent, DomainError> {
        let url = format!("{}/v1/payment_intents", self.api_base_url);

        let amount = to_minor_units(request.amount).to_string();
        let params = vec![
            ("amount", amount),
            ("currency", request.currency.to_lowercase()),
            ("description", request.description.clone()),
            ("metadata[invoice_id]", request.invoice_id.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::PaymentProviderError,
                    format!("Payment request failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe create_payment_intent failed");
            return Err(DomainError::new(
                ErrorCode::PaymentProviderError,
                format!("Stripe API error: {}", error_text),
            ));
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::PaymentProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        intent.try_into()
    }

    async fn get_payment_intent(&self, id: &str) -> Result<Option<PaymentIntent>, DomainError> {
        let url = format!("{}/v1/payment_intents/{}", self.api_base_url, id);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::PaymentProviderError,
                    format!("Payment request failed: {}", e),
                )
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DomainError::new(
                ErrorCode::PaymentProviderError,
                format!("Stripe API error: {}", error_text),
            ));
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::PaymentProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        Ok(Some(intent.try_into()?))
    }
}
