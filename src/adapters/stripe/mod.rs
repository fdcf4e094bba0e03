//! Stripe adapters - payment intents and webhook verification.

mod payment_adapter;
mod webhook;

pub use payment_adapter::StripePaymentAdapter;
pub use webhook::{SignatureHeader, StripeWebhookVerifier, VerifiedPaymentEvent};
