//! Billing handlers: subscription status, trials, plans, payment events.

mod check_subscription_status;
mod handle_payment_webhook;
mod list_plans;
mod process_expired_trials;
mod start_trial;

pub use check_subscription_status::{
    CheckSubscriptionStatusHandler, CheckSubscriptionStatusQuery, SubscriptionStatusResult,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookHandler, PaymentWebhookCommand, WebhookOutcome,
};
pub use list_plans::ListPlansHandler;
pub use process_expired_trials::{ProcessExpiredTrialsHandler, ProcessExpiredTrialsResult};
pub use start_trial::{StartTrialCommand, StartTrialHandler, StartTrialResult};
