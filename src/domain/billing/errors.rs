//! Billing-specific error types.
//!
//! Errors related to subscriptions, plans, trials, and limit enforcement.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | SubscriptionNotFound | 404 |
//! | PlanNotFound | 404 |
//! | ClientLimitReached | 402 |
//! | TrialNotAllowed | 400 |
//! | InvalidState | 409 |
//! | InvalidWebhookSignature | 401 |
//! | PaymentFailed | 502 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{ClinicId, DomainError, ErrorCode};

/// Billing-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// No subscription exists for this clinic.
    SubscriptionNotFound(ClinicId),

    /// The requested plan does not exist in the catalog.
    PlanNotFound(String),

    /// The clinic is at or above its plan's client limit.
    ClientLimitReached { limit: u32, current: u32 },

    /// A trial cannot be started for the requested plan.
    TrialNotAllowed { reason: String },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Webhook signature verification failed.
    InvalidWebhookSignature,

    /// Payment provider call failed.
    PaymentFailed { reason: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl BillingError {
    // Constructor functions for cleaner error creation

    pub fn subscription_not_found(clinic_id: ClinicId) -> Self {
        BillingError::SubscriptionNotFound(clinic_id)
    }

    pub fn plan_not_found(plan: impl Into<String>) -> Self {
        BillingError::PlanNotFound(plan.into())
    }

    pub fn client_limit_reached(limit: u32, current: u32) -> Self {
        BillingError::ClientLimitReached { limit, current }
    }

    pub fn trial_not_allowed(reason: impl Into<String>) -> Self {
        BillingError::TrialNotAllowed {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        BillingError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn invalid_webhook_signature() -> Self {
        BillingError::InvalidWebhookSignature
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        BillingError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BillingError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::SubscriptionNotFound(_) => ErrorCode::SubscriptionNotFound,
            BillingError::PlanNotFound(_) => ErrorCode::PlanNotFound,
            BillingError::ClientLimitReached { .. } => ErrorCode::ClientLimitReached,
            BillingError::TrialNotAllowed { .. } => ErrorCode::ValidationFailed,
            BillingError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            BillingError::InvalidWebhookSignature => ErrorCode::Unauthorized,
            BillingError::PaymentFailed { .. } => ErrorCode::PaymentProviderError,
            BillingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BillingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            BillingError::SubscriptionNotFound(clinic_id) => {
                format!("No subscription found for clinic: {}", clinic_id)
            }
            BillingError::PlanNotFound(plan) => format!("Plan not found: {}", plan),
            // Wording is load-bearing: clients of the API match on it.
            BillingError::ClientLimitReached { .. } => "Client limit reached".to_string(),
            BillingError::TrialNotAllowed { reason } => {
                format!("Cannot start trial: {}", reason)
            }
            BillingError::InvalidState { current, attempted } => {
                format!("Cannot {} subscription in {} state", attempted, current)
            }
            BillingError::InvalidWebhookSignature => "Invalid webhook signature".to_string(),
            BillingError::PaymentFailed { reason } => format!("Payment failed: {}", reason),
            BillingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BillingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BillingError::Infrastructure(_) | BillingError::PaymentFailed { .. }
        )
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BillingError {}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SubscriptionNotFound | ErrorCode::PlanNotFound => {
                BillingError::Infrastructure(err.to_string())
            }
            ErrorCode::InvalidStateTransition => BillingError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.to_string(),
            },
            ErrorCode::PaymentProviderError => BillingError::PaymentFailed {
                reason: err.to_string(),
            },
            ErrorCode::ValidationFailed => BillingError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            _ => BillingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<BillingError> for DomainError {
    fn from(err: BillingError) -> Self {
        let domain_err = DomainError::new(err.code(), err.message());
        match err {
            BillingError::ClientLimitReached { limit, current } => domain_err
                .with_detail("limit", limit.to_string())
                .with_detail("current", current.to_string()),
            _ => domain_err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // Constructor Tests
    // ============================================================

    #[test]
    fn subscription_not_found_creates_correctly() {
        let clinic_id = ClinicId::new();
        let err = BillingError::subscription_not_found(clinic_id);
        assert!(matches!(err, BillingError::SubscriptionNotFound(id) if id == clinic_id));
        assert_eq!(err.code(), ErrorCode::SubscriptionNotFound);
    }

    #[test]
    fn client_limit_reached_creates_correctly() {
        let err = BillingError::client_limit_reached(10, 10);
        assert!(matches!(
            err,
            BillingError::ClientLimitReached { limit: 10, current: 10 }
        ));
        assert_eq!(err.code(), ErrorCode::ClientLimitReached);
    }

    #[test]
    fn plan_not_found_creates_correctly() {
        let err = BillingError::plan_not_found("platinum");
        assert!(matches!(err, BillingError::PlanNotFound(ref p) if p == "platinum"));
        assert_eq!(err.code(), ErrorCode::PlanNotFound);
    }

    #[test]
    fn invalid_webhook_signature_creates_correctly() {
        let err = BillingError::invalid_webhook_signature();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    // ============================================================
    // Message Tests
    // ============================================================

    #[test]
    fn client_limit_reached_uses_exact_wording() {
        let err = BillingError::client_limit_reached(10, 12);
        assert_eq!(err.message(), "Client limit reached");
    }

    #[test]
    fn subscription_not_found_message_includes_clinic() {
        let clinic_id = ClinicId::new();
        let err = BillingError::subscription_not_found(clinic_id);
        assert!(err.message().contains(&clinic_id.to_string()));
    }

    #[test]
    fn payment_failed_message_preserves_reason() {
        let err = BillingError::payment_failed("card declined");
        assert!(err.message().contains("card declined"));
    }

    // ============================================================
    // Retryable Tests
    // ============================================================

    #[test]
    fn infrastructure_errors_are_retryable() {
        assert!(BillingError::infrastructure("timeout").is_retryable());
    }

    #[test]
    fn limit_errors_are_not_retryable() {
        assert!(!BillingError::client_limit_reached(10, 10).is_retryable());
    }

    // ============================================================
    // Conversion Tests
    // ============================================================

    #[test]
    fn converts_to_domain_error_with_limit_details() {
        let err = BillingError::client_limit_reached(10, 11);
        let domain_err: DomainError = err.into();
        assert_eq!(domain_err.code, ErrorCode::ClientLimitReached);
        assert_eq!(domain_err.message, "Client limit reached");
        assert_eq!(domain_err.details.get("limit"), Some(&"10".to_string()));
        assert_eq!(domain_err.details.get("current"), Some(&"11".to_string()));
    }

    #[test]
    fn converts_from_domain_error() {
        let domain_err = DomainError::new(ErrorCode::PaymentProviderError, "intent failed");
        let billing_err: BillingError = domain_err.into();
        assert_eq!(billing_err.code(), ErrorCode::PaymentProviderError);
    }

    #[test]
    fn display_matches_message() {
        let err = BillingError::plan_not_found("gold");
        assert_eq!(format!("{}", err), err.message());
    }
}
