//! Invoicing-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, InvoiceId};

/// Invoicing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoicingError {
    /// Invoice was not found.
    NotFound(InvoiceId),

    /// No invoice matches the given public token.
    TokenNotFound,

    /// A line item's own arithmetic does not hold.
    ItemMismatch { description: String },

    /// Sum of item totals does not match the subtotal.
    SubtotalMismatch,

    /// Subtotal plus tax does not match the total.
    TotalMismatch,

    /// The invoice is paid and can no longer change.
    AlreadyPaid(InvoiceId),

    /// The invoice's current status does not allow the operation.
    InvalidState { current: String, attempted: String },

    /// The clinic's plan does not include the feature.
    FeatureNotAvailable { feature: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl InvoicingError {
    pub fn not_found(id: InvoiceId) -> Self {
        InvoicingError::NotFound(id)
    }

    pub fn token_not_found() -> Self {
        InvoicingError::TokenNotFound
    }

    pub fn item_mismatch(description: impl Into<String>) -> Self {
        InvoicingError::ItemMismatch {
            description: description.into(),
        }
    }

    pub fn subtotal_mismatch() -> Self {
        InvoicingError::SubtotalMismatch
    }

    pub fn total_mismatch() -> Self {
        InvoicingError::TotalMismatch
    }

    pub fn already_paid(id: InvoiceId) -> Self {
        InvoicingError::AlreadyPaid(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        InvoicingError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn feature_not_available(feature: impl Into<String>) -> Self {
        InvoicingError::FeatureNotAvailable {
            feature: feature.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InvoicingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        InvoicingError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            InvoicingError::NotFound(_) => ErrorCode::InvoiceNotFound,
            InvoicingError::TokenNotFound => ErrorCode::InvoiceNotFound,
            InvoicingError::ItemMismatch { .. } => ErrorCode::ValidationFailed,
            InvoicingError::SubtotalMismatch => ErrorCode::ValidationFailed,
            InvoicingError::TotalMismatch => ErrorCode::ValidationFailed,
            InvoicingError::AlreadyPaid(_) => ErrorCode::InvoiceAlreadyPaid,
            InvoicingError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            InvoicingError::FeatureNotAvailable { .. } => ErrorCode::FeatureNotAvailable,
            InvoicingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            InvoicingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            InvoicingError::NotFound(id) => format!("Invoice not found: {}", id),
            InvoicingError::TokenNotFound => "Invoice not found".to_string(),
            InvoicingError::ItemMismatch { description } => {
                format!(
                    "Line item '{}' total does not match quantity x unit price",
                    description
                )
            }
            InvoicingError::SubtotalMismatch => {
                "Subtotal does not match the sum of line item totals.".to_string()
            }
            // Wording is load-bearing: clients of the API match on it.
            InvoicingError::TotalMismatch => "Total does not match subtotal + tax.".to_string(),
            InvoicingError::AlreadyPaid(id) => {
                format!("Invoice {} is paid and cannot be modified", id)
            }
            InvoicingError::InvalidState { current, attempted } => {
                format!("Cannot {} a {} invoice", attempted, current)
            }
            InvoicingError::FeatureNotAvailable { feature } => {
                format!("Your plan does not include {}", feature)
            }
            InvoicingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            InvoicingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Whether retrying the operation could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, InvoicingError::Infrastructure(_))
    }
}

impl std::fmt::Display for InvoicingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for InvoicingError {}

impl From<InvoicingError> for DomainError {
    fn from(err: InvoicingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

impl From<DomainError> for InvoicingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => InvoicingError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            _ => InvoicingError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_mismatch_uses_exact_wording() {
        assert_eq!(
            InvoicingError::total_mismatch().message(),
            "Total does not match subtotal + tax."
        );
    }

    #[test]
    fn arithmetic_errors_are_validation_class() {
        assert_eq!(
            InvoicingError::total_mismatch().code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            InvoicingError::item_mismatch("Consult").code(),
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn item_mismatch_names_the_item() {
        let err = InvoicingError::item_mismatch("Follow-up session");
        assert!(err.message().contains("Follow-up session"));
    }

    #[test]
    fn already_paid_maps_to_its_own_code() {
        let err = InvoicingError::already_paid(InvoiceId::new());
        assert_eq!(err.code(), ErrorCode::InvoiceAlreadyPaid);
    }

    #[test]
    fn token_not_found_does_not_leak_token() {
        let err = InvoicingError::token_not_found();
        assert_eq!(err.message(), "Invoice not found");
    }
}
