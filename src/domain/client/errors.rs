//! Client-specific error types.

use crate::domain::foundation::{ClientId, ClinicId, DomainError, ErrorCode};

/// Client roster errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Client was not found.
    NotFound(ClientId),

    /// Another client in the same clinic already uses this email.
    DuplicateEmail { clinic_id: ClinicId, email: String },

    /// The clinic's plan does not allow more clients.
    LimitReached { limit: u32, current: u32 },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ClientError {
    pub fn not_found(id: ClientId) -> Self {
        ClientError::NotFound(id)
    }

    pub fn duplicate_email(clinic_id: ClinicId, email: impl Into<String>) -> Self {
        ClientError::DuplicateEmail {
            clinic_id,
            email: email.into(),
        }
    }

    pub fn limit_reached(limit: u32, current: u32) -> Self {
        ClientError::LimitReached { limit, current }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ClientError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::NotFound(_) => ErrorCode::ClientNotFound,
            ClientError::DuplicateEmail { .. } => ErrorCode::DuplicateEmail,
            ClientError::LimitReached { .. } => ErrorCode::ClientLimitReached,
            ClientError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ClientError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::NotFound(id) => format!("Client not found: {}", id),
            ClientError::DuplicateEmail { email, .. } => {
                format!("A client with email '{}' already exists", email)
            }
            // Wording is load-bearing: clients of the API match on it.
            ClientError::LimitReached { .. } => "Client limit reached".to_string(),
            ClientError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ClientError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Whether retrying the operation could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Infrastructure(_))
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for DomainError {
    fn from(err: ClientError) -> Self {
        match &err {
            ClientError::LimitReached { limit, current } => {
                DomainError::new(err.code(), err.message())
                    .with_detail("limit", limit.to_string())
                    .with_detail("current", current.to_string())
            }
            _ => DomainError::new(err.code(), err.message()),
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ClientError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            _ => ClientError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_reached_uses_exact_wording() {
        let err = ClientError::limit_reached(10, 10);
        assert_eq!(err.message(), "Client limit reached");
    }

    #[test]
    fn limit_reached_maps_to_limit_code() {
        let err = ClientError::limit_reached(10, 12);
        assert_eq!(err.code(), ErrorCode::ClientLimitReached);
    }

    #[test]
    fn duplicate_email_maps_to_duplicate_code() {
        let err = ClientError::duplicate_email(ClinicId::new(), "a@b.com");
        assert_eq!(err.code(), ErrorCode::DuplicateEmail);
        assert!(err.message().contains("a@b.com"));
    }

    #[test]
    fn limit_reached_carries_details_into_domain_error() {
        let err = ClientError::limit_reached(10, 11);
        let domain_err: DomainError = err.into();
        assert_eq!(domain_err.details.get("limit").map(String::as_str), Some("10"));
        assert_eq!(
            domain_err.details.get("current").map(String::as_str),
            Some("11")
        );
    }

    #[test]
    fn only_infrastructure_is_retryable() {
        assert!(ClientError::infrastructure("db down").is_retryable());
        assert!(!ClientError::limit_reached(10, 10).is_retryable());
    }
}
