//! HTTP error mapping.
//!
//! `ApiError` wraps the foundation `DomainError` and renders it as a
//! JSON error response. The `ErrorCode` decides the HTTP status, so
//! handlers only ever produce domain errors and the mapping lives in
//! one place.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::billing::BillingError;
use crate::domain::client::ClientError;
use crate::domain::clinic::ClinicError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::invoicing::InvoicingError;
use crate::domain::scheduling::SchedulingError;

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// API error that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    /// The HTTP status for an error code.
    pub fn status_for(code: ErrorCode) -> StatusCode {
        match code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

            ErrorCode::ClinicNotFound
            | ErrorCode::ClientNotFound
            | ErrorCode::ServiceTypeNotFound
            | ErrorCode::AppointmentNotFound
            | ErrorCode::InvoiceNotFound
            | ErrorCode::PlanNotFound
            | ErrorCode::SubscriptionNotFound
            | ErrorCode::NotificationNotFound => StatusCode::NOT_FOUND,

            ErrorCode::DuplicateEmail
            | ErrorCode::AlreadyExists
            | ErrorCode::InvalidStateTransition
            | ErrorCode::InvoiceAlreadyPaid => StatusCode::CONFLICT,

            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,

            // Plan-gated: both clear after an upgrade
            ErrorCode::ClientLimitReached | ErrorCode::FeatureNotAvailable => {
                StatusCode::PAYMENT_REQUIRED
            }

            ErrorCode::PaymentProviderError
            | ErrorCode::EmailDeliveryError
            | ErrorCode::AssistantProviderError => StatusCode::BAD_GATEWAY,

            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        Self(err.into())
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        Self(err.into())
    }
}

impl From<SchedulingError> for ApiError {
    fn from(err: SchedulingError) -> Self {
        Self(err.into())
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        Self(err.into())
    }
}

impl From<InvoicingError> for ApiError {
    fn from(err: InvoicingError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = Self::status_for(self.0.code);

        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "Request failed");
        }

        let details = if self.0.details.is_empty() {
            None
        } else {
            serde_json::to_value(&self.0.details).ok()
        };

        let body = ErrorResponse {
            error_code: self.0.code.to_string(),
            message: self.0.message,
            details,
        };

        (status, Json(body)).into_response()
    }
}
