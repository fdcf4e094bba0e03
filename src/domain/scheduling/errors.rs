//! Scheduling-specific error types.

use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode, ServiceTypeId};

use super::AppointmentStatus;

/// Scheduling errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulingError {
    /// Appointment was not found.
    AppointmentNotFound(AppointmentId),

    /// Service type was not found.
    ServiceTypeNotFound(ServiceTypeId),

    /// The appointment's current status does not allow the operation.
    InvalidState {
        current: AppointmentStatus,
        attempted: String,
    },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl SchedulingError {
    pub fn appointment_not_found(id: AppointmentId) -> Self {
        SchedulingError::AppointmentNotFound(id)
    }

    pub fn service_type_not_found(id: ServiceTypeId) -> Self {
        SchedulingError::ServiceTypeNotFound(id)
    }

    pub fn invalid_state(current: AppointmentStatus, attempted: impl Into<String>) -> Self {
        SchedulingError::InvalidState {
            current,
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SchedulingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SchedulingError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SchedulingError::AppointmentNotFound(_) => ErrorCode::AppointmentNotFound,
            SchedulingError::ServiceTypeNotFound(_) => ErrorCode::ServiceTypeNotFound,
            SchedulingError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SchedulingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SchedulingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            SchedulingError::AppointmentNotFound(id) => format!("Appointment not found: {}", id),
            SchedulingError::ServiceTypeNotFound(id) => format!("Service type not found: {}", id),
            SchedulingError::InvalidState { current, attempted } => {
                format!("Cannot {} a {} appointment", attempted, current)
            }
            SchedulingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SchedulingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Whether retrying the operation could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulingError::Infrastructure(_))
    }
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SchedulingError {}

impl From<SchedulingError> for DomainError {
    fn from(err: SchedulingError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

impl From<DomainError> for SchedulingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SchedulingError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            _ => SchedulingError::Infrastructure(err.to_string()),
        }
    }
}
