//! Clinic-specific error types.

use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, UserId};

use super::MemberRole;

/// Clinic and membership errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    /// Clinic was not found.
    NotFound(ClinicId),

    /// The user is not a member of the clinic.
    NotAMember { clinic_id: ClinicId, user_id: UserId },

    /// The user is a member but their role is below what the operation needs.
    RoleTooLow {
        required: MemberRole,
        actual: MemberRole,
    },

    /// The user is already a member of the clinic.
    MemberAlreadyExists { clinic_id: ClinicId, user_id: UserId },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl ClinicError {
    pub fn not_found(clinic_id: ClinicId) -> Self {
        ClinicError::NotFound(clinic_id)
    }

    pub fn not_a_member(clinic_id: ClinicId, user_id: UserId) -> Self {
        ClinicError::NotAMember { clinic_id, user_id }
    }

    pub fn role_too_low(required: MemberRole, actual: MemberRole) -> Self {
        ClinicError::RoleTooLow { required, actual }
    }

    pub fn member_already_exists(clinic_id: ClinicId, user_id: UserId) -> Self {
        ClinicError::MemberAlreadyExists { clinic_id, user_id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClinicError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ClinicError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ClinicError::NotFound(_) => ErrorCode::ClinicNotFound,
            ClinicError::NotAMember { .. } => ErrorCode::Forbidden,
            ClinicError::RoleTooLow { .. } => ErrorCode::Forbidden,
            ClinicError::MemberAlreadyExists { .. } => ErrorCode::AlreadyExists,
            ClinicError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ClinicError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            ClinicError::NotFound(id) => format!("Clinic not found: {}", id),
            ClinicError::NotAMember { clinic_id, user_id } => {
                format!("User {} is not a member of clinic {}", user_id, clinic_id)
            }
            ClinicError::RoleTooLow { required, actual } => {
                format!(
                    "Requires {} role or above, but user is {}",
                    required, actual
                )
            }
            ClinicError::MemberAlreadyExists { clinic_id, user_id } => {
                format!(
                    "User {} is already a member of clinic {}",
                    user_id, clinic_id
                )
            }
            ClinicError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ClinicError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ClinicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ClinicError {}

impl From<ClinicError> for DomainError {
    fn from(err: ClinicError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

impl From<DomainError> for ClinicError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ClinicError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            _ => ClinicError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_member_maps_to_forbidden() {
        let err = ClinicError::not_a_member(ClinicId::new(), UserId::new("u1").unwrap());
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[test]
    fn role_too_low_names_both_roles() {
        let err = ClinicError::role_too_low(MemberRole::Admin, MemberRole::Staff);
        let msg = err.message();
        assert!(msg.contains("Admin"));
        assert!(msg.contains("Staff"));
    }

    #[test]
    fn member_already_exists_maps_to_conflict() {
        let err = ClinicError::member_already_exists(ClinicId::new(), UserId::new("u1").unwrap());
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
    }

    #[test]
    fn converts_to_domain_error() {
        let clinic_id = ClinicId::new();
        let err = ClinicError::not_found(clinic_id);
        let domain_err: DomainError = err.into();
        assert_eq!(domain_err.code, ErrorCode::ClinicNotFound);
        assert!(domain_err.message.contains(&clinic_id.to_string()));
    }
}
