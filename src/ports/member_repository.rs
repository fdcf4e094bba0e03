//! Clinic member repository port.
//!
//! Membership rows link platform users to clinics with a role. They
//! answer both "who works at this clinic" and "which clinics can this
//! user see".

use crate::domain::clinic::ClinicMember;
use crate::domain::foundation::{ClinicId, DomainError, UserId};
use async_trait::async_trait;

/// Repository port for clinic membership persistence.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Add a member to a clinic.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the user is already a member
    /// - `DatabaseError` on persistence failure
    async fn save(&self, member: &ClinicMember) -> Result<(), DomainError>;

    /// Find a specific membership.
    ///
    /// Returns `None` if the user is not a member of the clinic.
    async fn find(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<Option<ClinicMember>, DomainError>;

    /// List all members of a clinic, owners first.
    async fn list_for_clinic(&self, clinic_id: &ClinicId) -> Result<Vec<ClinicMember>, DomainError>;

    /// List every clinic the user belongs to.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ClinicMember>, DomainError>;
}
