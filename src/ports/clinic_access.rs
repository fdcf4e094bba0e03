//! Access control port for clinic-scoped operations.
//!
//! Every clinic-scoped endpoint resolves the caller's membership
//! through this port before touching data. It fails secure: any
//! lookup error denies access.

use crate::domain::clinic::{ClinicMember, MemberRole};
use crate::domain::foundation::{ClinicId, DomainError, UserId};
use async_trait::async_trait;

/// Port for checking a user's standing within a clinic.
#[async_trait]
pub trait ClinicAccess: Send + Sync {
    /// Require that the user is a member of the clinic.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not a member
    /// - `DatabaseError` on lookup failure
    async fn require_member(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<ClinicMember, DomainError>;

    /// Require membership with at least the given role.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not a member or their role ranks
    ///   below `role`
    async fn require_role(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
        role: MemberRole,
    ) -> Result<ClinicMember, DomainError>;
}
