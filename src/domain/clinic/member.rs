//! Clinic membership: links a user to a clinic with a role.

use crate::domain::foundation::{ClinicId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Role a user holds within a clinic.
///
/// Roles are ordered: `Owner > Admin > Clinician > Staff`. Route guards
/// compare ranks, so adding a role means slotting it into the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Created the clinic; full control including billing.
    Owner,
    /// Manages members, billing, and reports.
    Admin,
    /// Delivers sessions; manages own clients and appointments.
    Clinician,
    /// Front-desk operations.
    Staff,
}

impl MemberRole {
    /// Returns the numeric rank of this role for comparison.
    ///
    /// Higher rank = more authority.
    pub fn rank(&self) -> u8 {
        match self {
            MemberRole::Owner => 3,
            MemberRole::Admin => 2,
            MemberRole::Clinician => 1,
            MemberRole::Staff => 0,
        }
    }

    /// True if this role has at least the authority of `required`.
    pub fn at_least(&self, required: MemberRole) -> bool {
        self.rank() >= required.rank()
    }

    /// Returns the display name for this role.
    pub fn display_name(&self) -> &'static str {
        match self {
            MemberRole::Owner => "Owner",
            MemberRole::Admin => "Admin",
            MemberRole::Clinician => "Clinician",
            MemberRole::Staff => "Staff",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A user's membership in a clinic.
///
/// Identity is the (clinic_id, user_id) pair; the database enforces
/// uniqueness on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicMember {
    /// Clinic the user belongs to.
    pub clinic_id: ClinicId,

    /// The member's user id from the auth provider.
    pub user_id: UserId,

    /// Role within the clinic.
    pub role: MemberRole,

    /// Display name shown in schedules and assignments.
    pub display_name: Option<String>,

    /// Contact email.
    pub email: String,

    /// When the user joined the clinic.
    pub joined_at: Timestamp,
}

impl ClinicMember {
    /// Create a new membership record.
    pub fn new(
        clinic_id: ClinicId,
        user_id: UserId,
        role: MemberRole,
        email: impl Into<String>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            clinic_id,
            user_id,
            role,
            display_name,
            email: email.into(),
            joined_at: Timestamp::now(),
        }
    }

    /// Create the owner membership provisioned at clinic creation.
    pub fn owner(clinic_id: ClinicId, user_id: UserId, email: impl Into<String>) -> Self {
        Self::new(clinic_id, user_id, MemberRole::Owner, email, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ranks_are_ordered() {
        assert!(MemberRole::Owner.rank() > MemberRole::Admin.rank());
        assert!(MemberRole::Admin.rank() > MemberRole::Clinician.rank());
        assert!(MemberRole::Clinician.rank() > MemberRole::Staff.rank());
    }

    #[test]
    fn at_least_compares_by_rank() {
        assert!(MemberRole::Owner.at_least(MemberRole::Admin));
        assert!(MemberRole::Admin.at_least(MemberRole::Admin));
        assert!(!MemberRole::Clinician.at_least(MemberRole::Admin));
        assert!(MemberRole::Staff.at_least(MemberRole::Staff));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&MemberRole::Clinician).unwrap();
        assert_eq!(json, "\"clinician\"");
    }

    #[test]
    fn owner_constructor_assigns_owner_role() {
        let clinic_id = ClinicId::new();
        let user_id = UserId::new("user-1").unwrap();
        let member = ClinicMember::owner(clinic_id, user_id, "owner@example.com");
        assert_eq!(member.role, MemberRole::Owner);
        assert_eq!(member.clinic_id, clinic_id);
    }
}
