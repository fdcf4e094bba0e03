//! HTTP DTOs for clinic endpoints.

use serde::{Deserialize, Serialize};

use super::super::billing::dto::SubscriptionResponse;
use crate::domain::clinic::{Clinic, ClinicMember, MemberRole};

/// Request to create a clinic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClinicRequest {
    /// Display name of the practice.
    pub name: String,
    /// Contact address for the practice itself.
    pub email: String,
}

/// Request to add a member to a clinic.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    /// Identity-provider subject of the new member.
    pub user_id: String,
    pub role: MemberRole,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A clinic as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ClinicResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timezone: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Clinic> for ClinicResponse {
    fn from(clinic: Clinic) -> Self {
        Self {
            id: clinic.id.to_string(),
            name: clinic.name,
            email: clinic.email,
            phone: clinic.phone,
            address: clinic.address,
            timezone: clinic.timezone,
            created_at: clinic.created_at.as_datetime().to_rfc3339(),
            updated_at: clinic.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// A clinic member as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub clinic_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub display_name: Option<String>,
    pub email: String,
    pub joined_at: String,
}

impl From<ClinicMember> for MemberResponse {
    fn from(member: ClinicMember) -> Self {
        Self {
            clinic_id: member.clinic_id.to_string(),
            user_id: member.user_id.to_string(),
            role: member.role,
            display_name: member.display_name,
            email: member.email,
            joined_at: member.joined_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for clinic creation: the clinic, its owner membership, and
/// the free subscription provisioned alongside.
#[derive(Debug, Clone, Serialize)]
pub struct CreateClinicResponse {
    pub clinic: ClinicResponse,
    pub owner: MemberResponse,
    pub subscription: SubscriptionResponse,
}

/// Response for the member listing.
#[derive(Debug, Clone, Serialize)]
pub struct MembersResponse {
    pub members: Vec<MemberResponse>,
}

/// One clinic in the caller's clinic listing, with their role in it.
#[derive(Debug, Clone, Serialize)]
pub struct ClinicWithRoleResponse {
    pub clinic: ClinicResponse,
    pub role: MemberRole,
}

/// Response listing the clinics the caller belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct MyClinicsResponse {
    pub clinics: Vec<ClinicWithRoleResponse>,
}
