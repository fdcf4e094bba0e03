//! ListMyClinicsHandler - Query handler for the caller's clinics.

use std::sync::Arc;

use crate::domain::clinic::{Clinic, ClinicError, MemberRole};
use crate::domain::foundation::UserId;
use crate::ports::{ClinicRepository, MemberRepository};

/// Query for every clinic the caller belongs to.
#[derive(Debug, Clone)]
pub struct ListMyClinicsQuery {
    pub user_id: UserId,
}

/// One clinic with the caller's role in it.
#[derive(Debug, Clone)]
pub struct ClinicWithRole {
    pub clinic: Clinic,
    pub role: MemberRole,
}

/// Result listing the caller's clinics.
#[derive(Debug, Clone)]
pub struct ListMyClinicsResult {
    pub clinics: Vec<ClinicWithRole>,
}

/// Handler for listing the caller's clinics.
pub struct ListMyClinicsHandler {
    clinics: Arc<dyn ClinicRepository>,
    members: Arc<dyn MemberRepository>,
}

impl ListMyClinicsHandler {
    pub fn new(clinics: Arc<dyn ClinicRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { clinics, members }
    }

    pub async fn handle(
        &self,
        query: ListMyClinicsQuery,
    ) -> Result<ListMyClinicsResult, ClinicError> {
        // 1. Resolve memberships
        let memberships = self.members.list_for_user(&query.user_id).await?;

        // 2. Load each clinic, skipping rows whose clinic has gone away
        let mut clinics = Vec::with_capacity(memberships.len());
        for membership in memberships {
            if let Some(clinic) = self.clinics.find_by_id(&membership.clinic_id).await? {
                clinics.push(ClinicWithRole {
                    clinic,
                    role: membership.role,
                });
            }
        }

        Ok(ListMyClinicsResult { clinics })
    }
}
