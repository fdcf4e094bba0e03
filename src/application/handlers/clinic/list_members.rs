//! ListMembersHandler - Query handler for a clinic's staff roster.

use std::sync::Arc;

use crate::domain::clinic::{ClinicError, ClinicMember};
use crate::domain::foundation::ClinicId;
use crate::ports::{ClinicRepository, MemberRepository};

/// Query for a clinic's members.
#[derive(Debug, Clone)]
pub struct ListMembersQuery {
    pub clinic_id: ClinicId,
}

/// Result listing a clinic's members.
#[derive(Debug, Clone)]
pub struct ListMembersResult {
    pub members: Vec<ClinicMember>,
}

/// Handler for listing clinic members.
pub struct ListMembersHandler {
    clinics: Arc<dyn ClinicRepository>,
    members: Arc<dyn MemberRepository>,
}

impl ListMembersHandler {
    pub fn new(clinics: Arc<dyn ClinicRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { clinics, members }
    }

    pub async fn handle(&self, query: ListMembersQuery) -> Result<ListMembersResult, ClinicError> {
        if !self.clinics.exists(&query.clinic_id).await? {
            return Err(ClinicError::not_found(query.clinic_id));
        }

        let members = self.members.list_for_clinic(&query.clinic_id).await?;
        Ok(ListMembersResult { members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockClinicRepository, MockMemberRepository,
    };
    use crate::domain::clinic::{Clinic, MemberRole};
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn lists_roster_for_existing_clinic() {
        let clinic = Clinic::create("Riverside Therapy", "hello@riverside.example").unwrap();
        let member = ClinicMember::new(
            clinic.id,
            UserId::new("user-1").unwrap(),
            MemberRole::Admin,
            "admin@example.com",
            None,
        );

        let handler = ListMembersHandler::new(
            Arc::new(MockClinicRepository::with_clinic(clinic.clone())),
            Arc::new(MockMemberRepository::with_member(member)),
        );

        let result = handler
            .handle(ListMembersQuery {
                clinic_id: clinic.id,
            })
            .await
            .unwrap();
        assert_eq!(result.members.len(), 1);
        assert_eq!(result.members[0].role, MemberRole::Admin);
    }

    #[tokio::test]
    async fn unknown_clinic_is_not_found() {
        let handler = ListMembersHandler::new(
            Arc::new(MockClinicRepository::new()),
            Arc::new(MockMemberRepository::new()),
        );

        let result = handler
            .handle(ListMembersQuery {
                clinic_id: ClinicId::new(),
            })
            .await;
        assert!(matches!(result, Err(ClinicError::NotFound(_))));
    }
}
