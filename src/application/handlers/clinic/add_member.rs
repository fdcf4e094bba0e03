//! AddMemberHandler - Command handler for adding staff to a clinic.

use std::sync::Arc;

use crate::domain::clinic::{ClinicError, ClinicMember, MemberRole};
use crate::domain::foundation::{ClinicId, UserId};
use crate::ports::{ClinicRepository, MemberRepository};

/// Command to add a member to a clinic.
#[derive(Debug, Clone)]
pub struct AddMemberCommand {
    pub clinic_id: ClinicId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub email: String,
    pub display_name: Option<String>,
}

/// Result of adding a member.
#[derive(Debug, Clone)]
pub struct AddMemberResult {
    pub member: ClinicMember,
}

/// Handler for adding clinic members.
pub struct AddMemberHandler {
    clinics: Arc<dyn ClinicRepository>,
    members: Arc<dyn MemberRepository>,
}

impl AddMemberHandler {
    pub fn new(clinics: Arc<dyn ClinicRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { clinics, members }
    }

    pub async fn handle(&self, cmd: AddMemberCommand) -> Result<AddMemberResult, ClinicError> {
        // 1. The clinic must exist
        if !self.clinics.exists(&cmd.clinic_id).await? {
            return Err(ClinicError::not_found(cmd.clinic_id));
        }

        // 2. Refuse duplicates up front
        if self
            .members
            .find(&cmd.clinic_id, &cmd.user_id)
            .await?
            .is_some()
        {
            return Err(ClinicError::member_already_exists(
                cmd.clinic_id,
                cmd.user_id,
            ));
        }

        // 3. Persist the membership
        let member = ClinicMember::new(
            cmd.clinic_id,
            cmd.user_id,
            cmd.role,
            cmd.email,
            cmd.display_name,
        );
        self.members.save(&member).await?;

        Ok(AddMemberResult { member })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockClinicRepository, MockMemberRepository,
    };
    use crate::domain::clinic::Clinic;

    fn test_clinic() -> Clinic {
        Clinic::create("Riverside Therapy", "hello@riverside.example").unwrap()
    }

    fn test_command(clinic_id: ClinicId) -> AddMemberCommand {
        AddMemberCommand {
            clinic_id,
            user_id: UserId::new("clinician-1").unwrap(),
            role: MemberRole::Clinician,
            email: "clinician@example.com".to_string(),
            display_name: Some("Sam Okafor".to_string()),
        }
    }

    #[tokio::test]
    async fn adds_member_to_existing_clinic() {
        let clinic = test_clinic();
        let members = Arc::new(MockMemberRepository::new());
        let handler = AddMemberHandler::new(
            Arc::new(MockClinicRepository::with_clinic(clinic.clone())),
            members.clone(),
        );

        let result = handler.handle(test_command(clinic.id)).await.unwrap();
        assert_eq!(result.member.role, MemberRole::Clinician);
        assert_eq!(members.saved().len(), 1);
    }

    #[tokio::test]
    async fn rejects_unknown_clinic() {
        let handler = AddMemberHandler::new(
            Arc::new(MockClinicRepository::new()),
            Arc::new(MockMemberRepository::new()),
        );

        let result = handler.handle(test_command(ClinicId::new())).await;
        assert!(matches!(result, Err(ClinicError::NotFound(_))));
    }

    #[tokio::test]
    async fn rejects_duplicate_membership() {
        let clinic = test_clinic();
        let cmd = test_command(clinic.id);
        let existing = ClinicMember::new(
            cmd.clinic_id,
            cmd.user_id.clone(),
            MemberRole::Staff,
            "clinician@example.com",
            None,
        );

        let handler = AddMemberHandler::new(
            Arc::new(MockClinicRepository::with_clinic(clinic)),
            Arc::new(MockMemberRepository::with_member(existing)),
        );

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(ClinicError::MemberAlreadyExists { .. })));
    }
}
