//! CreateClinicHandler - Command handler for registering a clinic.
//!
//! Creating a clinic provisions everything a tenant needs in one go:
//! the clinic itself, an owner membership for the caller, and an
//! active free subscription. Provisioning the subscription here, at
//! creation time, is what keeps the status check path read-mostly.

use std::sync::Arc;

use crate::domain::billing::{PlanTier, Subscription};
use crate::domain::clinic::{Clinic, ClinicError, ClinicMember, MemberRole};
use crate::domain::foundation::UserId;
use crate::ports::{ClinicRepository, MemberRepository, PlanRepository, SubscriptionRepository};

/// Command to register a new clinic.
#[derive(Debug, Clone)]
pub struct CreateClinicCommand {
    pub owner_id: UserId,
    pub owner_email: String,
    pub owner_display_name: Option<String>,
    pub name: String,
    pub email: String,
}

/// Result of successful clinic registration.
#[derive(Debug, Clone)]
pub struct CreateClinicResult {
    pub clinic: Clinic,
    pub owner: ClinicMember,
    pub subscription: Subscription,
}

/// Handler for clinic registration.
pub struct CreateClinicHandler {
    clinics: Arc<dyn ClinicRepository>,
    members: Arc<dyn MemberRepository>,
    plans: Arc<dyn PlanRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl CreateClinicHandler {
    pub fn new(
        clinics: Arc<dyn ClinicRepository>,
        members: Arc<dyn MemberRepository>,
        plans: Arc<dyn PlanRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            clinics,
            members,
            plans,
            subscriptions,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateClinicCommand,
    ) -> Result<CreateClinicResult, ClinicError> {
        // 1. Create the clinic aggregate
        let clinic = Clinic::create(cmd.name, cmd.email)
            .map_err(|e| ClinicError::validation(e.field(), e.to_string()))?;

        // 2. Persist the clinic
        self.clinics.save(&clinic).await?;

        // 3. The caller becomes the owner
        let owner = ClinicMember::new(
            clinic.id,
            cmd.owner_id,
            MemberRole::Owner,
            cmd.owner_email,
            cmd.owner_display_name,
        );
        self.members.save(&owner).await?;

        // 4. Provision the free subscription up front
        let free_plan = self.plans.find_by_tier(PlanTier::Free).await?;
        let subscription = Subscription::create_free(clinic.id, free_plan.id);
        self.subscriptions.save(&subscription).await?;

        Ok(CreateClinicResult {
            clinic,
            owner,
            subscription,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockClinicRepository, MockMemberRepository, MockPlanRepository, MockSubscriptionRepository,
    };
    use crate::domain::billing::SubscriptionStatus;

    fn test_command() -> CreateClinicCommand {
        CreateClinicCommand {
            owner_id: UserId::new("owner-1").unwrap(),
            owner_email: "owner@example.com".to_string(),
            owner_display_name: Some("Dana Reyes".to_string()),
            name: "Riverside Therapy".to_string(),
            email: "hello@riverside.example".to_string(),
        }
    }

    fn handler_with(
        clinics: Arc<MockClinicRepository>,
        members: Arc<MockMemberRepository>,
        plans: Arc<MockPlanRepository>,
        subscriptions: Arc<MockSubscriptionRepository>,
    ) -> CreateClinicHandler {
        CreateClinicHandler::new(clinics, members, plans, subscriptions)
    }

    #[tokio::test]
    async fn creates_clinic_with_owner_and_free_subscription() {
        let clinics = Arc::new(MockClinicRepository::new());
        let members = Arc::new(MockMemberRepository::new());
        let plans = Arc::new(MockPlanRepository::seeded());
        let subscriptions = Arc::new(MockSubscriptionRepository::new());

        let handler = handler_with(
            clinics.clone(),
            members.clone(),
            plans,
            subscriptions.clone(),
        );
        let result = handler.handle(test_command()).await.unwrap();

        assert_eq!(result.clinic.name, "Riverside Therapy");
        assert_eq!(result.owner.role, MemberRole::Owner);
        assert_eq!(result.subscription.status, SubscriptionStatus::Active);
        assert_eq!(result.subscription.clinic_id, result.clinic.id);

        assert_eq!(clinics.saved().len(), 1);
        assert_eq!(members.saved().len(), 1);
        assert_eq!(subscriptions.saved().len(), 1);
    }

    #[tokio::test]
    async fn owner_membership_carries_caller_identity() {
        let handler = handler_with(
            Arc::new(MockClinicRepository::new()),
            Arc::new(MockMemberRepository::new()),
            Arc::new(MockPlanRepository::seeded()),
            Arc::new(MockSubscriptionRepository::new()),
        );

        let result = handler.handle(test_command()).await.unwrap();
        assert_eq!(result.owner.email, "owner@example.com");
        assert_eq!(result.owner.display_name.as_deref(), Some("Dana Reyes"));
    }

    #[tokio::test]
    async fn rejects_invalid_clinic_email() {
        let handler = handler_with(
            Arc::new(MockClinicRepository::new()),
            Arc::new(MockMemberRepository::new()),
            Arc::new(MockPlanRepository::seeded()),
            Arc::new(MockSubscriptionRepository::new()),
        );

        let mut cmd = test_command();
        cmd.email = "not-an-email".to_string();
        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(ClinicError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn fails_when_free_plan_not_seeded() {
        let clinics = Arc::new(MockClinicRepository::new());
        let subscriptions = Arc::new(MockSubscriptionRepository::new());
        let handler = handler_with(
            clinics,
            Arc::new(MockMemberRepository::new()),
            Arc::new(MockPlanRepository::empty()),
            subscriptions.clone(),
        );

        let result = handler.handle(test_command()).await;
        assert!(matches!(result, Err(ClinicError::Infrastructure(_))));
        assert!(subscriptions.saved().is_empty());
    }

    #[tokio::test]
    async fn fails_when_clinic_save_fails() {
        let members = Arc::new(MockMemberRepository::new());
        let handler = handler_with(
            Arc::new(MockClinicRepository::failing()),
            members.clone(),
            Arc::new(MockPlanRepository::seeded()),
            Arc::new(MockSubscriptionRepository::new()),
        );

        let result = handler.handle(test_command()).await;
        assert!(result.is_err());
        assert!(members.saved().is_empty());
    }
}
