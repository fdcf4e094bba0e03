//! DraftClientEmailHandler - asks the model to draft an email to a
//! specific client on the staff member's instructions.
//!
//! The reply is post-processed into a subject and body; the draft is
//! returned for review, never sent from here.

use std::sync::Arc;

use crate::domain::assistant::{parse_email_draft, ChatMessage, EmailDraft, ASSISTANT_PERSONA};
use crate::domain::billing::PlanTier;
use crate::domain::foundation::{
    ClientId, ClinicId, DomainError, ErrorCode, Timestamp, ValidationError,
};
use crate::ports::{
    AssistantProvider, ClientRepository, ClinicRepository, PlanRepository, SubscriptionRepository,
};

/// Command to draft an email to a client.
#[derive(Debug, Clone)]
pub struct DraftClientEmailCommand {
    pub clinic_id: ClinicId,
    pub client_id: ClientId,
    /// What the staff member wants the email to say.
    pub instructions: String,
}

/// The draft and the address it would go to.
#[derive(Debug, Clone)]
pub struct DraftClientEmailResult {
    pub draft: EmailDraft,
    pub client_email: String,
}

/// Handler for client email drafting.
pub struct DraftClientEmailHandler {
    provider: Arc<dyn AssistantProvider>,
    clinics: Arc<dyn ClinicRepository>,
    clients: Arc<dyn ClientRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl DraftClientEmailHandler {
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        clinics: Arc<dyn ClinicRepository>,
        clients: Arc<dyn ClientRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            provider,
            clinics,
            clients,
            subscriptions,
            plans,
        }
    }

    pub async fn handle(
        &self,
        cmd: DraftClientEmailCommand,
    ) -> Result<DraftClientEmailResult, DomainError> {
        // 1. Without instructions there is nothing to draft
        if cmd.instructions.trim().is_empty() {
            return Err(ValidationError::empty_field("instructions").into());
        }

        // 2. Clinic and client, scoped to the clinic
        let clinic = self
            .clinics
            .find_by_id(&cmd.clinic_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ClinicNotFound, "Clinic not found"))?;
        let client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .filter(|c| c.clinic_id == cmd.clinic_id)
            .ok_or_else(|| DomainError::new(ErrorCode::ClientNotFound, "Client not found"))?;

        // 3. Drafting is a paid-plan feature. A lapsed trial no longer
        //    grants it, even before the downgrade lands.
        let now = Timestamp::now();
        let free_plan = self.plans.find_by_tier(PlanTier::Free).await?;
        let subscription = self
            .subscriptions
            .ensure_default(&cmd.clinic_id, &free_plan.id)
            .await?;
        let plan = if subscription.is_trial_expired(now) {
            free_plan
        } else {
            self.plans
                .find_by_id(&subscription.plan_id)
                .await?
                .unwrap_or(free_plan)
        };
        if !plan.features.ai_assistant {
            return Err(DomainError::new(
                ErrorCode::FeatureNotAvailable,
                "Your plan does not include the assistant",
            ));
        }

        // 4. One-shot prompt, no history
        let request = format!(
            "Draft an email from {} to their client {}.\n\
             Instructions from the staff member: {}\n\n\
             Start your reply with \"Subject:\" followed by the subject line, \
             then a blank line, then the email body.",
            clinic.name,
            client.full_name(),
            cmd.instructions,
        );
        let messages = vec![
            ChatMessage::system(ASSISTANT_PERSONA),
            ChatMessage::user(request),
        ];
        let reply = self.provider.complete(&messages).await?;

        Ok(DraftClientEmailResult {
            draft: parse_email_draft(&reply),
            client_email: client.email,
        })
    }
}
