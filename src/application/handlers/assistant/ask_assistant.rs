//! AskAssistantHandler - the conversational practice assistant.
//!
//! Builds a snapshot of the clinic's recent clients and upcoming
//! appointments, weaves it into the system prompt with the fixed
//! persona, replays the caller's history, and forwards the question to
//! the generative-text provider. Nothing is stored between calls; the
//! history the caller gets back is the history they sent plus the new
//! exchange.

use std::sync::Arc;

use crate::domain::assistant::{
    build_messages, AppointmentSnapshot, ChatMessage, ClientSnapshot, PromptContext,
    RECENT_CLIENT_COUNT, UPCOMING_APPOINTMENT_COUNT,
};
use crate::domain::billing::PlanTier;
use crate::domain::foundation::{
    ClinicId, DomainError, ErrorCode, Timestamp, ValidationError,
};
use crate::ports::{
    AppointmentRepository, AssistantProvider, ClientRepository, ClinicRepository, PlanRepository,
    ServiceTypeRepository, SubscriptionRepository,
};

/// Command to ask the assistant a question.
#[derive(Debug, Clone)]
pub struct AskAssistantCommand {
    pub clinic_id: ClinicId,
    pub question: String,
    /// Prior exchanges, oldest first. Echoed back extended.
    pub history: Vec<ChatMessage>,
}

/// The assistant's reply and the updated history.
#[derive(Debug, Clone)]
pub struct AskAssistantResult {
    pub reply: String,
    pub history: Vec<ChatMessage>,
}

/// Handler for assistant questions.
pub struct AskAssistantHandler {
    provider: Arc<dyn AssistantProvider>,
    clinics: Arc<dyn ClinicRepository>,
    clients: Arc<dyn ClientRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    service_types: Arc<dyn ServiceTypeRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl AskAssistantHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: Arc<dyn AssistantProvider>,
        clinics: Arc<dyn ClinicRepository>,
        clients: Arc<dyn ClientRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        service_types: Arc<dyn ServiceTypeRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            provider,
            clinics,
            clients,
            appointments,
            service_types,
            subscriptions,
            plans,
        }
    }

    pub async fn handle(&self, cmd: AskAssistantCommand) -> Result<AskAssistantResult, DomainError> {
        // 1. An empty question is a caller mistake, not a model call
        if cmd.question.trim().is_empty() {
            return Err(ValidationError::empty_field("question").into());
        }

        // 2. The clinic must exist before the plan is consulted
        let clinic = self
            .clinics
            .find_by_id(&cmd.clinic_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ClinicNotFound, "Clinic not found"))?;

        // 3. The assistant is a paid-plan feature. A lapsed trial no
        //    longer grants it, even before the downgrade lands.
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

        // 4. Snapshot the clinic for the system prompt
        let context = self.build_context(clinic.name, cmd.clinic_id, now).await?;

        // 5. Ask the model
        let messages = build_messages(&context, &cmd.history, &cmd.question);
        let reply = self.provider.complete(&messages).await?;

        // 6. Echo the history back, extended with the new exchange
        let mut history = cmd.history;
        history.push(ChatMessage::user(cmd.question));
        history.push(ChatMessage::assistant(reply.clone()));

        Ok(AskAssistantResult { reply, history })
    }

    async fn build_context(
        &self,
        clinic_name: String,
        clinic_id: ClinicId,
        now: Timestamp,
    ) -> Result<PromptContext, DomainError> {
        let clients = self
            .clients
            .list_recent(&clinic_id, RECENT_CLIENT_COUNT as u32)
            .await?;
        let client_snapshots = clients
            .iter()
            .map(|c| ClientSnapshot {
                name: c.full_name(),
                status: c.status.display_name().to_string(),
            })
            .collect();

        let upcoming = self
            .appointments
            .list_upcoming(&clinic_id, now, UPCOMING_APPOINTMENT_COUNT as u32)
            .await?;
        let mut appointment_snapshots = Vec::with_capacity(upcoming.len());
        for appointment in &upcoming {
            let client_name = match self.clients.find_by_id(&appointment.client_id).await? {
                Some(client) => client.full_name(),
                None => "Unknown client".to_string(),
            };
            let service_name = match self
                .service_types
                .find_by_id(&appointment.service_type_id)
                .await?
            {
                Some(service_type) => service_type.name,
                None => "Appointment".to_string(),
            };
            appointment_snapshots.push(AppointmentSnapshot {
                client_name,
                service_name,
                starts_at: appointment.starts_at,
            });
        }

        Ok(PromptContext {
            clinic_name,
            clients: client_snapshots,
            appointments: appointment_snapshots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockAppointmentRepository, MockAssistantProvider, MockClientRepository,
        MockClinicRepository, MockPlanRepository, MockServiceTypeRepository,
        MockSubscriptionRepository,
    };
    use crate::domain::assistant::ChatRole;
    use crate::domain::billing::Subscription;
    use crate::domain::client::Client;
    use crate::domain::clinic::Clinic;
    use crate::domain::foundation::UserId;
    use crate::domain::scheduling::{Appointment, ServiceType};

    struct Fixture {
        provider: Arc<MockAssistantProvider>,
        handler: AskAssistantHandler,
        clinic_id: ClinicId,
    }

    fn fixture(tier: PlanTier, reply: &str) -> Fixture {
        let clinic = Clinic::create("Riverside Therapy", "hello@riverside.example").unwrap();
        let clinic_id = clinic.id;
        let client = Client::create(clinic_id, "Avery", "Quinn", "avery@example.com").unwrap();
        let service_type = ServiceType::create(clinic_id, "Initial consult", 50, 120.0).unwrap();
        let appointment = Appointment::book(
            clinic_id,
            client.id,
            service_type.id,
            UserId::new("clinician-1").unwrap(),
            Timestamp::now().add_days(1),
            Timestamp::now().add_days(1).plus_secs(3000),
        )
        .unwrap();

        let plans = MockPlanRepository::seeded();
        let free = plans.plan_for(PlanTier::Free);
        let mut subscription = Subscription::create_free(clinic_id, free.id);
        if tier.is_paid() {
            let paid = plans.plan_for(tier);
            subscription.start_trial(paid.id, Timestamp::now()).unwrap();
            subscription.convert_trial("sub_test".to_string()).unwrap();
        }

        let provider = Arc::new(MockAssistantProvider::with_reply(reply));
        let handler = AskAssistantHandler::new(
            provider.clone(),
            Arc::new(MockClinicRepository::with_clinic(clinic)),
            Arc::new(MockClientRepository::with_clients(vec![client])),
            Arc::new(MockAppointmentRepository::with_appointment(appointment)),
            Arc::new(MockServiceTypeRepository::with_service_type(service_type)),
            Arc::new(MockSubscriptionRepository::with_subscription(subscription)),
            Arc::new(plans),
        );

        Fixture {
            provider,
            handler,
            clinic_id,
        }
    }

    #[tokio::test]
    async fn weaves_clinic_context_into_the_prompt() {
        let f = fixture(PlanTier::Professional, "Avery Quinn is booked tomorrow.");

        let result = f
            .handler
            .handle(AskAssistantCommand {
                clinic_id: f.clinic_id,
                question: "Who is booked tomorrow?".to_string(),
                history: Vec::new(),
            })
            .await
            .unwrap();

        assert_eq!(result.reply, "Avery Quinn is booked tomorrow.");

        let calls = f.provider.calls();
        assert_eq!(calls.len(), 1);
        let system = &calls[0][0];
        assert_eq!(system.role, ChatRole::System);
        assert!(system.content.contains("Riverside Therapy"));
        assert!(system.content.contains("Avery Quinn"));
        assert!(system.content.contains("Initial consult"));
        let last = calls[0].last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(last.content, "Who is booked tomorrow?");
    }

    #[tokio::test]
    async fn history_comes_back_extended() {
        let f = fixture(PlanTier::Professional, "Nothing on Friday.");
        let history = vec![
            ChatMessage::user("Who is booked tomorrow?"),
            ChatMessage::assistant("Avery Quinn at 10:00."),
        ];

        let result = f
            .handler
            .handle(AskAssistantCommand {
                clinic_id: f.clinic_id,
                question: "And Friday?".to_string(),
                history: history.clone(),
            })
            .await
            .unwrap();

        assert_eq!(result.history.len(), 4);
        assert_eq!(result.history[..2], history[..]);
        assert_eq!(result.history[3].content, "Nothing on Friday.");
        // system + two history turns + the new question
        assert_eq!(f.provider.calls()[0].len(), 4);
    }

    #[tokio::test]
    async fn free_plan_cannot_use_the_assistant() {
        let f = fixture(PlanTier::Free, "unused");

        let err = f
            .handler
            .handle(AskAssistantCommand {
                clinic_id: f.clinic_id,
                question: "Hello?".to_string(),
                history: Vec::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::FeatureNotAvailable);
        assert!(f.provider.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_question_never_reaches_the_model() {
        let f = fixture(PlanTier::Professional, "unused");

        let err = f
            .handler
            .handle(AskAssistantCommand {
                clinic_id: f.clinic_id,
                question: "   ".to_string(),
                history: Vec::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyField);
        assert!(f.provider.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_clinic_is_not_found() {
        let f = fixture(PlanTier::Professional, "unused");

        let err = f
            .handler
            .handle(AskAssistantCommand {
                clinic_id: ClinicId::new(),
                question: "Hello?".to_string(),
                history: Vec::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ClinicNotFound);
    }
}
