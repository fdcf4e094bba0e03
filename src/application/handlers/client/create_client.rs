//! CreateClientHandler - Command handler for adding a client to a clinic.
//!
//! Creation is where the plan's client limit is enforced. The handler
//! resolves the clinic's effective plan first, downgrading an expired
//! trial along the way, so a lapsed clinic is measured against the
//! free plan's limit and not the one it trialed.

use std::sync::Arc;

use crate::domain::billing::PlanTier;
use crate::domain::client::{normalize_email, Client, ClientError};
use crate::domain::foundation::{ClinicId, ErrorCode, Timestamp};
use crate::ports::{ClientRepository, PlanRepository, SubscriptionRepository};

/// Command to add a client.
#[derive(Debug, Clone)]
pub struct CreateClientCommand {
    pub clinic_id: ClinicId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Result of successful client creation.
#[derive(Debug, Clone)]
pub struct CreateClientResult {
    pub client: Client,
    /// Slots left on the plan after this creation, `None` when the
    /// plan is unlimited.
    pub remaining_slots: Option<u32>,
}

/// Handler for client creation.
pub struct CreateClientHandler {
    clients: Arc<dyn ClientRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl CreateClientHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            clients,
            subscriptions,
            plans,
        }
    }

    pub async fn handle(&self, cmd: CreateClientCommand) -> Result<CreateClientResult, ClientError> {
        // 1. Resolve the clinic's subscription, provisioning the free
        //    default if the clinic predates provisioning-at-creation
        let free_plan = self.plans.find_by_tier(PlanTier::Free).await?;
        let mut subscription = self
            .subscriptions
            .ensure_default(&cmd.clinic_id, &free_plan.id)
            .await?;

        // 2. An expired trial downgrades before the limit is measured
        let now = Timestamp::now();
        if subscription.is_trial_expired(now) {
            subscription.expire_trial(free_plan.id, now)?;
            self.subscriptions.update(&subscription).await?;
        }

        // 3. Load the effective plan
        let plan = self
            .plans
            .find_by_id(&subscription.plan_id)
            .await?
            .unwrap_or(free_plan);

        // 4. Enforce the client limit against non-inactive clients
        let current = self.clients.count_non_inactive(&cmd.clinic_id).await?;
        if plan.client_limit_reached(current) {
            return Err(ClientError::limit_reached(plan.client_limit, current));
        }

        // 5. Refuse duplicate emails up front
        let email = normalize_email(cmd.email);
        if self
            .clients
            .find_by_email(&cmd.clinic_id, &email)
            .await?
            .is_some()
        {
            return Err(ClientError::duplicate_email(cmd.clinic_id, email));
        }

        // 6. Create the aggregate
        let mut client = Client::create(cmd.clinic_id, cmd.first_name, cmd.last_name, email)
            .map_err(|e| ClientError::validation(e.field(), e.to_string()))?;
        client
            .update_details(None, None, cmd.phone, cmd.notes)
            .map_err(|e| ClientError::validation(e.field(), e.to_string()))?;

        // 7. Persist, letting the unique constraint catch races
        if let Err(err) = self.clients.save(&client).await {
            if err.code == ErrorCode::DuplicateEmail {
                return Err(ClientError::duplicate_email(
                    cmd.clinic_id,
                    client.email.clone(),
                ));
            }
            return Err(err.into());
        }

        let remaining_slots = plan.remaining_client_slots(current + 1);
        Ok(CreateClientResult {
            client,
            remaining_slots,
        })
    }
}
