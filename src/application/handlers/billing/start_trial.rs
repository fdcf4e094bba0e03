//! StartTrialHandler - Command handler for beginning a paid-plan trial.
//!
//! A clinic gets one trial, ever. `trial_start` doubles as the
//! used-a-trial marker because expiry keeps the dates around.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Plan, PlanTier, Subscription};
use crate::domain::foundation::{ClinicId, ErrorCode, Timestamp};
use crate::ports::{PlanRepository, SubscriptionRepository};

/// Command to start a trial of a paid tier.
#[derive(Debug, Clone)]
pub struct StartTrialCommand {
    pub clinic_id: ClinicId,
    pub tier: PlanTier,
}

/// Result of starting a trial.
#[derive(Debug, Clone)]
pub struct StartTrialResult {
    pub subscription: Subscription,
    pub plan: Plan,
}

/// Handler for starting trials.
pub struct StartTrialHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl StartTrialHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            subscriptions,
            plans,
        }
    }

    pub async fn handle(&self, cmd: StartTrialCommand) -> Result<StartTrialResult, BillingError> {
        // 1. Only paid tiers can be trialed
        if !cmd.tier.is_paid() {
            return Err(BillingError::trial_not_allowed(
                "the free plan cannot be trialed",
            ));
        }
        let plan = match self.plans.find_by_tier(cmd.tier).await {
            Ok(plan) => plan,
            Err(err) if err.code == ErrorCode::PlanNotFound => {
                return Err(BillingError::plan_not_found(cmd.tier.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        // 2. Resolve the subscription, provisioning the default if needed
        let free_plan = self.plans.find_by_tier(PlanTier::Free).await?;
        let mut subscription = self
            .subscriptions
            .ensure_default(&cmd.clinic_id, &free_plan.id)
            .await?;

        // 3. One trial per clinic
        if subscription.had_trial() {
            return Err(BillingError::trial_not_allowed(
                "this clinic has already used its trial",
            ));
        }

        // 4. Open the trial window and persist
        subscription
            .start_trial(plan.id, Timestamp::now())
            .map_err(|e| {
                BillingError::invalid_state(subscription.status.to_string(), e.to_string())
            })?;
        self.subscriptions.update(&subscription).await?;

        Ok(StartTrialResult { subscription, plan })
    }
}
