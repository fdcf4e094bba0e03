//! CheckSubscriptionStatusHandler - the subscription status gate.
//!
//! Every status check guarantees two things. A clinic without a
//! subscription row gets the free-plan default, provisioned through an
//! idempotent upsert so concurrent first checks converge on one row.
//! A trialing subscription whose window has passed is downgraded to
//! the free plan before it is reported, so callers never see a stale
//! trial.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Plan, PlanTier, Subscription};
use crate::domain::foundation::{ClinicId, Timestamp};
use crate::ports::{PlanRepository, SubscriptionRepository};

/// Query for a clinic's current subscription.
#[derive(Debug, Clone)]
pub struct CheckSubscriptionStatusQuery {
    pub clinic_id: ClinicId,
}

/// The clinic's effective subscription and plan.
#[derive(Debug, Clone)]
pub struct SubscriptionStatusResult {
    pub subscription: Subscription,
    pub plan: Plan,
}

/// Handler for the subscription status check.
pub struct CheckSubscriptionStatusHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl CheckSubscriptionStatusHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            subscriptions,
            plans,
        }
    }

    pub async fn handle(
        &self,
        query: CheckSubscriptionStatusQuery,
    ) -> Result<SubscriptionStatusResult, BillingError> {
        // 1. Provision the free default if the clinic has no row yet
        let free_plan = self.plans.find_by_tier(PlanTier::Free).await?;
        let mut subscription = self
            .subscriptions
            .ensure_default(&query.clinic_id, &free_plan.id)
            .await?;

        // 2. Downgrade a lapsed trial before reporting
        let now = Timestamp::now();
        if subscription.is_trial_expired(now) {
            subscription.expire_trial(free_plan.id, now)?;
            self.subscriptions.update(&subscription).await?;
        }

        // 3. Resolve the effective plan
        let plan = self
            .plans
            .find_by_id(&subscription.plan_id)
            .await?
            .unwrap_or(free_plan);

        Ok(SubscriptionStatusResult { subscription, plan })
    }
}
