//! ProcessExpiredTrialsHandler - the trial-expiry batch.
//!
//! Scans every trialing subscription whose window has passed and
//! downgrades each to the free plan. Failures are collected per clinic
//! and the batch keeps going, so one broken row cannot wedge the rest.
//! Running the batch twice in a row is safe: the second pass finds
//! nothing left to downgrade.

use std::sync::Arc;

use crate::domain::billing::{BillingError, PlanTier};
use crate::domain::clinic::MemberRole;
use crate::domain::foundation::{ClinicId, Timestamp};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::{
    MemberRepository, NotificationRepository, PlanRepository, SubscriptionRepository,
};

/// Outcome of one batch run.
#[derive(Debug, Clone, Default)]
pub struct ProcessExpiredTrialsResult {
    /// Subscriptions successfully downgraded to the free plan.
    pub processed: u32,
    /// Clinics whose downgrade failed, with the failure message.
    pub failed: Vec<(ClinicId, String)>,
}

impl ProcessExpiredTrialsResult {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Handler for the trial-expiry batch.
pub struct ProcessExpiredTrialsHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
    members: Arc<dyn MemberRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl ProcessExpiredTrialsHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
        members: Arc<dyn MemberRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            subscriptions,
            plans,
            members,
            notifications,
        }
    }

    pub async fn handle(&self) -> Result<ProcessExpiredTrialsResult, BillingError> {
        let now = Timestamp::now();
        let free_plan = self.plans.find_by_tier(PlanTier::Free).await?;
        let expired = self.subscriptions.find_expired_trials(now).await?;

        let mut result = ProcessExpiredTrialsResult::default();
        for mut subscription in expired {
            let clinic_id = subscription.clinic_id;
            let outcome = match subscription.expire_trial(free_plan.id, now) {
                Ok(()) => self.subscriptions.update(&subscription).await,
                Err(err) => Err(err),
            };

            match outcome {
                Ok(()) => {
                    result.processed += 1;
                    self.notify_owners(clinic_id).await;
                }
                Err(err) => result.failed.push((clinic_id, err.to_string())),
            }
        }

        Ok(result)
    }

    /// Tells the clinic's owners their trial ended. Best effort: the
    /// downgrade already happened, so a notification failure is not a
    /// batch failure.
    async fn notify_owners(&self, clinic_id: ClinicId) {
        let Ok(members) = self.members.list_for_clinic(&clinic_id).await else {
            return;
        };
        for member in members.into_iter().filter(|m| m.role == MemberRole::Owner) {
            let Ok(notification) = Notification::create(
                member.user_id,
                clinic_id,
                NotificationKind::Billing,
                "Your trial has ended",
                "Your clinic is back on the Free plan. Upgrade any time to keep the features you trialed.",
            ) else {
                continue;
            };
            let _ = self.notifications.save(&notification).await;
        }
    }
}
