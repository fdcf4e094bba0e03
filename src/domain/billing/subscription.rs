//! Subscription aggregate entity.
//!
//! The Subscription aggregate represents a clinic's current plan assignment
//! and billing status. Each clinic has exactly one Subscription.
//!
//! # Design Decisions
//!
//! - **One per clinic**: Unique constraint on clinic_id enforced at database
//!   level; the repository's ensure path upserts against it so concurrent
//!   first-time status checks converge on a single row
//! - **Trials are windows, not plans**: a trial references the paid plan it
//!   samples; expiry reassigns the free plan and returns to Active
//! - **Trial dates are history**: expiry keeps trial_start/trial_end so
//!   conversion reporting can see that a trial happened

use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, PlanId, SubscriptionId, Timestamp};
use serde::{Deserialize, Serialize};

use super::SubscriptionStatus;

/// Number of days a trial runs before reverting to the free plan.
pub const TRIAL_LENGTH_DAYS: i64 = 14;

/// Subscription aggregate - a clinic's plan assignment and billing status.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `clinic_id` is unique (one subscription per clinic)
/// - Status transitions follow state machine rules
/// - `Trialing` status implies `trial_start` and `trial_end` are set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier for this subscription.
    pub id: SubscriptionId,

    /// Clinic that owns this subscription.
    pub clinic_id: ClinicId,

    /// Plan currently assigned.
    pub plan_id: PlanId,

    /// Current status in the billing lifecycle.
    pub status: SubscriptionStatus,

    /// When the current trial started (if a trial was ever started).
    pub trial_start: Option<Timestamp>,

    /// When the current trial ends (if a trial was ever started).
    pub trial_end: Option<Timestamp>,

    /// Stripe customer ID (for paid billing).
    pub stripe_customer_id: Option<String>,

    /// Stripe subscription ID (for paid billing).
    pub stripe_subscription_id: Option<String>,

    /// When the subscription was created.
    pub created_at: Timestamp,

    /// When the subscription was last updated.
    pub updated_at: Timestamp,

    /// When the subscription was cancelled (if cancelled).
    pub cancelled_at: Option<Timestamp>,
}

impl Subscription {
    /// Create the default free-plan subscription for a clinic.
    ///
    /// Free subscriptions are immediately Active. This is the row
    /// provisioned at clinic creation and by the ensure path of the
    /// status check.
    pub fn create_free(clinic_id: ClinicId, free_plan_id: PlanId) -> Self {
        let now = Timestamp::now();
        Self {
            id: SubscriptionId::new(),
            clinic_id,
            plan_id: free_plan_id,
            status: SubscriptionStatus::Active,
            trial_start: None,
            trial_end: None,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    /// Begin a trial of a paid plan.
    ///
    /// The trial window is `TRIAL_LENGTH_DAYS` from `now`.
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn start_trial(&mut self, paid_plan_id: PlanId, now: Timestamp) -> Result<(), DomainError> {
        self.transition_to(SubscriptionStatus::Trialing)?;
        self.plan_id = paid_plan_id;
        self.trial_start = Some(now);
        self.trial_end = Some(now.add_days(TRIAL_LENGTH_DAYS));
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// True if this subscription is trialing and the trial window has passed.
    pub fn is_trial_expired(&self, now: Timestamp) -> bool {
        self.status == SubscriptionStatus::Trialing
            && self.trial_end.is_some_and(|end| end.is_before(&now))
    }

    /// Downgrade an expired trial to the free plan with Active status.
    ///
    /// Trial dates are retained for conversion reporting.
    ///
    /// # Errors
    ///
    /// Returns error if the subscription is not trialing or the trial
    /// window has not yet passed.
    pub fn expire_trial(&mut self, free_plan_id: PlanId, now: Timestamp) -> Result<(), DomainError> {
        if !self.is_trial_expired(now) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot expire trial for subscription {} in {:?} status",
                    self.id, self.status
                ),
            ));
        }

        self.transition_to(SubscriptionStatus::Active)?;
        self.plan_id = free_plan_id;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Convert an in-progress trial to a paid subscription on the same plan.
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn convert_trial(&mut self, stripe_subscription_id: String) -> Result<(), DomainError> {
        self.transition_to(SubscriptionStatus::Active)?;
        self.stripe_subscription_id = Some(stripe_subscription_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark payment as past due (failed but in grace period).
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn mark_past_due(&mut self) -> Result<(), DomainError> {
        self.transition_to(SubscriptionStatus::PastDue)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Recover from past due status after successful payment.
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn recover_payment(&mut self) -> Result<(), DomainError> {
        self.transition_to(SubscriptionStatus::Active)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancel this subscription (effective at period end).
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition_to(SubscriptionStatus::Cancelled)?;
        self.cancelled_at = Some(Timestamp::now());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark this subscription as inactive.
    ///
    /// # Errors
    ///
    /// Returns error if transition from current status is not allowed.
    pub fn deactivate(&mut self) -> Result<(), DomainError> {
        self.transition_to(SubscriptionStatus::Inactive)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Attach billing provider identifiers.
    pub fn attach_stripe_customer(&mut self, customer_id: String) {
        self.stripe_customer_id = Some(customer_id);
        self.updated_at = Timestamp::now();
    }

    /// True if a trial was ever started on this subscription.
    pub fn had_trial(&self) -> bool {
        self.trial_start.is_some()
    }

    /// Transition to a new status using the state machine.
    fn transition_to(&mut self, target: SubscriptionStatus) -> Result<(), DomainError> {
        use crate::domain::foundation::StateMachine;

        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition subscription from {:?} to {:?}",
                    self.status, target
                ),
            )
        })?;
        Ok(())
    }
}
