//! Subscription repository port.
//!
//! Each clinic has exactly one subscription row, backed by a unique
//! constraint on `clinic_id`. `ensure_default` leans on that
//! constraint so concurrent callers cannot create two rows.

use crate::domain::billing::Subscription;
use crate::domain::foundation::{ClinicId, DomainError, PlanId, SubscriptionId, Timestamp};
use async_trait::async_trait;

/// Repository port for Subscription aggregate persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Save a new subscription.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the clinic already has one
    /// - `DatabaseError` on persistence failure
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Update an existing subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if it doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Find by subscription ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Find the clinic's subscription.
    ///
    /// Returns `None` if the clinic has never been provisioned.
    async fn find_by_clinic(&self, clinic_id: &ClinicId)
        -> Result<Option<Subscription>, DomainError>;

    /// Find by the payment provider's subscription ID.
    async fn find_by_provider_id(
        &self,
        provider_subscription_id: &str,
    ) -> Result<Option<Subscription>, DomainError>;

    /// Idempotently guarantee the clinic has a subscription row.
    ///
    /// Inserts an active free subscription if and only if none exists,
    /// then returns whatever row now holds. Safe to call concurrently;
    /// the unique constraint on `clinic_id` resolves races.
    async fn ensure_default(
        &self,
        clinic_id: &ClinicId,
        free_plan_id: &PlanId,
    ) -> Result<Subscription, DomainError>;

    /// All trialing subscriptions whose trial ended before `now`.
    async fn find_expired_trials(&self, now: Timestamp)
        -> Result<Vec<Subscription>, DomainError>;
}
