//! Plan catalog repository port.

use crate::domain::billing::{Plan, PlanTier};
use crate::domain::foundation::{DomainError, PlanId};
use async_trait::async_trait;

/// Repository port for the plan catalog.
///
/// Plans are seeded once and read often. `upsert` keys on tier so the
/// seed script can run repeatedly without duplicating rows.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Insert or refresh a plan, keyed on its tier.
    async fn upsert(&self, plan: &Plan) -> Result<(), DomainError>;

    /// Find a plan by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError>;

    /// Find the plan for a tier.
    ///
    /// # Errors
    ///
    /// - `PlanNotFound` if the tier has not been seeded
    async fn find_by_tier(&self, tier: PlanTier) -> Result<Plan, DomainError>;

    /// All plans, cheapest first.
    async fn list(&self) -> Result<Vec<Plan>, DomainError>;
}
