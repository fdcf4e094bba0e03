//! ListPlansHandler - Query handler for the plan catalog.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Plan};
use crate::ports::PlanRepository;

/// Result of a catalog listing, cheapest plan first.
#[derive(Debug, Clone)]
pub struct ListPlansResult {
    pub plans: Vec<Plan>,
}

/// Handler for listing the plan catalog.
pub struct ListPlansHandler {
    plans: Arc<dyn PlanRepository>,
}

impl ListPlansHandler {
    pub fn new(plans: Arc<dyn PlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self) -> Result<ListPlansResult, BillingError> {
        let plans = self.plans.list().await?;
        Ok(ListPlansResult { plans })
    }
}
