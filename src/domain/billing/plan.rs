//! Plan catalog entity.
//!
//! A Plan is a priced tier in the catalog. Clinic subscriptions reference
//! exactly one plan. The client limit uses 0 as the unlimited sentinel so
//! the value survives storage and the API without an optional wrapper.

use crate::domain::foundation::{PlanId, Timestamp};
use serde::{Deserialize, Serialize};

use super::PlanTier;

/// Feature flags granted by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFeatures {
    /// Access to the admin reports overview.
    pub reports: bool,
    /// Access to the AI assistant.
    pub ai_assistant: bool,
    /// Emailing invoice links to clients.
    pub email_invoicing: bool,
}

/// A subscription plan in the catalog.
///
/// # Invariants
///
/// - `tier` is unique across the catalog
/// - `client_limit == 0` means unlimited
/// - `monthly_price` is non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Unique identifier for this plan.
    pub id: PlanId,

    /// Tier this plan belongs to.
    pub tier: PlanTier,

    /// Human-readable plan name.
    pub name: String,

    /// Monthly price in currency units.
    pub monthly_price: f64,

    /// Maximum non-inactive clients per clinic. 0 = unlimited.
    pub client_limit: u32,

    /// Feature flags.
    pub features: PlanFeatures,

    /// When the plan was created.
    pub created_at: Timestamp,

    /// When the plan was last updated.
    pub updated_at: Timestamp,
}

impl Plan {
    /// Builds the catalog plan for a tier with the standard configuration.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Price/mo | Clients | Reports | AI | Email |
    /// |------|----------|---------|---------|----|-------|
    /// | Free | 0 | 10 | No | No | No |
    /// | Professional | 49 | 100 | Yes | Yes | Yes |
    /// | Enterprise | 149 | Unlimited | Yes | Yes | Yes |
    pub fn for_tier(tier: PlanTier) -> Self {
        let now = Timestamp::now();
        let (name, monthly_price, client_limit, features) = match tier {
            PlanTier::Free => (
                "Free",
                0.0,
                10,
                PlanFeatures {
                    reports: false,
                    ai_assistant: false,
                    email_invoicing: false,
                },
            ),
            PlanTier::Professional => (
                "Professional",
                49.0,
                100,
                PlanFeatures {
                    reports: true,
                    ai_assistant: true,
                    email_invoicing: true,
                },
            ),
            PlanTier::Enterprise => (
                "Enterprise",
                149.0,
                0,
                PlanFeatures {
                    reports: true,
                    ai_assistant: true,
                    email_invoicing: true,
                },
            ),
        };

        Self {
            id: PlanId::new(),
            tier,
            name: name.to_string(),
            monthly_price,
            client_limit,
            features,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the full standard catalog (free, professional, enterprise).
    pub fn catalog() -> Vec<Self> {
        vec![
            Self::for_tier(PlanTier::Free),
            Self::for_tier(PlanTier::Professional),
            Self::for_tier(PlanTier::Enterprise),
        ]
    }

    /// Returns true if this plan places no limit on client count.
    pub fn allows_unlimited_clients(&self) -> bool {
        self.client_limit == 0
    }

    /// Check if the client limit has been reached.
    ///
    /// Returns false if unlimited or under limit. "Reached" means at or
    /// above the limit: a clinic at exactly the limit may not add another
    /// client.
    pub fn client_limit_reached(&self, current_clients: u32) -> bool {
        self.client_limit != 0 && current_clients >= self.client_limit
    }

    /// Remaining client slots, or None if unlimited.
    pub fn remaining_client_slots(&self, current_clients: u32) -> Option<u32> {
        if self.client_limit == 0 {
            None
        } else {
            Some(self.client_limit.saturating_sub(current_clients))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_has_ten_client_limit() {
        let plan = Plan::for_tier(PlanTier::Free);
        assert_eq!(plan.client_limit, 10);
        assert_eq!(plan.monthly_price, 0.0);
        assert!(!plan.features.reports);
        assert!(!plan.features.ai_assistant);
    }

    #[test]
    fn professional_plan_has_features() {
        let plan = Plan::for_tier(PlanTier::Professional);
        assert_eq!(plan.client_limit, 100);
        assert!(plan.features.reports);
        assert!(plan.features.ai_assistant);
        assert!(plan.features.email_invoicing);
    }

    #[test]
    fn enterprise_plan_is_unlimited() {
        let plan = Plan::for_tier(PlanTier::Enterprise);
        assert_eq!(plan.client_limit, 0);
        assert!(plan.allows_unlimited_clients());
        assert!(!plan.client_limit_reached(100_000));
    }

    #[test]
    fn limit_reached_at_exactly_the_limit() {
        let plan = Plan::for_tier(PlanTier::Free);
        assert!(!plan.client_limit_reached(9));
        assert!(plan.client_limit_reached(10));
        assert!(plan.client_limit_reached(11));
    }

    #[test]
    fn remaining_slots_counts_down() {
        let plan = Plan::for_tier(PlanTier::Free);
        assert_eq!(plan.remaining_client_slots(7), Some(3));
        assert_eq!(plan.remaining_client_slots(10), Some(0));
        assert_eq!(plan.remaining_client_slots(12), Some(0));
    }

    #[test]
    fn remaining_slots_none_when_unlimited() {
        let plan = Plan::for_tier(PlanTier::Enterprise);
        assert_eq!(plan.remaining_client_slots(500), None);
    }

    #[test]
    fn catalog_contains_all_three_tiers() {
        let catalog = Plan::catalog();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.iter().any(|p| p.tier == PlanTier::Free));
        assert!(catalog.iter().any(|p| p.tier == PlanTier::Professional));
        assert!(catalog.iter().any(|p| p.tier == PlanTier::Enterprise));
    }

    #[test]
    fn plan_serializes_features_camel_case() {
        let plan = Plan::for_tier(PlanTier::Professional);
        let json = serde_json::to_string(&plan.features).unwrap();
        assert!(json.contains("aiAssistant"));
        assert!(json.contains("emailInvoicing"));
    }
}
