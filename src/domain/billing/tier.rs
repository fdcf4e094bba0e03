//! Plan tier definitions.
//!
//! Represents the subscription tier levels offered to clinics.

use serde::{Deserialize, Serialize};

/// Subscription plan tier.
///
/// Determines feature access, client limits, and pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier - small practices and evaluation.
    /// - 10 clients
    /// - No admin reports or AI assistant
    Free,

    /// Professional tier.
    /// - 100 clients
    /// - Admin reports, AI assistant, email invoicing
    Professional,

    /// Enterprise tier.
    /// - Unlimited clients
    /// - Everything in Professional
    Enterprise,
}

impl PlanTier {
    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Professional => "Professional",
            PlanTier::Enterprise => "Enterprise",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more features. Used for upgrade validation.
    pub fn rank(&self) -> u8 {
        match self {
            PlanTier::Free => 0,
            PlanTier::Professional => 1,
            PlanTier::Enterprise => 2,
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_is_not_paid() {
        assert!(!PlanTier::Free.is_paid());
    }

    #[test]
    fn professional_tier_is_paid() {
        assert!(PlanTier::Professional.is_paid());
    }

    #[test]
    fn enterprise_tier_is_paid() {
        assert!(PlanTier::Enterprise.is_paid());
    }

    #[test]
    fn display_names_are_correct() {
        assert_eq!(PlanTier::Free.display_name(), "Free");
        assert_eq!(PlanTier::Professional.display_name(), "Professional");
        assert_eq!(PlanTier::Enterprise.display_name(), "Enterprise");
    }

    #[test]
    fn tier_serializes_lowercase() {
        let tier = PlanTier::Professional;
        let json = serde_json::to_string(&tier).unwrap();
        assert_eq!(json, "\"professional\"");
    }

    #[test]
    fn tier_deserializes_from_lowercase() {
        let tier: PlanTier = serde_json::from_str("\"enterprise\"").unwrap();
        assert_eq!(tier, PlanTier::Enterprise);
    }

    #[test]
    fn ranks_are_ordered() {
        assert!(PlanTier::Free.rank() < PlanTier::Professional.rank());
        assert!(PlanTier::Professional.rank() < PlanTier::Enterprise.rank());
    }
}
