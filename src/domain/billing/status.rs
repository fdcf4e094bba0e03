//! Subscription status state machine.
//!
//! Defines all possible subscription states and valid transitions
//! according to the billing lifecycle.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Clinic subscription status.
///
/// Represents the current state of a clinic's subscription in the
/// billing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Fully provisioned subscription with complete access.
    Active,

    /// Time-boxed trial of a paid plan. Reverts to the free plan
    /// (with Active status) once the trial end passes.
    Trialing,

    /// Payment failed but within grace period.
    /// Clinic retains access during retry attempts.
    PastDue,

    /// Clinic requested cancellation.
    /// Access continues until period end.
    Cancelled,

    /// Subscription ended. No access.
    /// Clinic must resubscribe to regain access.
    Inactive,
}

impl SubscriptionStatus {
    /// Returns true if this status grants access to plan features.
    ///
    /// Access is granted for:
    /// - Active: fully provisioned
    /// - Trialing: within the trial window
    /// - PastDue: grace period during payment retry
    /// - Cancelled: until period end
    ///
    /// Access is denied for:
    /// - Inactive: subscription ended
    pub fn has_access(&self) -> bool {
        !matches!(self, SubscriptionStatus::Inactive)
    }

    /// Canonical storage form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "trialing" => Ok(SubscriptionStatus::Trialing),
            "past_due" => Ok(SubscriptionStatus::PastDue),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            "inactive" => Ok(SubscriptionStatus::Inactive),
            other => Err(format!("unknown subscription status: {}", other)),
        }
    }
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            // From ACTIVE
            (Active, Trialing)
                | (Active, PastDue)
                | (Active, Cancelled)
                | (Active, Inactive)
                | (Active, Active) // Renewal / plan change
            // From TRIALING
                | (Trialing, Active) // Conversion or trial-expiry downgrade
                | (Trialing, PastDue)
                | (Trialing, Cancelled)
            // From PAST_DUE
                | (PastDue, Active)
                | (PastDue, Cancelled)
                | (PastDue, Inactive)
            // From CANCELLED
                | (Cancelled, Active)
                | (Cancelled, Inactive)
            // From INACTIVE
                | (Inactive, Active) // Resubscribe
                | (Inactive, Trialing)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            Active => vec![Trialing, PastDue, Cancelled, Inactive, Active],
            Trialing => vec![Active, PastDue, Cancelled],
            PastDue => vec![Active, Cancelled, Inactive],
            Cancelled => vec![Active, Inactive],
            Inactive => vec![Active, Trialing],
        }
    }
}
