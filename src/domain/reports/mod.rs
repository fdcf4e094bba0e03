//! Reports domain: read-only aggregate views.
//!
//! Nothing here persists. The aggregator reads grouped counts and sums
//! from storage, derives percentages, and scores platform health from
//! weighted bonus and penalty rules. Recomputed on every call.

mod health;
mod overview;

pub use health::{
    compute_health, HealthFactor, HealthInputs, HealthReport, BASE_SCORE, CANCELLED_WEIGHT,
    CONVERSION_WEIGHT, PAST_DUE_WEIGHT, PAYING_SHARE_WEIGHT, STALE_TRIAL_PENALTY,
};
pub use overview::{
    percentage, ClientUsage, PlanCount, ReportsOverview, RevenueSummary, StatusCount,
    SubscriptionBreakdown, TrialConversion,
};
