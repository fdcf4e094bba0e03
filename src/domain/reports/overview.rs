use serde::Serialize;

use crate::domain::billing::{PlanTier, SubscriptionStatus};
use crate::domain::foundation::Timestamp;

use super::HealthReport;

/// The admin reports overview - aggregates platform-wide data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsOverview {
    /// Subscription counts
    pub subscriptions: SubscriptionBreakdown,

    /// How full clinics are against their plan limits
    pub client_usage: ClientUsage,

    /// Trial funnel
    pub trials: TrialConversion,

    /// Revenue
    pub revenue: RevenueSummary,

    /// Heuristic platform health
    pub health: HealthReport,

    pub generated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionBreakdown {
    pub total: u64,
    pub by_status: Vec<StatusCount>,
    pub by_plan: Vec<PlanCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: SubscriptionStatus,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCount {
    pub tier: PlanTier,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUsage {
    pub total_clinics: u64,
    /// Clients counting toward limits across all clinics
    pub total_active_clients: u64,
    /// Mean usage across limited clinics, 0-100
    pub average_usage_percent: f64,
    /// Clinics at 80% or more of their limit
    pub clinics_near_limit: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialConversion {
    pub trials_started: u64,
    pub trials_converted: u64,
    /// 0-100, zero when no trials have started
    pub conversion_rate_percent: f64,
    pub active_trials: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// Sum of plan prices across active paid subscriptions
    pub monthly_recurring_revenue: f64,
    pub paying_clinics: u64,
    /// Invoice totals collected, all time
    pub invoiced_total: f64,
    pub paid_total: f64,
}

/// Percentage helper shared by the aggregator: part of whole, 0-100,
/// zero when the whole is zero.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64) * 100.0
}
