//! Read-only port for report aggregation queries.
//!
//! Returns raw grouped counts and sums; the reports handler reduces
//! them into the overview and health score. Nothing here writes.

use crate::domain::billing::{PlanTier, SubscriptionStatus};
use crate::domain::foundation::{ClinicId, DomainError, Timestamp};
use async_trait::async_trait;

/// Grouped subscription counts plus the trial funnel.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionStats {
    pub by_status: Vec<(SubscriptionStatus, u64)>,
    pub by_tier: Vec<(PlanTier, u64)>,
    /// Active subscriptions on a paid plan.
    pub active_paid: u64,
    /// Subscriptions that have ever started a trial.
    pub trials_started: u64,
    /// Trials that ended on an active paid subscription.
    pub trials_converted: u64,
    pub active_trials: u64,
    /// Trialing rows whose trial end is already in the past.
    pub stale_trials: u64,
}

impl SubscriptionStats {
    pub fn total(&self) -> u64 {
        self.by_status.iter().map(|(_, count)| count).sum()
    }
}

/// Per-clinic roster fill against the plan limit.
#[derive(Debug, Clone)]
pub struct ClinicUsageRow {
    pub clinic_id: ClinicId,
    pub non_inactive_clients: u64,
    /// 0 means unlimited.
    pub client_limit: u32,
}

/// Money totals for the overview.
#[derive(Debug, Clone, Default)]
pub struct RevenueStats {
    /// Sum of plan prices across active paid subscriptions.
    pub monthly_recurring_revenue: f64,
    pub paying_clinics: u64,
    /// Total of all non-void invoices.
    pub invoiced_total: f64,
    /// Total of paid invoices.
    pub paid_total: f64,
}

/// Read-only port for report queries.
#[async_trait]
pub trait ReportsReader: Send + Sync {
    /// Subscription counts grouped by status and plan, with the trial
    /// funnel evaluated at `now`.
    async fn subscription_stats(&self, now: Timestamp)
        -> Result<SubscriptionStats, DomainError>;

    /// One row per clinic with its countable clients and plan limit.
    async fn client_usage(&self) -> Result<Vec<ClinicUsageRow>, DomainError>;

    /// Revenue sums.
    async fn revenue_stats(&self) -> Result<RevenueStats, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ReportsReader) {}
    }

    #[test]
    fn stats_total_sums_status_counts() {
        let stats = SubscriptionStats {
            by_status: vec![
                (SubscriptionStatus::Active, 3),
                (SubscriptionStatus::Trialing, 2),
            ],
            ..Default::default()
        };
        assert_eq!(stats.total(), 5);
    }
}
