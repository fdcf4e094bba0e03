//! GetOverviewHandler - the admin reports overview.
//!
//! Pulls raw grouped counts from the reports reader and reduces them
//! into the overview: subscription breakdowns, client usage against
//! plan limits, the trial funnel, revenue, and the heuristic health
//! score. Recomputed on every call; nothing is persisted.

use std::sync::Arc;

use crate::domain::billing::{PlanTier, SubscriptionStatus};
use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, Timestamp};
use crate::domain::reports::{
    compute_health, percentage, ClientUsage, HealthInputs, PlanCount, ReportsOverview,
    RevenueSummary, StatusCount, SubscriptionBreakdown, TrialConversion,
};
use crate::ports::{PlanRepository, ReportsReader, SubscriptionRepository, SubscriptionStats};

/// A clinic counts as near its limit at this share of it.
const NEAR_LIMIT_SHARE: f64 = 0.8;

/// Query for the reports overview.
#[derive(Debug, Clone)]
pub struct GetOverviewQuery {
    pub clinic_id: ClinicId,
}

/// Handler for the reports overview.
pub struct GetOverviewHandler {
    reader: Arc<dyn ReportsReader>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl GetOverviewHandler {
    pub fn new(
        reader: Arc<dyn ReportsReader>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            reader,
            subscriptions,
            plans,
        }
    }

    pub async fn handle(&self, query: GetOverviewQuery) -> Result<ReportsOverview, DomainError> {
        let now = Timestamp::now();

        // 1. Reports are a paid-plan feature. A lapsed trial no longer
        //    grants them, even before the downgrade lands.
        let free_plan = self.plans.find_by_tier(PlanTier::Free).await?;
        let subscription = self
            .subscriptions
            .ensure_default(&query.clinic_id, &free_plan.id)
            .await?;
        let plan = if subscription.is_trial_expired(now) {
            free_plan
        } else {
            self.plans
                .find_by_id(&subscription.plan_id)
                .await?
                .unwrap_or(free_plan)
        };
        if !plan.features.reports {
            return Err(DomainError::new(
                ErrorCode::FeatureNotAvailable,
                "Your plan does not include reports",
            ));
        }

        // 2. Raw grouped counts
        let stats = self.reader.subscription_stats(now).await?;
        let usage = self.reader.client_usage().await?;
        let revenue = self.reader.revenue_stats().await?;

        // 3. Reduce
        let total = stats.total();
        let subscriptions = SubscriptionBreakdown {
            total,
            by_status: stats
                .by_status
                .iter()
                .map(|(status, count)| StatusCount {
                    status: *status,
                    count: *count,
                })
                .collect(),
            by_plan: stats
                .by_tier
                .iter()
                .map(|(tier, count)| PlanCount {
                    tier: *tier,
                    count: *count,
                })
                .collect(),
        };

        let limited: Vec<_> = usage.iter().filter(|row| row.client_limit > 0).collect();
        let average_usage_percent = if limited.is_empty() {
            0.0
        } else {
            limited
                .iter()
                .map(|row| {
                    (row.non_inactive_clients as f64 / f64::from(row.client_limit) * 100.0)
                        .min(100.0)
                })
                .sum::<f64>()
                / limited.len() as f64
        };
        let client_usage = ClientUsage {
            total_clinics: usage.len() as u64,
            total_active_clients: usage.iter().map(|row| row.non_inactive_clients).sum(),
            average_usage_percent,
            clinics_near_limit: limited
                .iter()
                .filter(|row| {
                    row.non_inactive_clients as f64
                        >= f64::from(row.client_limit) * NEAR_LIMIT_SHARE
                })
                .count() as u64,
        };

        let trials = TrialConversion {
            trials_started: stats.trials_started,
            trials_converted: stats.trials_converted,
            conversion_rate_percent: percentage(stats.trials_converted, stats.trials_started),
            active_trials: stats.active_trials,
        };

        let health = compute_health(&HealthInputs {
            total_subscriptions: total,
            active_paid: stats.active_paid,
            past_due: status_count(&stats, SubscriptionStatus::PastDue),
            cancelled: status_count(&stats, SubscriptionStatus::Cancelled),
            trials_started: stats.trials_started,
            trials_converted: stats.trials_converted,
            stale_trials: stats.stale_trials,
        });

        Ok(ReportsOverview {
            subscriptions,
            client_usage,
            trials,
            revenue: RevenueSummary {
                monthly_recurring_revenue: revenue.monthly_recurring_revenue,
                paying_clinics: revenue.paying_clinics,
                invoiced_total: revenue.invoiced_total,
                paid_total: revenue.paid_total,
            },
            health,
            generated_at: now,
        })
    }
}

fn status_count(stats: &SubscriptionStats, status: SubscriptionStatus) -> u64 {
    stats
        .by_status
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockPlanRepository, MockReportsReader, MockSubscriptionRepository,
    };
    use crate::domain::billing::Subscription;
    use crate::domain::reports::BASE_SCORE;
    use crate::ports::{ClinicUsageRow, RevenueStats};

    fn professional_clinic() -> (ClinicId, MockSubscriptionRepository, MockPlanRepository) {
        let clinic_id = ClinicId::new();
        let plans = MockPlanRepository::seeded();
        let free = plans.plan_for(PlanTier::Free);
        let professional = plans.plan_for(PlanTier::Professional);
        let mut subscription = Subscription::create_free(clinic_id, free.id);
        subscription
            .start_trial(professional.id, Timestamp::now())
            .unwrap();
        subscription.convert_trial("sub_test".to_string()).unwrap();
        (
            clinic_id,
            MockSubscriptionRepository::with_subscription(subscription),
            plans,
        )
    }

    #[tokio::test]
    async fn free_plan_cannot_see_reports() {
        let handler = GetOverviewHandler::new(
            Arc::new(MockReportsReader::empty()),
            Arc::new(MockSubscriptionRepository::new()),
            Arc::new(MockPlanRepository::seeded()),
        );

        let err = handler
            .handle(GetOverviewQuery {
                clinic_id: ClinicId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::FeatureNotAvailable);
    }

    #[tokio::test]
    async fn reduces_grouped_counts_into_the_overview() {
        let (clinic_id, subscriptions, plans) = professional_clinic();
        let reader = MockReportsReader {
            stats: SubscriptionStats {
                by_status: vec![
                    (SubscriptionStatus::Active, 3),
                    (SubscriptionStatus::Trialing, 2),
                    (SubscriptionStatus::PastDue, 1),
                ],
                by_tier: vec![(PlanTier::Free, 3), (PlanTier::Professional, 3)],
                active_paid: 2,
                trials_started: 4,
                trials_converted: 2,
                active_trials: 2,
                stale_trials: 1,
            },
            usage: vec![
                ClinicUsageRow {
                    clinic_id,
                    non_inactive_clients: 5,
                    client_limit: 10,
                },
                ClinicUsageRow {
                    clinic_id: ClinicId::new(),
                    non_inactive_clients: 9,
                    client_limit: 10,
                },
                ClinicUsageRow {
                    clinic_id: ClinicId::new(),
                    non_inactive_clients: 500,
                    client_limit: 0,
                },
            ],
            revenue: RevenueStats {
                monthly_recurring_revenue: 98.0,
                paying_clinics: 2,
                invoiced_total: 500.0,
                paid_total: 300.0,
            },
        };
        let handler = GetOverviewHandler::new(
            Arc::new(reader),
            Arc::new(subscriptions),
            Arc::new(plans),
        );

        let overview = handler.handle(GetOverviewQuery { clinic_id }).await.unwrap();

        assert_eq!(overview.subscriptions.total, 6);
        assert_eq!(overview.subscriptions.by_plan.len(), 2);
        assert_eq!(overview.client_usage.total_clinics, 3);
        assert_eq!(overview.client_usage.total_active_clients, 514);
        // Unlimited clinics stay out of the usage average.
        assert_eq!(overview.client_usage.average_usage_percent, 70.0);
        assert_eq!(overview.client_usage.clinics_near_limit, 1);
        assert_eq!(overview.trials.conversion_rate_percent, 50.0);
        assert_eq!(overview.revenue.monthly_recurring_revenue, 98.0);
        assert_eq!(overview.revenue.paid_total, 300.0);
        assert!(!overview.health.factors.is_empty());
    }

    #[tokio::test]
    async fn empty_platform_reports_base_health() {
        let (clinic_id, subscriptions, plans) = professional_clinic();
        let handler = GetOverviewHandler::new(
            Arc::new(MockReportsReader::empty()),
            Arc::new(subscriptions),
            Arc::new(plans),
        );

        let overview = handler.handle(GetOverviewQuery { clinic_id }).await.unwrap();

        assert_eq!(overview.subscriptions.total, 0);
        assert_eq!(overview.client_usage.average_usage_percent, 0.0);
        assert_eq!(overview.trials.conversion_rate_percent, 0.0);
        assert_eq!(overview.health.score, BASE_SCORE as u8);
    }
}
