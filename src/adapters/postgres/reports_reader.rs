//! PostgreSQL implementation of ReportsReader.
//!
//! Read-optimized aggregation over subscriptions, plans, clinics, and
//! invoices. Every method is a handful of GROUP BY and FILTER queries;
//! the reports handler does the reduction into the overview.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::billing::{PlanTier, SubscriptionStatus};
use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, Timestamp};
use crate::ports::{ClinicUsageRow, ReportsReader, RevenueStats, SubscriptionStats};

/// PostgreSQL implementation of the ReportsReader port.
#[derive(Clone)]
pub struct PostgresReportsReader {
    pool: PgPool,
}

impl PostgresReportsReader {
    /// Creates a new PostgresReportsReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    s.parse().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid status: {}", e))
    })
}

fn parse_tier(s: &str) -> Result<PlanTier, DomainError> {
    match s {
        "free" => Ok(PlanTier::Free),
        "professional" => Ok(PlanTier::Professional),
        "enterprise" => Ok(PlanTier::Enterprise),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid plan tier: {}", other),
        )),
    }
}

#[async_trait]
impl ReportsReader for PostgresReportsReader {
    async fn subscription_stats(
        &self,
        now: Timestamp,
    ) -> Result<SubscriptionStats, DomainError> {
        let status_rows = sqlx::query(
            r#"
            SELECT status, COUNT(*) AS count
            FROM subscriptions
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to group subscriptions by status", e))?;

        let mut by_status = Vec::with_capacity(status_rows.len());
        for row in status_rows {
            let status: String = row.get("status");
            let count: i64 = row.get("count");
            by_status.push((parse_status(&status)?, count as u64));
        }

        let tier_rows = sqlx::query(
            r#"
            SELECT p.tier AS tier, COUNT(*) AS count
            FROM subscriptions s
            JOIN plans p ON p.id = s.plan_id
            GROUP BY p.tier
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to group subscriptions by tier", e))?;

        let mut by_tier = Vec::with_capacity(tier_rows.len());
        for row in tier_rows {
            let tier: String = row.get("tier");
            let count: i64 = row.get("count");
            by_tier.push((parse_tier(&tier)?, count as u64));
        }

        let funnel = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (
                    WHERE s.status = 'active' AND p.tier <> 'free'
                ) AS active_paid,
                COUNT(*) FILTER (
                    WHERE s.trial_start IS NOT NULL
                ) AS trials_started,
                COUNT(*) FILTER (
                    WHERE s.trial_start IS NOT NULL
                      AND s.status = 'active'
                      AND p.tier <> 'free'
                ) AS trials_converted,
                COUNT(*) FILTER (
                    WHERE s.status = 'trialing'
                      AND (s.trial_end IS NULL OR s.trial_end >= $1)
                ) AS active_trials,
                COUNT(*) FILTER (
                    WHERE s.status = 'trialing' AND s.trial_end < $1
                ) AS stale_trials
            FROM subscriptions s
            JOIN plans p ON p.id = s.plan_id
            "#,
        )
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute trial funnel", e))?;

        let active_paid: i64 = funnel.get("active_paid");
        let trials_started: i64 = funnel.get("trials_started");
        let trials_converted: i64 = funnel.get("trials_converted");
        let active_trials: i64 = funnel.get("active_trials");
        let stale_trials: i64 = funnel.get("stale_trials");

        Ok(SubscriptionStats {
            by_status,
            by_tier,
            active_paid: active_paid as u64,
            trials_started: trials_started as u64,
            trials_converted: trials_converted as u64,
            active_trials: active_trials as u64,
            stale_trials: stale_trials as u64,
        })
    }

    async fn client_usage(&self) -> Result<Vec<ClinicUsageRow>, DomainError> {
        // Clinics that never touched billing have no subscription row
        // yet; they sit on the free plan's limit.
        let rows = sqlx::query(
            r#"
            SELECT
                c.id AS clinic_id,
                COUNT(cl.id) FILTER (WHERE cl.status <> 'inactive') AS non_inactive_clients,
                COALESCE(
                    p.client_limit,
                    (SELECT client_limit FROM plans WHERE tier = 'free'),
                    0
                ) AS client_limit
            FROM clinics c
            LEFT JOIN clients cl ON cl.clinic_id = c.id
            LEFT JOIN subscriptions s ON s.clinic_id = c.id
            LEFT JOIN plans p ON p.id = s.plan_id
            GROUP BY c.id, p.client_limit
            ORDER BY c.created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute client usage", e))?;

        let mut usage = Vec::with_capacity(rows.len());
        for row in rows {
            let clinic_id: uuid::Uuid = row.get("clinic_id");
            let non_inactive_clients: i64 = row.get("non_inactive_clients");
            let client_limit: i32 = row.get("client_limit");
            usage.push(ClinicUsageRow {
                clinic_id: ClinicId::from_uuid(clinic_id),
                non_inactive_clients: non_inactive_clients as u64,
                client_limit: client_limit as u32,
            });
        }

        Ok(usage)
    }

    async fn revenue_stats(&self) -> Result<RevenueStats, DomainError> {
        let mrr_row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(p.monthly_price), 0) AS mrr,
                COUNT(*) AS paying_clinics
            FROM subscriptions s
            JOIN plans p ON p.id = s.plan_id
            WHERE s.status = 'active' AND p.tier <> 'free'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute recurring revenue", e))?;

        let invoice_row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(total) FILTER (WHERE status <> 'void'), 0) AS invoiced_total,
                COALESCE(SUM(total) FILTER (WHERE status = 'paid'), 0) AS paid_total
            FROM invoices
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute invoice totals", e))?;

        let monthly_recurring_revenue: f64 = mrr_row.get("mrr");
        let paying_clinics: i64 = mrr_row.get("paying_clinics");
        let invoiced_total: f64 = invoice_row.get("invoiced_total");
        let paid_total: f64 = invoice_row.get("paid_total");

        Ok(RevenueStats {
            monthly_recurring_revenue,
            paying_clinics: paying_clinics as u64,
            invoiced_total,
            paid_total,
        })
    }
}
