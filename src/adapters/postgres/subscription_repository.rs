//! PostgreSQL implementation of SubscriptionRepository.
//!
//! One subscription row per clinic, held by the unique constraint on
//! `clinic_id`. `ensure_default` inserts with ON CONFLICT DO NOTHING
//! and re-reads, so concurrent provisioning calls all land on the
//! same row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Subscription, SubscriptionStatus};
use crate::domain::foundation::{
    ClinicId, DomainError, ErrorCode, PlanId, SubscriptionId, Timestamp,
};
use crate::ports::SubscriptionRepository;

/// PostgreSQL implementation of the SubscriptionRepository port.
#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a new PostgresSubscriptionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SUBSCRIPTION_COLUMNS: &str = "id, clinic_id, plan_id, status, trial_start, trial_end, \
     stripe_customer_id, stripe_subscription_id, created_at, updated_at, cancelled_at";

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    clinic_id: Uuid,
    plan_id: Uuid,
    status: String,
    trial_start: Option<DateTime<Utc>>,
    trial_end: Option<DateTime<Utc>>,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let status: SubscriptionStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid status: {}", e))
        })?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            clinic_id: ClinicId::from_uuid(row.clinic_id),
            plan_id: PlanId::from_uuid(row.plan_id),
            status,
            trial_start: row.trial_start.map(Timestamp::from_datetime),
            trial_end: row.trial_end.map(Timestamp::from_datetime),
            stripe_customer_id: row.stripe_customer_id,
            stripe_subscription_id: row.stripe_subscription_id,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, clinic_id, plan_id, status, trial_start, trial_end,
                stripe_customer_id, stripe_subscription_id,
                created_at, updated_at, cancelled_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.clinic_id.as_uuid())
        .bind(subscription.plan_id.as_uuid())
        .bind(subscription.status.as_str())
        .bind(subscription.trial_start.map(|t| *t.as_datetime()))
        .bind(subscription.trial_end.map(|t| *t.as_datetime()))
        .bind(&subscription.stripe_customer_id)
        .bind(&subscription.stripe_subscription_id)
        .bind(subscription.created_at.as_datetime())
        .bind(subscription.updated_at.as_datetime())
        .bind(subscription.cancelled_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("subscriptions_clinic_id_key") {
                    return DomainError::new(
                        ErrorCode::AlreadyExists,
                        "Clinic already has a subscription",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert subscription: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET
                plan_id = $2,
                status = $3,
                trial_start = $4,
                trial_end = $5,
                stripe_customer_id = $6,
                stripe_subscription_id = $7,
                updated_at = $8,
                cancelled_at = $9
            WHERE id = $1
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.plan_id.as_uuid())
        .bind(subscription.status.as_str())
        .bind(subscription.trial_start.map(|t| *t.as_datetime()))
        .bind(subscription.trial_end.map(|t| *t.as_datetime()))
        .bind(&subscription.stripe_customer_id)
        .bind(&subscription.stripe_subscription_id)
        .bind(subscription.updated_at.as_datetime())
        .bind(subscription.cancelled_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update subscription: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", subscription.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let query = format!("SELECT {} FROM subscriptions WHERE id = $1", SUBSCRIPTION_COLUMNS);
        let row: Option<SubscriptionRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch subscription: {}", e),
                )
            })?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_by_clinic(
        &self,
        clinic_id: &ClinicId,
    ) -> Result<Option<Subscription>, DomainError> {
        let query = format!(
            "SELECT {} FROM subscriptions WHERE clinic_id = $1",
            SUBSCRIPTION_COLUMNS
        );
        let row: Option<SubscriptionRow> = sqlx::query_as(&query)
            .bind(clinic_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch clinic subscription: {}", e),
                )
            })?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_by_provider_id(
        &self,
        provider_subscription_id: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        let query = format!(
            "SELECT {} FROM subscriptions WHERE stripe_subscription_id = $1",
            SUBSCRIPTION_COLUMNS
        );
        let row: Option<SubscriptionRow> = sqlx::query_as(&query)
            .bind(provider_subscription_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch subscription by provider id: {}", e),
                )
            })?;

        row.map(Subscription::try_from).transpose()
    }

    async fn ensure_default(
        &self,
        clinic_id: &ClinicId,
        free_plan_id: &PlanId,
    ) -> Result<Subscription, DomainError> {
        let default = Subscription::create_free(*clinic_id, *free_plan_id);

        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, clinic_id, plan_id, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (clinic_id) DO NOTHING
            "#,
        )
        .bind(default.id.as_uuid())
        .bind(default.clinic_id.as_uuid())
        .bind(default.plan_id.as_uuid())
        .bind(default.status.as_str())
        .bind(default.created_at.as_datetime())
        .bind(default.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to provision subscription: {}", e),
            )
        })?;

        self.find_by_clinic(clinic_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                "Subscription vanished after provisioning",
            )
        })
    }

    async fn find_expired_trials(
        &self,
        now: Timestamp,
    ) -> Result<Vec<Subscription>, DomainError> {
        let query = format!(
            "SELECT {} FROM subscriptions \
             WHERE status = 'trialing' AND trial_end IS NOT NULL AND trial_end < $1 \
             ORDER BY trial_end ASC",
            SUBSCRIPTION_COLUMNS
        );
        let rows: Vec<SubscriptionRow> = sqlx::query_as(&query)
            .bind(now.as_datetime())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list expired trials: {}", e),
                )
            })?;

        rows.into_iter().map(Subscription::try_from).collect()
    }
}
