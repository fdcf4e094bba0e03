//! PostgreSQL implementation of PlanRepository.
//!
//! The plan catalog is seeded by upsert keyed on tier, so the seed
//! binary can run on every deploy without duplicating rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Plan, PlanFeatures, PlanTier};
use crate::domain::foundation::{DomainError, ErrorCode, PlanId, Timestamp};
use crate::ports::PlanRepository;

/// PostgreSQL implementation of the PlanRepository port.
#[derive(Clone)]
pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    /// Creates a new PostgresPlanRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PLAN_COLUMNS: &str = "id, tier, name, monthly_price, client_limit, \
     reports, ai_assistant, email_invoicing, created_at, updated_at";

/// Database row representation of a plan.
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    tier: String,
    name: String,
    monthly_price: f64,
    client_limit: i32,
    reports: bool,
    ai_assistant: bool,
    email_invoicing: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PlanRow> for Plan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        Ok(Plan {
            id: PlanId::from_uuid(row.id),
            tier: parse_tier(&row.tier)?,
            name: row.name,
            monthly_price: row.monthly_price,
            client_limit: row.client_limit as u32,
            features: PlanFeatures {
                reports: row.reports,
                ai_assistant: row.ai_assistant,
                email_invoicing: row.email_invoicing,
            },
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_tier(s: &str) -> Result<PlanTier, DomainError> {
    match s {
        "free" => Ok(PlanTier::Free),
        "professional" => Ok(PlanTier::Professional),
        "enterprise" => Ok(PlanTier::Enterprise),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid plan tier: {}", s),
        )),
    }
}

fn tier_to_str(tier: PlanTier) -> &'static str {
    match tier {
        PlanTier::Free => "free",
        PlanTier::Professional => "professional",
        PlanTier::Enterprise => "enterprise",
    }
}

#[async_trait]
impl PlanRepository for PostgresPlanRepository {
    async fn upsert(&self, plan: &Plan) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO plans (
                id, tier, name, monthly_price, client_limit,
                reports, ai_assistant, email_invoicing, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (tier) DO UPDATE SET
                name = EXCLUDED.name,
                monthly_price = EXCLUDED.monthly_price,
                client_limit = EXCLUDED.client_limit,
                reports = EXCLUDED.reports,
                ai_assistant = EXCLUDED.ai_assistant,
                email_invoicing = EXCLUDED.email_invoicing,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(plan.id.as_uuid())
        .bind(tier_to_str(plan.tier))
        .bind(&plan.name)
        .bind(plan.monthly_price)
        .bind(plan.client_limit as i32)
        .bind(plan.features.reports)
        .bind(plan.features.ai_assistant)
        .bind(plan.features.email_invoicing)
        .bind(plan.created_at.as_datetime())
        .bind(plan.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert plan: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>, DomainError> {
        let query = format!("SELECT {} FROM plans WHERE id = $1", PLAN_COLUMNS);
        let row: Option<PlanRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch plan: {}", e),
                )
            })?;

        row.map(Plan::try_from).transpose()
    }

    async fn find_by_tier(&self, tier: PlanTier) -> Result<Plan, DomainError> {
        let query = format!("SELECT {} FROM plans WHERE tier = $1", PLAN_COLUMNS);
        let row: Option<PlanRow> = sqlx::query_as(&query)
            .bind(tier_to_str(tier))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch plan by tier: {}", e),
                )
            })?;

        match row {
            Some(row) => Plan::try_from(row),
            None => Err(DomainError::new(
                ErrorCode::PlanNotFound,
                format!("No plan seeded for tier: {}", tier_to_str(tier)),
            )),
        }
    }

    async fn list(&self) -> Result<Vec<Plan>, DomainError> {
        let query = format!("SELECT {} FROM plans ORDER BY monthly_price ASC", PLAN_COLUMNS);
        let rows: Vec<PlanRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list plans: {}", e),
                )
            })?;

        rows.into_iter().map(Plan::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_conversion_roundtrips() {
        for tier in [PlanTier::Free, PlanTier::Professional, PlanTier::Enterprise] {
            assert_eq!(parse_tier(tier_to_str(tier)).unwrap(), tier);
        }
    }

    #[test]
    fn parse_tier_rejects_invalid() {
        assert!(parse_tier("premium").is_err());
        assert!(parse_tier("").is_err());
    }

    #[test]
    fn row_feature_flags_survive_conversion() {
        let now = Utc::now();
        let row = PlanRow {
            id: Uuid::new_v4(),
            tier: "professional".to_string(),
            name: "Professional".to_string(),
            monthly_price: 49.0,
            client_limit: 100,
            reports: true,
            ai_assistant: true,
            email_invoicing: false,
            created_at: now,
            updated_at: now,
        };

        let plan = Plan::try_from(row).unwrap();
        assert_eq!(plan.tier, PlanTier::Professional);
        assert!(plan.features.reports);
        assert!(!plan.features.email_invoicing);
    }
}
