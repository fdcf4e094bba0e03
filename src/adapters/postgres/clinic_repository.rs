//! PostgreSQL implementation of ClinicRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::clinic::Clinic;
use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, Timestamp};
use crate::ports::ClinicRepository;

/// PostgreSQL implementation of the ClinicRepository port.
#[derive(Clone)]
pub struct PostgresClinicRepository {
    pool: PgPool,
}

impl PostgresClinicRepository {
    /// Creates a new PostgresClinicRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a clinic.
#[derive(Debug, sqlx::FromRow)]
struct ClinicRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    timezone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClinicRow> for Clinic {
    fn from(row: ClinicRow) -> Self {
        Clinic {
            id: ClinicId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            timezone: row.timezone,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl ClinicRepository for PostgresClinicRepository {
    async fn save(&self, clinic: &Clinic) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO clinics (
                id, name, email, phone, address, timezone, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(clinic.id.as_uuid())
        .bind(&clinic.name)
        .bind(&clinic.email)
        .bind(&clinic.phone)
        .bind(&clinic.address)
        .bind(&clinic.timezone)
        .bind(clinic.created_at.as_datetime())
        .bind(clinic.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert clinic: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, clinic: &Clinic) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE clinics SET
                name = $2,
                email = $3,
                phone = $4,
                address = $5,
                timezone = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(clinic.id.as_uuid())
        .bind(&clinic.name)
        .bind(&clinic.email)
        .bind(&clinic.phone)
        .bind(&clinic.address)
        .bind(&clinic.timezone)
        .bind(clinic.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update clinic: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClinicNotFound,
                format!("Clinic not found: {}", clinic.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ClinicId) -> Result<Option<Clinic>, DomainError> {
        let row: Option<ClinicRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, address, timezone, created_at, updated_at
            FROM clinics
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch clinic: {}", e),
            )
        })?;

        Ok(row.map(Clinic::from))
    }

    async fn exists(&self, id: &ClinicId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clinics WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check clinic existence: {}", e),
                )
            })?;

        Ok(result.0 > 0)
    }
}
