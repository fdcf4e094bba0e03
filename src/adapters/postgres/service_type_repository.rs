//! PostgreSQL implementation of ServiceTypeRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, ServiceTypeId, Timestamp};
use crate::domain::scheduling::ServiceType;
use crate::ports::ServiceTypeRepository;

/// PostgreSQL implementation of the ServiceTypeRepository port.
#[derive(Clone)]
pub struct PostgresServiceTypeRepository {
    pool: PgPool,
}

impl PostgresServiceTypeRepository {
    /// Creates a new PostgresServiceTypeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a service type.
#[derive(Debug, sqlx::FromRow)]
struct ServiceTypeRow {
    id: Uuid,
    clinic_id: Uuid,
    name: String,
    duration_minutes: i32,
    price: f64,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceTypeRow> for ServiceType {
    fn from(row: ServiceTypeRow) -> Self {
        ServiceType {
            id: ServiceTypeId::from_uuid(row.id),
            clinic_id: ClinicId::from_uuid(row.clinic_id),
            name: row.name,
            duration_minutes: row.duration_minutes as u32,
            price: row.price,
            active: row.active,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl ServiceTypeRepository for PostgresServiceTypeRepository {
    async fn save(&self, service_type: &ServiceType) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO service_types (
                id, clinic_id, name, duration_minutes, price, active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(service_type.id.as_uuid())
        .bind(service_type.clinic_id.as_uuid())
        .bind(&service_type.name)
        .bind(service_type.duration_minutes as i32)
        .bind(service_type.price)
        .bind(service_type.active)
        .bind(service_type.created_at.as_datetime())
        .bind(service_type.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert service type: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, service_type: &ServiceType) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE service_types SET
                name = $2,
                duration_minutes = $3,
                price = $4,
                active = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(service_type.id.as_uuid())
        .bind(&service_type.name)
        .bind(service_type.duration_minutes as i32)
        .bind(service_type.price)
        .bind(service_type.active)
        .bind(service_type.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update service type: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ServiceTypeNotFound,
                format!("Service type not found: {}", service_type.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ServiceTypeId) -> Result<Option<ServiceType>, DomainError> {
        let row: Option<ServiceTypeRow> = sqlx::query_as(
            r#"
            SELECT id, clinic_id, name, duration_minutes, price, active, created_at, updated_at
            FROM service_types
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch service type: {}", e),
            )
        })?;

        Ok(row.map(ServiceType::from))
    }

    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        active_only: bool,
    ) -> Result<Vec<ServiceType>, DomainError> {
        let rows: Vec<ServiceTypeRow> = sqlx::query_as(
            r#"
            SELECT id, clinic_id, name, duration_minutes, price, active, created_at, updated_at
            FROM service_types
            WHERE clinic_id = $1 AND (NOT $2 OR active)
            ORDER BY name ASC
            "#,
        )
        .bind(clinic_id.as_uuid())
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list service types: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(ServiceType::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_maps_onto_the_aggregate() {
        let now = Utc::now();
        let row = ServiceTypeRow {
            id: Uuid::new_v4(),
            clinic_id: Uuid::new_v4(),
            name: "Initial consult".to_string(),
            duration_minutes: 50,
            price: 120.0,
            active: true,
            created_at: now,
            updated_at: now,
        };

        let service_type = ServiceType::from(row);
        assert_eq!(service_type.name, "Initial consult");
        assert_eq!(service_type.duration_minutes, 50);
        assert!(service_type.active);
    }
}
