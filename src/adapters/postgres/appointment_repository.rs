//! PostgreSQL implementation of AppointmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AppointmentId, ClientId, ClinicId, DomainError, ErrorCode, ServiceTypeId, Timestamp, UserId,
};
use crate::domain::scheduling::{Appointment, AppointmentStatus};
use crate::ports::AppointmentRepository;

/// PostgreSQL implementation of the AppointmentRepository port.
#[derive(Clone)]
pub struct PostgresAppointmentRepository {
    pool: PgPool,
}

impl PostgresAppointmentRepository {
    /// Creates a new PostgresAppointmentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const APPOINTMENT_COLUMNS: &str = "id, clinic_id, client_id, service_type_id, clinician_id, \
     starts_at, ends_at, status, notes, created_at, updated_at";

/// Database row representation of an appointment.
#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    clinic_id: Uuid,
    client_id: Uuid,
    service_type_id: Uuid,
    clinician_id: String,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DomainError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: AppointmentId::from_uuid(row.id),
            clinic_id: ClinicId::from_uuid(row.clinic_id),
            client_id: ClientId::from_uuid(row.client_id),
            service_type_id: ServiceTypeId::from_uuid(row.service_type_id),
            clinician_id: UserId::new(row.clinician_id).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid clinician_id: {}", e),
                )
            })?,
            starts_at: Timestamp::from_datetime(row.starts_at),
            ends_at: Timestamp::from_datetime(row.ends_at),
            status: parse_status(&row.status)?,
            notes: row.notes,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<AppointmentStatus, DomainError> {
    match s {
        "scheduled" => Ok(AppointmentStatus::Scheduled),
        "completed" => Ok(AppointmentStatus::Completed),
        "cancelled" => Ok(AppointmentStatus::Cancelled),
        "no_show" => Ok(AppointmentStatus::NoShow),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid appointment status: {}", s),
        )),
    }
}

fn status_to_str(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "scheduled",
        AppointmentStatus::Completed => "completed",
        AppointmentStatus::Cancelled => "cancelled",
        AppointmentStatus::NoShow => "no_show",
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepository {
    async fn save(&self, appointment: &Appointment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, clinic_id, client_id, service_type_id, clinician_id,
                starts_at, ends_at, status, notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.clinic_id.as_uuid())
        .bind(appointment.client_id.as_uuid())
        .bind(appointment.service_type_id.as_uuid())
        .bind(appointment.clinician_id.as_str())
        .bind(appointment.starts_at.as_datetime())
        .bind(appointment.ends_at.as_datetime())
        .bind(status_to_str(appointment.status))
        .bind(&appointment.notes)
        .bind(appointment.created_at.as_datetime())
        .bind(appointment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert appointment: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE appointments SET
                client_id = $2,
                service_type_id = $3,
                clinician_id = $4,
                starts_at = $5,
                ends_at = $6,
                status = $7,
                notes = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.client_id.as_uuid())
        .bind(appointment.service_type_id.as_uuid())
        .bind(appointment.clinician_id.as_str())
        .bind(appointment.starts_at.as_datetime())
        .bind(appointment.ends_at.as_datetime())
        .bind(status_to_str(appointment.status))
        .bind(&appointment.notes)
        .bind(appointment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update appointment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                format!("Appointment not found: {}", appointment.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError> {
        let query = format!("SELECT {} FROM appointments WHERE id = $1", APPOINTMENT_COLUMNS);
        let row: Option<AppointmentRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch appointment: {}", e),
                )
            })?;

        row.map(Appointment::try_from).transpose()
    }

    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Appointment>, DomainError> {
        let query = format!(
            "SELECT {} FROM appointments \
             WHERE clinic_id = $1 AND starts_at >= $2 AND starts_at < $3 \
             ORDER BY starts_at ASC",
            APPOINTMENT_COLUMNS
        );
        let rows: Vec<AppointmentRow> = sqlx::query_as(&query)
            .bind(clinic_id.as_uuid())
            .bind(from.as_datetime())
            .bind(until.as_datetime())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list appointments: {}", e),
                )
            })?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Appointment>, DomainError> {
        let query = format!(
            "SELECT {} FROM appointments WHERE client_id = $1 ORDER BY starts_at ASC",
            APPOINTMENT_COLUMNS
        );
        let rows: Vec<AppointmentRow> = sqlx::query_as(&query)
            .bind(client_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list client appointments: {}", e),
                )
            })?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn list_upcoming(
        &self,
        clinic_id: &ClinicId,
        after: Timestamp,
        limit: u32,
    ) -> Result<Vec<Appointment>, DomainError> {
        let query = format!(
            "SELECT {} FROM appointments \
             WHERE clinic_id = $1 AND starts_at > $2 AND status = 'scheduled' \
             ORDER BY starts_at ASC LIMIT $3",
            APPOINTMENT_COLUMNS
        );
        let rows: Vec<AppointmentRow> = sqlx::query_as(&query)
            .bind(clinic_id.as_uuid())
            .bind(after.as_datetime())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list upcoming appointments: {}", e),
                )
            })?;

        rows.into_iter().map(Appointment::try_from).collect()
    }
}
