//! PostgreSQL implementation of ClientRepository.
//!
//! The per-clinic email uniqueness rule is enforced by the
//! `clients_clinic_id_email_key` constraint; this adapter translates
//! that violation into `DuplicateEmail`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::client::{Client, ClientStatus};
use crate::domain::foundation::{ClientId, ClinicId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ClientRepository;

/// PostgreSQL implementation of the ClientRepository port.
#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Creates a new PostgresClientRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CLIENT_COLUMNS: &str = "id, clinic_id, first_name, last_name, email, phone, \
     date_of_birth, assigned_to, notes, status, created_at, updated_at";

/// Database row representation of a client.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    clinic_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
    assigned_to: Option<String>,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = DomainError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let assigned_to = row
            .assigned_to
            .map(UserId::new)
            .transpose()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid assigned_to: {}", e))
            })?;

        Ok(Client {
            id: ClientId::from_uuid(row.id),
            clinic_id: ClinicId::from_uuid(row.clinic_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            date_of_birth: row.date_of_birth,
            assigned_to,
            notes: row.notes,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<ClientStatus, DomainError> {
    match s {
        "active" => Ok(ClientStatus::Active),
        "waitlist" => Ok(ClientStatus::Waitlist),
        "inactive" => Ok(ClientStatus::Inactive),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid client status: {}", s),
        )),
    }
}

fn status_to_str(status: ClientStatus) -> &'static str {
    match status {
        ClientStatus::Active => "active",
        ClientStatus::Waitlist => "waitlist",
        ClientStatus::Inactive => "inactive",
    }
}

fn map_duplicate_email(e: sqlx::Error, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("clients_clinic_id_email_key") {
            return DomainError::new(
                ErrorCode::DuplicateEmail,
                "A client with this email already exists",
            );
        }
    }
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {} client: {}", action, e),
    )
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn save(&self, client: &Client) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, clinic_id, first_name, last_name, email, phone,
                date_of_birth, assigned_to, notes, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(client.clinic_id.as_uuid())
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.date_of_birth)
        .bind(client.assigned_to.as_ref().map(|u| u.as_str()))
        .bind(&client.notes)
        .bind(status_to_str(client.status))
        .bind(client.created_at.as_datetime())
        .bind(client.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_duplicate_email(e, "insert"))?;

        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                first_name = $2,
                last_name = $3,
                email = $4,
                phone = $5,
                date_of_birth = $6,
                assigned_to = $7,
                notes = $8,
                status = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.date_of_birth)
        .bind(client.assigned_to.as_ref().map(|u| u.as_str()))
        .bind(&client.notes)
        .bind(status_to_str(client.status))
        .bind(client.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_duplicate_email(e, "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClientNotFound,
                format!("Client not found: {}", client.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let query = format!("SELECT {} FROM clients WHERE id = $1", CLIENT_COLUMNS);
        let row: Option<ClientRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch client: {}", e),
                )
            })?;

        row.map(Client::try_from).transpose()
    }

    async fn find_by_email(
        &self,
        clinic_id: &ClinicId,
        email: &str,
    ) -> Result<Option<Client>, DomainError> {
        let query = format!(
            "SELECT {} FROM clients WHERE clinic_id = $1 AND email = $2",
            CLIENT_COLUMNS
        );
        let row: Option<ClientRow> = sqlx::query_as(&query)
            .bind(clinic_id.as_uuid())
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch client by email: {}", e),
                )
            })?;

        row.map(Client::try_from).transpose()
    }

    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        status: Option<ClientStatus>,
    ) -> Result<Vec<Client>, DomainError> {
        let rows: Vec<ClientRow> = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {} FROM clients WHERE clinic_id = $1 AND status = $2 \
                     ORDER BY created_at DESC",
                    CLIENT_COLUMNS
                );
                sqlx::query_as(&query)
                    .bind(clinic_id.as_uuid())
                    .bind(status_to_str(status))
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {} FROM clients WHERE clinic_id = $1 ORDER BY created_at DESC",
                    CLIENT_COLUMNS
                );
                sqlx::query_as(&query)
                    .bind(clinic_id.as_uuid())
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list clients: {}", e),
            )
        })?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn count_non_inactive(&self, clinic_id: &ClinicId) -> Result<u32, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM clients WHERE clinic_id = $1 AND status <> 'inactive'",
        )
        .bind(clinic_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count clients: {}", e),
            )
        })?;

        Ok(result.0 as u32)
    }

    async fn list_recent(
        &self,
        clinic_id: &ClinicId,
        limit: u32,
    ) -> Result<Vec<Client>, DomainError> {
        let query = format!(
            "SELECT {} FROM clients WHERE clinic_id = $1 ORDER BY created_at DESC LIMIT $2",
            CLIENT_COLUMNS
        );
        let rows: Vec<ClientRow> = sqlx::query_as(&query)
            .bind(clinic_id.as_uuid())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list recent clients: {}", e),
                )
            })?;

        rows.into_iter().map(Client::try_from).collect()
    }
}
