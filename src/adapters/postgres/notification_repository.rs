//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    ClinicId, DomainError, ErrorCode, NotificationId, Timestamp, UserId,
};
use crate::domain::notification::{Notification, NotificationKind};
use crate::ports::NotificationRepository;

/// PostgreSQL implementation of the NotificationRepository port.
#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new PostgresNotificationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, clinic_id, kind, title, body, read, read_at, created_at";

/// Database row representation of a notification.
#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: String,
    clinic_id: Uuid,
    kind: String,
    title: String,
    body: String,
    read: bool,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: NotificationId::from_uuid(row.id),
            user_id: UserId::new(row.user_id)?,
            clinic_id: ClinicId::from_uuid(row.clinic_id),
            kind: parse_kind(&row.kind)?,
            title: row.title,
            body: row.body,
            read: row.read,
            read_at: row.read_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_kind(s: &str) -> Result<NotificationKind, DomainError> {
    match s {
        "appointment" => Ok(NotificationKind::Appointment),
        "invoice" => Ok(NotificationKind::Invoice),
        "billing" => Ok(NotificationKind::Billing),
        "system" => Ok(NotificationKind::System),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid notification kind: {}", other),
        )),
    }
}

fn kind_to_str(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Appointment => "appointment",
        NotificationKind::Invoice => "invoice",
        NotificationKind::Billing => "billing",
        NotificationKind::System => "system",
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, user_id, clinic_id, kind, title, body, read, read_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.user_id.as_str())
        .bind(notification.clinic_id.as_uuid())
        .bind(kind_to_str(notification.kind))
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(notification.read)
        .bind(notification.read_at.map(|t| *t.as_datetime()))
        .bind(notification.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert notification: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET
                read = $2,
                read_at = $3
            WHERE id = $1
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.read)
        .bind(notification.read_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update notification: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", notification.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, DomainError> {
        let query = format!(
            "SELECT {} FROM notifications WHERE id = $1",
            NOTIFICATION_COLUMNS
        );
        let row: Option<NotificationRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch notification: {}", e),
                )
            })?;

        row.map(Notification::try_from).transpose()
    }

    async fn list_for_user(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DomainError> {
        let query = format!(
            "SELECT {} FROM notifications \
             WHERE clinic_id = $1 AND user_id = $2 AND (NOT $3 OR NOT read) \
             ORDER BY created_at DESC",
            NOTIFICATION_COLUMNS
        );
        let rows: Vec<NotificationRow> = sqlx::query_as(&query)
            .bind(clinic_id.as_uuid())
            .bind(user_id.as_str())
            .bind(unread_only)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list notifications: {}", e),
                )
            })?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn mark_all_read(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET
                read = TRUE,
                read_at = $3
            WHERE clinic_id = $1 AND user_id = $2 AND NOT read
            "#,
        )
        .bind(clinic_id.as_uuid())
        .bind(user_id.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to mark notifications read: {}", e),
            )
        })?;

        Ok(result.rows_affected())
    }
}
