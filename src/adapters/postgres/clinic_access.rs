//! PostgreSQL implementation of ClinicAccess.
//!
//! Database-backed membership checks for clinic-scoped endpoints.
//! Fails secure: a caller with no membership row is Forbidden, and a
//! lookup failure surfaces as DatabaseError rather than access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::clinic::{ClinicMember, MemberRole};
use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ClinicAccess;

/// PostgreSQL implementation of the ClinicAccess port.
#[derive(Clone)]
pub struct PostgresClinicAccess {
    pool: PgPool,
}

impl PostgresClinicAccess {
    /// Creates a new PostgresClinicAccess with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_membership(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<Option<ClinicMember>, DomainError> {
        let row: Option<AccessRow> = sqlx::query_as(
            r#"
            SELECT clinic_id, user_id, role, display_name, email, joined_at
            FROM clinic_members
            WHERE clinic_id = $1 AND user_id = $2
            "#,
        )
        .bind(clinic_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check membership: {}", e),
            )
        })?;

        row.map(ClinicMember::try_from).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccessRow {
    clinic_id: Uuid,
    user_id: String,
    role: String,
    display_name: Option<String>,
    email: String,
    joined_at: DateTime<Utc>,
}

impl TryFrom<AccessRow> for ClinicMember {
    type Error = DomainError;

    fn try_from(row: AccessRow) -> Result<Self, Self::Error> {
        Ok(ClinicMember {
            clinic_id: ClinicId::from_uuid(row.clinic_id),
            user_id: UserId::new(row.user_id)?,
            role: parse_role(&row.role)?,
            display_name: row.display_name,
            email: row.email,
            joined_at: Timestamp::from_datetime(row.joined_at),
        })
    }
}

fn parse_role(s: &str) -> Result<MemberRole, DomainError> {
    match s {
        "owner" => Ok(MemberRole::Owner),
        "admin" => Ok(MemberRole::Admin),
        "clinician" => Ok(MemberRole::Clinician),
        "staff" => Ok(MemberRole::Staff),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid member role: {}", other),
        )),
    }
}

#[async_trait]
impl ClinicAccess for PostgresClinicAccess {
    async fn require_member(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<ClinicMember, DomainError> {
        self.find_membership(clinic_id, user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::Forbidden, "Not a member of this clinic")
            })
    }

    async fn require_role(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
        role: MemberRole,
    ) -> Result<ClinicMember, DomainError> {
        let member = self.require_member(clinic_id, user_id).await?;
        if !member.role.at_least(role) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("Requires {} role or above", role),
            ));
        }
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_maps_onto_the_member() {
        let row = AccessRow {
            clinic_id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            role: "clinician".to_string(),
            display_name: None,
            email: "c@example.com".to_string(),
            joined_at: Utc::now(),
        };

        let member = ClinicMember::try_from(row).unwrap();
        assert_eq!(member.role, MemberRole::Clinician);
    }

    #[test]
    fn unknown_role_fails_conversion() {
        assert!(parse_role("superuser").is_err());
    }
}
