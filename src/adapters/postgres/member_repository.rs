//! PostgreSQL implementation of MemberRepository.
//!
//! Membership rows are keyed on (clinic_id, user_id); the primary
//! key turns a duplicate add into `AlreadyExists`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::clinic::{ClinicMember, MemberRole};
use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::MemberRepository;

/// PostgreSQL implementation of the MemberRepository port.
#[derive(Clone)]
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a clinic membership.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    clinic_id: Uuid,
    user_id: String,
    role: String,
    display_name: Option<String>,
    email: String,
    joined_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for ClinicMember {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(ClinicMember {
            clinic_id: ClinicId::from_uuid(row.clinic_id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
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
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid member role: {}", s),
        )),
    }
}

fn role_to_str(role: MemberRole) -> &'static str {
    match role {
        MemberRole::Owner => "owner",
        MemberRole::Admin => "admin",
        MemberRole::Clinician => "clinician",
        MemberRole::Staff => "staff",
    }
}

/// Sort key matching the role hierarchy, owners first.
const ROLE_ORDER: &str = r#"
    CASE role
        WHEN 'owner' THEN 0
        WHEN 'admin' THEN 1
        WHEN 'clinician' THEN 2
        ELSE 3
    END
"#;

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &ClinicMember) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO clinic_members (
                clinic_id, user_id, role, display_name, email, joined_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(member.clinic_id.as_uuid())
        .bind(member.user_id.as_str())
        .bind(role_to_str(member.role))
        .bind(&member.display_name)
        .bind(&member.email)
        .bind(member.joined_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("clinic_members_pkey") {
                    return DomainError::new(
                        ErrorCode::AlreadyExists,
                        "User is already a member of this clinic",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert member: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<Option<ClinicMember>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
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
                format!("Failed to fetch member: {}", e),
            )
        })?;

        row.map(ClinicMember::try_from).transpose()
    }

    async fn list_for_clinic(
        &self,
        clinic_id: &ClinicId,
    ) -> Result<Vec<ClinicMember>, DomainError> {
        let query = format!(
            r#"
            SELECT clinic_id, user_id, role, display_name, email, joined_at
            FROM clinic_members
            WHERE clinic_id = $1
            ORDER BY {}, joined_at ASC
            "#,
            ROLE_ORDER
        );
        let rows: Vec<MemberRow> = sqlx::query_as(&query)
            .bind(clinic_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list members: {}", e),
                )
            })?;

        rows.into_iter().map(ClinicMember::try_from).collect()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ClinicMember>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT clinic_id, user_id, role, display_name, email, joined_at
            FROM clinic_members
            WHERE user_id = $1
            ORDER BY joined_at ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list memberships: {}", e),
            )
        })?;

        rows.into_iter().map(ClinicMember::try_from).collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_conversion_roundtrips() {
        for role in [
            MemberRole::Owner,
            MemberRole::Admin,
            MemberRole::Clinician,
            MemberRole::Staff,
        ] {
            assert_eq!(parse_role(role_to_str(role)).unwrap(), role);
        }
    }

    #[test]
    fn parse_role_rejects_invalid() {
        assert!(parse_role("janitor").is_err());
        assert!(parse_role("").is_err());
    }

    #[test]
    fn row_with_bad_role_fails_conversion() {
        let row = MemberRow {
            clinic_id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            role: "nope".to_string(),
            display_name: None,
            email: "a@b.example".to_string(),
            joined_at: Utc::now(),
        };
        assert!(ClinicMember::try_from(row).is_err());
    }
}
