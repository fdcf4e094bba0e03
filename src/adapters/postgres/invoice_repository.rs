//! PostgreSQL implementation of InvoiceRepository.
//!
//! Line items ride along as a JSONB column rather than a child table.
//! They are only ever read and written as a unit with the invoice, and
//! the amount checks live in the domain layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    ClientId, ClinicId, DomainError, ErrorCode, InvoiceId, Timestamp,
};
use crate::domain::invoicing::{Invoice, InvoiceStatus, LineItem, PublicToken};
use crate::ports::InvoiceRepository;

/// PostgreSQL implementation of the InvoiceRepository port.
#[derive(Clone)]
pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    /// Creates a new PostgresInvoiceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INVOICE_COLUMNS: &str = "id, clinic_id, client_id, items, subtotal, tax, total, status, \
     public_token, payment_intent_id, due_date, notes, sent_at, paid_at, created_at, updated_at";

/// Database row representation of an invoice.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    clinic_id: Uuid,
    client_id: Uuid,
    items: serde_json::Value,
    subtotal: f64,
    tax: f64,
    total: f64,
    status: String,
    public_token: String,
    payment_intent_id: Option<String>,
    due_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    sent_at: Option<DateTime<Utc>>,
    paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = DomainError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let items: Vec<LineItem> = serde_json::from_value(row.items).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid line items: {}", e),
            )
        })?;
        let public_token = PublicToken::parse(row.public_token).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid public token: {}", e),
            )
        })?;

        Ok(Invoice {
            id: InvoiceId::from_uuid(row.id),
            clinic_id: ClinicId::from_uuid(row.clinic_id),
            client_id: ClientId::from_uuid(row.client_id),
            items,
            subtotal: row.subtotal,
            tax: row.tax,
            total: row.total,
            status: parse_status(&row.status)?,
            public_token,
            payment_intent_id: row.payment_intent_id,
            due_date: row.due_date.map(Timestamp::from_datetime),
            notes: row.notes,
            sent_at: row.sent_at.map(Timestamp::from_datetime),
            paid_at: row.paid_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<InvoiceStatus, DomainError> {
    match s {
        "draft" => Ok(InvoiceStatus::Draft),
        "sent" => Ok(InvoiceStatus::Sent),
        "paid" => Ok(InvoiceStatus::Paid),
        "void" => Ok(InvoiceStatus::Void),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid invoice status: {}", other),
        )),
    }
}

fn status_to_str(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Draft => "draft",
        InvoiceStatus::Sent => "sent",
        InvoiceStatus::Paid => "paid",
        InvoiceStatus::Void => "void",
    }
}

fn items_to_json(items: &[LineItem]) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(items).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to serialize line items: {}", e),
        )
    })
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn save(&self, invoice: &Invoice) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, clinic_id, client_id, items, subtotal, tax, total, status,
                public_token, payment_intent_id, due_date, notes,
                sent_at, paid_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(invoice.clinic_id.as_uuid())
        .bind(invoice.client_id.as_uuid())
        .bind(items_to_json(&invoice.items)?)
        .bind(invoice.subtotal)
        .bind(invoice.tax)
        .bind(invoice.total)
        .bind(status_to_str(invoice.status))
        .bind(invoice.public_token.as_str())
        .bind(&invoice.payment_intent_id)
        .bind(invoice.due_date.map(|t| *t.as_datetime()))
        .bind(&invoice.notes)
        .bind(invoice.sent_at.map(|t| *t.as_datetime()))
        .bind(invoice.paid_at.map(|t| *t.as_datetime()))
        .bind(invoice.created_at.as_datetime())
        .bind(invoice.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert invoice: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                items = $2,
                subtotal = $3,
                tax = $4,
                total = $5,
                status = $6,
                payment_intent_id = $7,
                due_date = $8,
                notes = $9,
                sent_at = $10,
                paid_at = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(items_to_json(&invoice.items)?)
        .bind(invoice.subtotal)
        .bind(invoice.tax)
        .bind(invoice.total)
        .bind(status_to_str(invoice.status))
        .bind(&invoice.payment_intent_id)
        .bind(invoice.due_date.map(|t| *t.as_datetime()))
        .bind(&invoice.notes)
        .bind(invoice.sent_at.map(|t| *t.as_datetime()))
        .bind(invoice.paid_at.map(|t| *t.as_datetime()))
        .bind(invoice.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update invoice: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InvoiceNotFound,
                format!("Invoice not found: {}", invoice.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, DomainError> {
        let query = format!("SELECT {} FROM invoices WHERE id = $1", INVOICE_COLUMNS);
        let row: Option<InvoiceRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch invoice: {}", e),
                )
            })?;

        row.map(Invoice::try_from).transpose()
    }

    async fn find_by_public_token(
        &self,
        token: &PublicToken,
    ) -> Result<Option<Invoice>, DomainError> {
        let query = format!(
            "SELECT {} FROM invoices WHERE public_token = $1",
            INVOICE_COLUMNS
        );
        let row: Option<InvoiceRow> = sqlx::query_as(&query)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch invoice by token: {}", e),
                )
            })?;

        row.map(Invoice::try_from).transpose()
    }

    async fn find_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<Invoice>, DomainError> {
        let query = format!(
            "SELECT {} FROM invoices WHERE payment_intent_id = $1",
            INVOICE_COLUMNS
        );
        let row: Option<InvoiceRow> = sqlx::query_as(&query)
            .bind(payment_intent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch invoice by payment intent: {}", e),
                )
            })?;

        row.map(Invoice::try_from).transpose()
    }

    async fn list_by_clinic(&self, clinic_id: &ClinicId) -> Result<Vec<Invoice>, DomainError> {
        let query = format!(
            "SELECT {} FROM invoices WHERE clinic_id = $1 ORDER BY created_at DESC",
            INVOICE_COLUMNS
        );
        let rows: Vec<InvoiceRow> = sqlx::query_as(&query)
            .bind(clinic_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list clinic invoices: {}", e),
                )
            })?;

        rows.into_iter().map(Invoice::try_from).collect()
    }

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Invoice>, DomainError> {
        let query = format!(
            "SELECT {} FROM invoices WHERE client_id = $1 ORDER BY created_at DESC",
            INVOICE_COLUMNS
        );
        let rows: Vec<InvoiceRow> = sqlx::query_as(&query)
            .bind(client_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list client invoices: {}", e),
                )
            })?;

        rows.into_iter().map(Invoice::try_from).collect()
    }
}
