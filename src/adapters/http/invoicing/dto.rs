//! HTTP DTOs for invoicing endpoints.
//!
//! Line items cross the wire in snake_case like the rest of the API;
//! the aggregate's own serde representation is reserved for storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::invoicing::PublicInvoiceView;
use crate::domain::invoicing::{Invoice, InvoiceStatus, LineItem};

/// One line on an invoice, as sent and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDto {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

impl From<LineItem> for LineItemDto {
    fn from(item: LineItem) -> Self {
        Self {
            description: item.description,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total: item.total,
        }
    }
}

impl From<LineItemDto> for LineItem {
    fn from(dto: LineItemDto) -> Self {
        LineItem::new(dto.description, dto.quantity, dto.unit_price, dto.total)
    }
}

/// Request to draft an invoice.
///
/// Stated amounts are validated against the items server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_id: String,
    pub items: Vec<LineItemDto>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters for the invoice listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListInvoicesParams {
    #[serde(default)]
    pub client_id: Option<crate::domain::foundation::ClientId>,
}

/// An invoice as returned by the API.
///
/// The public token is included so members can share the pay link.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub clinic_id: String,
    pub client_id: String,
    pub items: Vec<LineItemDto>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    pub public_token: String,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub sent_at: Option<String>,
    pub paid_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.to_string(),
            clinic_id: invoice.clinic_id.to_string(),
            client_id: invoice.client_id.to_string(),
            items: invoice.items.into_iter().map(LineItemDto::from).collect(),
            subtotal: invoice.subtotal,
            tax: invoice.tax,
            total: invoice.total,
            status: invoice.status,
            public_token: invoice.public_token.to_string(),
            due_date: invoice.due_date.map(|t| t.as_datetime().to_rfc3339()),
            notes: invoice.notes,
            sent_at: invoice.sent_at.map(|t| t.as_datetime().to_rfc3339()),
            paid_at: invoice.paid_at.map(|t| t.as_datetime().to_rfc3339()),
            created_at: invoice.created_at.as_datetime().to_rfc3339(),
            updated_at: invoice.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for the invoice listing.
#[derive(Debug, Clone, Serialize)]
pub struct InvoicesResponse {
    pub invoices: Vec<InvoiceResponse>,
}

/// Response after emailing an invoice to its client.
#[derive(Debug, Clone, Serialize)]
pub struct SendInvoiceResponse {
    pub invoice: InvoiceResponse,
    pub delivered_to: String,
}

/// Unauthenticated view of an invoice behind its public token.
#[derive(Debug, Clone, Serialize)]
pub struct PublicInvoiceResponse {
    pub invoice: InvoiceResponse,
    pub clinic_name: String,
    pub client_name: String,
}

impl From<PublicInvoiceView> for PublicInvoiceResponse {
    fn from(view: PublicInvoiceView) -> Self {
        Self {
            invoice: InvoiceResponse::from(view.invoice),
            clinic_name: view.clinic_name,
            client_name: view.client_name,
        }
    }
}

/// Response after starting payment on a public invoice.
#[derive(Debug, Clone, Serialize)]
pub struct PayInvoiceResponse {
    pub payment_intent_id: String,
    pub client_secret: Option<String>,
    pub amount: f64,
}
