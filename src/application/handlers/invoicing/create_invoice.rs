//! CreateInvoiceHandler - creates a draft invoice for a client.
//!
//! Arithmetic validation and public-token generation happen inside
//! `Invoice::create`; this handler contributes the tenant check and
//! persistence.

use std::sync::Arc;

use crate::domain::foundation::{ClientId, ClinicId, Timestamp};
use crate::domain::invoicing::{Invoice, InvoicingError, LineItem};
use crate::ports::{ClientRepository, InvoiceRepository};

/// Command to create an invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceCommand {
    pub clinic_id: ClinicId,
    pub client_id: ClientId,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub due_date: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Handler for creating invoices.
pub struct CreateInvoiceHandler {
    invoices: Arc<dyn InvoiceRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl CreateInvoiceHandler {
    pub fn new(invoices: Arc<dyn InvoiceRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { invoices, clients }
    }

    pub async fn handle(&self, cmd: CreateInvoiceCommand) -> Result<Invoice, InvoicingError> {
        // 1. The billed client must belong to the clinic
        let client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .filter(|c| c.clinic_id == cmd.clinic_id)
            .ok_or_else(|| {
                InvoicingError::validation("client_id", "client does not belong to this clinic")
            })?;

        // 2. Validate the arithmetic and mint the public token
        let mut invoice = Invoice::create(
            cmd.clinic_id,
            client.id,
            cmd.items,
            cmd.subtotal,
            cmd.tax,
            cmd.total,
        )?;
        invoice.set_due_date(cmd.due_date)?;
        invoice.set_notes(cmd.notes)?;

        // 3. Persist
        self.invoices.save(&invoice).await?;

        Ok(invoice)
    }
}
