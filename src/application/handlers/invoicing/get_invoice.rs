//! GetInvoiceHandler - fetches one invoice scoped to a clinic.

use std::sync::Arc;

use crate::domain::foundation::{ClinicId, InvoiceId};
use crate::domain::invoicing::{Invoice, InvoicingError};
use crate::ports::InvoiceRepository;

/// Query to fetch an invoice.
#[derive(Debug, Clone)]
pub struct GetInvoiceQuery {
    pub clinic_id: ClinicId,
    pub invoice_id: InvoiceId,
}

/// Handler for fetching an invoice.
pub struct GetInvoiceHandler {
    invoices: Arc<dyn InvoiceRepository>,
}

impl GetInvoiceHandler {
    pub fn new(invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoices }
    }

    pub async fn handle(&self, query: GetInvoiceQuery) -> Result<Invoice, InvoicingError> {
        // An invoice from another clinic is indistinguishable from a
        // missing one.
        self.invoices
            .find_by_id(&query.invoice_id)
            .await?
            .filter(|i| i.clinic_id == query.clinic_id)
            .ok_or(InvoicingError::NotFound(query.invoice_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockInvoiceRepository;
    use crate::domain::foundation::ClientId;
    use crate::domain::invoicing::LineItem;

    fn invoice_for(clinic_id: ClinicId) -> Invoice {
        let items = vec![LineItem::new("Consultation", 1.0, 80.0, 80.0)];
        Invoice::create(clinic_id, ClientId::new(), items, 80.0, 8.0, 88.0).unwrap()
    }

    #[tokio::test]
    async fn returns_the_invoice() {
        let clinic_id = ClinicId::new();
        let invoice = invoice_for(clinic_id);
        let invoice_id = invoice.id;
        let handler = GetInvoiceHandler::new(Arc::new(MockInvoiceRepository::with_invoice(invoice)));

        let found = handler
            .handle(GetInvoiceQuery {
                clinic_id,
                invoice_id,
            })
            .await
            .unwrap();

        assert_eq!(found.id, invoice_id);
    }

    #[tokio::test]
    async fn another_clinics_invoice_reads_as_missing() {
        let invoice = invoice_for(ClinicId::new());
        let invoice_id = invoice.id;
        let handler = GetInvoiceHandler::new(Arc::new(MockInvoiceRepository::with_invoice(invoice)));

        let err = handler
            .handle(GetInvoiceQuery {
                clinic_id: ClinicId::new(),
                invoice_id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, InvoicingError::NotFound(invoice_id));
    }

    #[tokio::test]
    async fn missing_invoice_is_not_found() {
        let handler = GetInvoiceHandler::new(Arc::new(MockInvoiceRepository::new()));

        let err = handler
            .handle(GetInvoiceQuery {
                clinic_id: ClinicId::new(),
                invoice_id: InvoiceId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InvoicingError::NotFound(_)));
    }
}
