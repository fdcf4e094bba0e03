//! ListInvoicesHandler - lists a clinic's invoices, newest first.

use std::sync::Arc;

use crate::domain::foundation::{ClientId, ClinicId};
use crate::domain::invoicing::{Invoice, InvoicingError};
use crate::ports::InvoiceRepository;

/// Query to list invoices.
#[derive(Debug, Clone)]
pub struct ListInvoicesQuery {
    pub clinic_id: ClinicId,
    /// Narrow the listing to one client.
    pub client_id: Option<ClientId>,
}

/// Handler for listing invoices.
pub struct ListInvoicesHandler {
    invoices: Arc<dyn InvoiceRepository>,
}

impl ListInvoicesHandler {
    pub fn new(invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoices }
    }

    pub async fn handle(&self, query: ListInvoicesQuery) -> Result<Vec<Invoice>, InvoicingError> {
        let mut invoices = self.invoices.list_by_clinic(&query.clinic_id).await?;
        if let Some(client_id) = query.client_id {
            invoices.retain(|i| i.client_id == client_id);
        }
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockInvoiceRepository;
    use crate::domain::invoicing::LineItem;

    fn invoice(clinic_id: ClinicId, client_id: ClientId, total: f64) -> Invoice {
        let items = vec![LineItem::new("Session", 1.0, total, total)];
        Invoice::create(clinic_id, client_id, items, total, 0.0, total).unwrap()
    }

    #[tokio::test]
    async fn lists_only_the_clinics_invoices() {
        let clinic_id = ClinicId::new();
        let client_id = ClientId::new();
        let invoices = Arc::new(MockInvoiceRepository::new());
        invoices
            .save(&invoice(clinic_id, client_id, 50.0))
            .await
            .unwrap();
        invoices
            .save(&invoice(ClinicId::new(), ClientId::new(), 75.0))
            .await
            .unwrap();
        let handler = ListInvoicesHandler::new(invoices);

        let listed = handler
            .handle(ListInvoicesQuery {
                clinic_id,
                client_id: None,
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].total, 50.0);
    }

    #[tokio::test]
    async fn narrows_to_one_client() {
        let clinic_id = ClinicId::new();
        let client_id = ClientId::new();
        let invoices = Arc::new(MockInvoiceRepository::new());
        invoices
            .save(&invoice(clinic_id, client_id, 50.0))
            .await
            .unwrap();
        invoices
            .save(&invoice(clinic_id, ClientId::new(), 75.0))
            .await
            .unwrap();
        let handler = ListInvoicesHandler::new(invoices);

        let listed = handler
            .handle(ListInvoicesQuery {
                clinic_id,
                client_id: Some(client_id),
            })
            .await
            .unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].client_id, client_id);
    }
}
