//! GetPublicInvoiceHandler - unauthenticated invoice view by token.
//!
//! The token is the only credential. Malformed and unknown tokens get
//! the same answer so the endpoint leaks nothing about which tokens
//! exist.

use std::sync::Arc;

use crate::domain::invoicing::{Invoice, InvoicingError, PublicToken};
use crate::ports::{ClientRepository, ClinicRepository, InvoiceRepository};

/// Query to view an invoice by its public token.
#[derive(Debug, Clone)]
pub struct GetPublicInvoiceQuery {
    pub token: String,
}

/// What the public invoice page shows.
#[derive(Debug, Clone)]
pub struct PublicInvoiceView {
    pub invoice: Invoice,
    pub clinic_name: String,
    pub client_name: String,
}

/// Handler for the public invoice view.
pub struct GetPublicInvoiceHandler {
    invoices: Arc<dyn InvoiceRepository>,
    clinics: Arc<dyn ClinicRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl GetPublicInvoiceHandler {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        clinics: Arc<dyn ClinicRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            invoices,
            clinics,
            clients,
        }
    }

    pub async fn handle(
        &self,
        query: GetPublicInvoiceQuery,
    ) -> Result<PublicInvoiceView, InvoicingError> {
        let token =
            PublicToken::parse(query.token).map_err(|_| InvoicingError::token_not_found())?;
        let invoice = self
            .invoices
            .find_by_public_token(&token)
            .await?
            .ok_or_else(InvoicingError::token_not_found)?;

        let clinic = self
            .clinics
            .find_by_id(&invoice.clinic_id)
            .await?
            .ok_or_else(|| InvoicingError::infrastructure("invoice references a missing clinic"))?;
        let client = self
            .clients
            .find_by_id(&invoice.client_id)
            .await?
            .ok_or_else(|| InvoicingError::infrastructure("invoice references a missing client"))?;

        Ok(PublicInvoiceView {
            invoice,
            clinic_name: clinic.name,
            client_name: client.full_name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockClientRepository, MockClinicRepository, MockInvoiceRepository,
    };
    use crate::domain::client::Client;
    use crate::domain::clinic::Clinic;
    use crate::domain::invoicing::LineItem;

    fn handler_with_invoice() -> (GetPublicInvoiceHandler, String) {
        let clinic = Clinic::create("North Shore Therapy", "hello@northshore.example").unwrap();
        let client = Client::create(clinic.id, "Maya", "Singh", "maya@example.com").unwrap();
        let items = vec![LineItem::new("Consultation", 1.0, 80.0, 80.0)];
        let invoice = Invoice::create(clinic.id, client.id, items, 80.0, 8.0, 88.0).unwrap();
        let token = invoice.public_token.to_string();

        let handler = GetPublicInvoiceHandler::new(
            Arc::new(MockInvoiceRepository::with_invoice(invoice)),
            Arc::new(MockClinicRepository::with_clinic(clinic)),
            Arc::new(MockClientRepository::with_clients(vec![client])),
        );
        (handler, token)
    }

    #[tokio::test]
    async fn shows_the_invoice_with_both_names() {
        let (handler, token) = handler_with_invoice();

        let view = handler
            .handle(GetPublicInvoiceQuery { token })
            .await
            .unwrap();

        assert_eq!(view.clinic_name, "North Shore Therapy");
        assert_eq!(view.client_name, "Maya Singh");
        assert_eq!(view.invoice.total, 88.0);
    }

    #[tokio::test]
    async fn unknown_token_reads_as_not_found() {
        let (handler, _) = handler_with_invoice();

        let err = handler
            .handle(GetPublicInvoiceQuery {
                token: "a".repeat(64),
            })
            .await
            .unwrap_err();

        assert_eq!(err, InvoicingError::TokenNotFound);
        assert_eq!(err.message(), "Invoice not found");
    }

    #[tokio::test]
    async fn malformed_token_is_not_echoed_back() {
        let (handler, _) = handler_with_invoice();

        let err = handler
            .handle(GetPublicInvoiceQuery {
                token: "../../../etc/passwd".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, InvoicingError::TokenNotFound);
        assert!(!err.message().contains("etc"));
    }
}
