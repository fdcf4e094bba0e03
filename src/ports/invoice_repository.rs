//! Invoice repository port.

use crate::domain::foundation::{ClientId, ClinicId, DomainError, InvoiceId};
use crate::domain::invoicing::{Invoice, PublicToken};
use async_trait::async_trait;

/// Repository port for Invoice aggregate persistence.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Save a new invoice.
    async fn save(&self, invoice: &Invoice) -> Result<(), DomainError>;

    /// Update an existing invoice.
    ///
    /// # Errors
    ///
    /// - `InvoiceNotFound` if it doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, invoice: &Invoice) -> Result<(), DomainError>;

    /// Find an invoice by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, DomainError>;

    /// Find an invoice by its public token. The unauthenticated
    /// view-and-pay path resolves invoices only this way.
    async fn find_by_public_token(
        &self,
        token: &PublicToken,
    ) -> Result<Option<Invoice>, DomainError>;

    /// Find the invoice linked to a payment intent.
    async fn find_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<Invoice>, DomainError>;

    /// List a clinic's invoices, newest first.
    async fn list_by_clinic(&self, clinic_id: &ClinicId) -> Result<Vec<Invoice>, DomainError>;

    /// List a client's invoices, newest first.
    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Invoice>, DomainError>;
}
