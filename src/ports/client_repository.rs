//! Client repository port.

use crate::domain::client::{Client, ClientStatus};
use crate::domain::foundation::{ClientId, ClinicId, DomainError};
use async_trait::async_trait;

/// Repository port for Client aggregate persistence.
///
/// Implementations must back the per-clinic email uniqueness rule with
/// a real constraint: the duplicate check here is advisory, the
/// constraint is what holds under concurrency.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Save a new client.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if the clinic already has a client with this email
    /// - `DatabaseError` on persistence failure
    async fn save(&self, client: &Client) -> Result<(), DomainError>;

    /// Update an existing client.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if the client doesn't exist
    /// - `DuplicateEmail` if an email change collides
    /// - `DatabaseError` on persistence failure
    async fn update(&self, client: &Client) -> Result<(), DomainError>;

    /// Find a client by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    /// Find a client by normalized email within a clinic.
    async fn find_by_email(
        &self,
        clinic_id: &ClinicId,
        email: &str,
    ) -> Result<Option<Client>, DomainError>;

    /// List a clinic's clients, optionally filtered by status, newest first.
    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        status: Option<ClientStatus>,
    ) -> Result<Vec<Client>, DomainError>;

    /// Count clients that occupy a slot against the plan limit, i.e.
    /// every client whose status is not inactive.
    async fn count_non_inactive(&self, clinic_id: &ClinicId) -> Result<u32, DomainError>;

    /// Most recently added clients for the assistant context.
    async fn list_recent(
        &self,
        clinic_id: &ClinicId,
        limit: u32,
    ) -> Result<Vec<Client>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ClientRepository) {}
    }
}
