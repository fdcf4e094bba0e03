//! ListClientsHandler - Query handler for a clinic's client roster.

use std::sync::Arc;

use crate::domain::client::{Client, ClientError, ClientStatus};
use crate::domain::foundation::ClinicId;
use crate::ports::ClientRepository;

/// Query for a clinic's clients, optionally filtered by status.
#[derive(Debug, Clone)]
pub struct ListClientsQuery {
    pub clinic_id: ClinicId,
    pub status: Option<ClientStatus>,
}

/// Result of a roster listing.
#[derive(Debug, Clone)]
pub struct ListClientsResult {
    pub clients: Vec<Client>,
}

/// Handler for roster listings.
pub struct ListClientsHandler {
    clients: Arc<dyn ClientRepository>,
}

impl ListClientsHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(&self, query: ListClientsQuery) -> Result<ListClientsResult, ClientError> {
        let clients = self
            .clients
            .list_by_clinic(&query.clinic_id, query.status)
            .await?;

        Ok(ListClientsResult { clients })
    }
}
