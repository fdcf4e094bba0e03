//! GetClientHandler - Query handler for loading one client.

use std::sync::Arc;

use crate::domain::client::{Client, ClientError};
use crate::domain::foundation::{ClientId, ClinicId};
use crate::ports::ClientRepository;

/// Query for a single client.
#[derive(Debug, Clone)]
pub struct GetClientQuery {
    pub clinic_id: ClinicId,
    pub client_id: ClientId,
}

/// Result of a client lookup.
#[derive(Debug, Clone)]
pub struct GetClientResult {
    pub client: Client,
}

/// Handler for client lookups.
pub struct GetClientHandler {
    clients: Arc<dyn ClientRepository>,
}

impl GetClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(&self, query: GetClientQuery) -> Result<GetClientResult, ClientError> {
        let client = self
            .clients
            .find_by_id(&query.client_id)
            .await?
            // A client from another clinic is indistinguishable from
            // a missing one.
            .filter(|c| c.clinic_id == query.clinic_id)
            .ok_or(ClientError::NotFound(query.client_id))?;

        Ok(GetClientResult { client })
    }
}
