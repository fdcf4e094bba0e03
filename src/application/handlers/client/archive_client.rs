//! ArchiveClientHandler - Command handler for retiring a client.
//!
//! Archiving sets the client inactive rather than deleting the row, so
//! invoices and appointment history stay attached. Inactive clients no
//! longer count toward the plan's client limit.

use std::sync::Arc;

use crate::domain::client::{Client, ClientError};
use crate::domain::foundation::{ClientId, ClinicId};
use crate::ports::ClientRepository;

/// Command to archive a client.
#[derive(Debug, Clone)]
pub struct ArchiveClientCommand {
    pub clinic_id: ClinicId,
    pub client_id: ClientId,
}

/// Result of archiving.
#[derive(Debug, Clone)]
pub struct ArchiveClientResult {
    pub client: Client,
}

/// Handler for archiving clients.
pub struct ArchiveClientHandler {
    clients: Arc<dyn ClientRepository>,
}

impl ArchiveClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(
        &self,
        cmd: ArchiveClientCommand,
    ) -> Result<ArchiveClientResult, ClientError> {
        let mut client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .filter(|c| c.clinic_id == cmd.clinic_id)
            .ok_or(ClientError::NotFound(cmd.client_id))?;

        client.archive();
        self.clients.update(&client).await?;

        Ok(ArchiveClientResult { client })
    }
}
