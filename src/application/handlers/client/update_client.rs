//! UpdateClientHandler - Command handler for editing a client.

use std::sync::Arc;

use crate::domain::client::{normalize_email, Client, ClientError, ClientStatus};
use crate::domain::foundation::{ClientId, ClinicId, ErrorCode};
use crate::ports::ClientRepository;

/// Command to edit a client. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientCommand {
    pub clinic_id: ClinicId,
    pub client_id: ClientId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub status: Option<ClientStatus>,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateClientResult {
    pub client: Client,
}

/// Handler for client updates.
pub struct UpdateClientHandler {
    clients: Arc<dyn ClientRepository>,
}

impl UpdateClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(&self, cmd: UpdateClientCommand) -> Result<UpdateClientResult, ClientError> {
        // 1. Load the client, scoped to the clinic
        let mut client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .filter(|c| c.clinic_id == cmd.clinic_id)
            .ok_or(ClientError::NotFound(cmd.client_id))?;

        // 2. An email change must stay unique within the clinic
        if let Some(email) = cmd.email {
            let email = normalize_email(email);
            if email != client.email {
                if let Some(other) = self.clients.find_by_email(&cmd.clinic_id, &email).await? {
                    if other.id != client.id {
                        return Err(ClientError::duplicate_email(cmd.clinic_id, email));
                    }
                }
                client
                    .change_email(email)
                    .map_err(|e| ClientError::validation(e.field(), e.to_string()))?;
            }
        }

        // 3. Apply the remaining edits
        client
            .update_details(cmd.first_name, cmd.last_name, cmd.phone, cmd.notes)
            .map_err(|e| ClientError::validation(e.field(), e.to_string()))?;
        if let Some(status) = cmd.status {
            client.set_status(status);
        }

        // 4. Persist, letting the unique constraint catch races
        if let Err(err) = self.clients.update(&client).await {
            if err.code == ErrorCode::DuplicateEmail {
                return Err(ClientError::duplicate_email(
                    cmd.clinic_id,
                    client.email.clone(),
                ));
            }
            return Err(err.into());
        }

        Ok(UpdateClientResult { client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockClientRepository;

    fn seeded(clinic_id: ClinicId) -> (Client, Arc<MockClientRepository>) {
        let client = Client::create(clinic_id, "Avery", "Quinn", "avery@example.com").unwrap();
        let repo = Arc::new(MockClientRepository::with_clients(vec![client.clone()]));
        (client, repo)
    }

    #[tokio::test]
    async fn updates_details_in_place() {
        let clinic_id = ClinicId::new();
        let (client, repo) = seeded(clinic_id);
        let handler = UpdateClientHandler::new(repo.clone());

        let result = handler
            .handle(UpdateClientCommand {
                clinic_id,
                client_id: client.id,
                phone: Some("555-0100".to_string()),
                status: Some(ClientStatus::Waitlist),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.client.phone.as_deref(), Some("555-0100"));
        assert_eq!(result.client.status, ClientStatus::Waitlist);
        assert_eq!(repo.saved()[0].status, ClientStatus::Waitlist);
    }

    #[tokio::test]
    async fn changes_email_with_normalization() {
        let clinic_id = ClinicId::new();
        let (client, repo) = seeded(clinic_id);
        let handler = UpdateClientHandler::new(repo);

        let result = handler
            .handle(UpdateClientCommand {
                clinic_id,
                client_id: client.id,
                email: Some("NEW@Example.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.client.email, "new@example.com");
    }

    #[tokio::test]
    async fn rejects_email_already_used_by_another_client() {
        let clinic_id = ClinicId::new();
        let first = Client::create(clinic_id, "Avery", "Quinn", "avery@example.com").unwrap();
        let second = Client::create(clinic_id, "Blake", "Reed", "blake@example.com").unwrap();
        let second_id = second.id;
        let handler = UpdateClientHandler::new(Arc::new(MockClientRepository::with_clients(
            vec![first, second],
        )));

        let result = handler
            .handle(UpdateClientCommand {
                clinic_id,
                client_id: second_id,
                email: Some("avery@example.com".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ClientError::DuplicateEmail { .. })));
    }

    #[tokio::test]
    async fn keeping_own_email_is_not_a_conflict() {
        let clinic_id = ClinicId::new();
        let (client, repo) = seeded(clinic_id);
        let handler = UpdateClientHandler::new(repo);

        let result = handler
            .handle(UpdateClientCommand {
                clinic_id,
                client_id: client.id,
                email: Some("Avery@Example.com".to_string()),
                ..Default::default()
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn cannot_update_client_of_another_clinic() {
        let (client, repo) = seeded(ClinicId::new());
        let handler = UpdateClientHandler::new(repo);

        let result = handler
            .handle(UpdateClientCommand {
                clinic_id: ClinicId::new(),
                client_id: client.id,
                notes: Some("peeking".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ClientError::NotFound(_))));
    }
}
