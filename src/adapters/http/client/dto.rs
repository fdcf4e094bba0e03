//! HTTP DTOs for client roster endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::client::{Client, ClientStatus};

/// Request to add a client to the roster.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to update a client. Absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClientRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<ClientStatus>,
}

/// Query parameters for the roster listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListClientsParams {
    #[serde(default)]
    pub status: Option<ClientStatus>,
}

/// A client as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: String,
    pub clinic_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub status: ClientStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id.to_string(),
            clinic_id: client.clinic_id.to_string(),
            first_name: client.first_name,
            last_name: client.last_name,
            email: client.email,
            phone: client.phone,
            date_of_birth: client.date_of_birth.map(|d| d.to_string()),
            assigned_to: client.assigned_to.map(|u| u.to_string()),
            notes: client.notes,
            status: client.status,
            created_at: client.created_at.as_datetime().to_rfc3339(),
            updated_at: client.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for client creation, including how much room the plan has
/// left. `remaining_slots` is absent on unlimited plans.
#[derive(Debug, Clone, Serialize)]
pub struct CreateClientResponse {
    pub client: ClientResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_slots: Option<u32>,
}

/// Response for the roster listing.
#[derive(Debug, Clone, Serialize)]
pub struct ClientsResponse {
    pub clients: Vec<ClientResponse>,
}
