//! Client roster command and query handlers.

mod archive_client;
mod create_client;
mod get_client;
mod list_clients;
mod update_client;

pub use archive_client::{ArchiveClientCommand, ArchiveClientHandler, ArchiveClientResult};
pub use create_client::{CreateClientCommand, CreateClientHandler, CreateClientResult};
pub use get_client::{GetClientHandler, GetClientQuery, GetClientResult};
pub use list_clients::{ListClientsHandler, ListClientsQuery, ListClientsResult};
pub use update_client::{UpdateClientCommand, UpdateClientHandler, UpdateClientResult};
