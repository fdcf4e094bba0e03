//! HTTP handlers for the client roster.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::client::{
    ArchiveClientCommand, ArchiveClientHandler, CreateClientCommand, CreateClientHandler,
    GetClientHandler, GetClientQuery, ListClientsHandler, ListClientsQuery, UpdateClientCommand,
    UpdateClientHandler,
};
use crate::domain::foundation::{ClientId, ClinicId};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    ClientResponse, ClientsResponse, CreateClientRequest, CreateClientResponse, ListClientsParams,
    UpdateClientRequest,
};

/// POST /api/clinics/:id/clients - Add a client (plan limit enforced)
pub async fn create_client(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Json(request): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = CreateClientHandler::new(
        state.clients.clone(),
        state.subscriptions.clone(),
        state.plans.clone(),
    );
    let cmd = CreateClientCommand {
        clinic_id,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone: request.phone,
        notes: request.notes,
    };

    let result = handler.handle(cmd).await?;

    let response = CreateClientResponse {
        client: ClientResponse::from(result.client),
        remaining_slots: result.remaining_slots,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/clinics/:id/clients - List the roster, optionally by status
pub async fn list_clients(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Query(params): Query<ListClientsParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = ListClientsHandler::new(state.clients.clone());
    let query = ListClientsQuery {
        clinic_id,
        status: params.status,
    };

    let result = handler.handle(query).await?;

    let response = ClientsResponse {
        clients: result.clients.into_iter().map(ClientResponse::from).collect(),
    };

    Ok(Json(response))
}

/// GET /api/clinics/:id/clients/:cid - Fetch one client
pub async fn get_client(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((clinic_id, client_id)): Path<(ClinicId, ClientId)>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = GetClientHandler::new(state.clients.clone());
    let result = handler
        .handle(GetClientQuery {
            clinic_id,
            client_id,
        })
        .await?;

    Ok(Json(ClientResponse::from(result.client)))
}

/// PUT /api/clinics/:id/clients/:cid - Update client details
pub async fn update_client(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((clinic_id, client_id)): Path<(ClinicId, ClientId)>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = UpdateClientHandler::new(state.clients.clone());
    let cmd = UpdateClientCommand {
        clinic_id,
        client_id,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone: request.phone,
        notes: request.notes,
        status: request.status,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(ClientResponse::from(result.client)))
}

/// DELETE /api/clinics/:id/clients/:cid - Archive a client
pub async fn archive_client(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((clinic_id, client_id)): Path<(ClinicId, ClientId)>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = ArchiveClientHandler::new(state.clients.clone());
    handler
        .handle(ArchiveClientCommand {
            clinic_id,
            client_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
