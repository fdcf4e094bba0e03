//! HTTP handlers for the AI assistant.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::assistant::{
    AskAssistantCommand, AskAssistantHandler, DraftClientEmailCommand, DraftClientEmailHandler,
};
use crate::domain::foundation::{ClientId, ClinicId, DomainError};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AskAssistantRequest, AskAssistantResponse, DraftEmailRequest, DraftEmailResponse,
};

/// POST /api/clinics/:id/assistant/ask - Ask about the practice
///
/// Gated on the plan's assistant feature.
pub async fn ask_assistant(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Json(request): Json<AskAssistantRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = AskAssistantHandler::new(
        state.assistant.clone(),
        state.clinics.clone(),
        state.clients.clone(),
        state.appointments.clone(),
        state.service_types.clone(),
        state.subscriptions.clone(),
        state.plans.clone(),
    );
    let cmd = AskAssistantCommand {
        clinic_id,
        question: request.question,
        history: request.history,
    };

    let result = handler.handle(cmd).await?;

    let response = AskAssistantResponse {
        reply: result.reply,
        history: result.history,
    };

    Ok(Json(response))
}

/// POST /api/clinics/:id/assistant/draft-email - Draft a client email
pub async fn draft_client_email(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Json(request): Json<DraftEmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let client_id: ClientId = request
        .client_id
        .parse()
        .map_err(|_| DomainError::validation("client_id", "must be a UUID"))?;

    let handler = DraftClientEmailHandler::new(
        state.assistant.clone(),
        state.clinics.clone(),
        state.clients.clone(),
        state.subscriptions.clone(),
        state.plans.clone(),
    );
    let cmd = DraftClientEmailCommand {
        clinic_id,
        client_id,
        instructions: request.instructions,
    };

    let result = handler.handle(cmd).await?;

    let response = DraftEmailResponse {
        draft: result.draft,
        client_email: result.client_email,
    };

    Ok(Json(response))
}
