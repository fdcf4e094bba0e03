//! HTTP handlers for clinic registration and roster management.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::clinic::{
    AddMemberCommand, AddMemberHandler, CreateClinicCommand, CreateClinicHandler,
    GetClinicHandler, GetClinicQuery, ListMembersHandler, ListMembersQuery, ListMyClinicsHandler,
    ListMyClinicsQuery,
};
use crate::domain::clinic::MemberRole;
use crate::domain::foundation::{ClinicId, DomainError, UserId};

use super::super::billing::dto::SubscriptionResponse;
use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AddMemberRequest, ClinicResponse, ClinicWithRoleResponse, CreateClinicRequest,
    CreateClinicResponse, MemberResponse, MembersResponse, MyClinicsResponse,
};

/// POST /api/clinics - Register a clinic owned by the caller
pub async fn create_clinic(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateClinicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = CreateClinicHandler::new(
        state.clinics.clone(),
        state.members.clone(),
        state.plans.clone(),
        state.subscriptions.clone(),
    );
    let cmd = CreateClinicCommand {
        owner_id: user.id.clone(),
        owner_email: user.email.clone(),
        owner_display_name: user.display_name.clone(),
        name: request.name,
        email: request.email,
    };

    let result = handler.handle(cmd).await?;

    let response = CreateClinicResponse {
        clinic: ClinicResponse::from(result.clinic),
        owner: MemberResponse::from(result.owner),
        subscription: SubscriptionResponse::from(result.subscription),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/clinics - List clinics the caller belongs to
pub async fn list_my_clinics(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = ListMyClinicsHandler::new(state.clinics.clone(), state.members.clone());
    let query = ListMyClinicsQuery {
        user_id: user.id.clone(),
    };

    let result = handler.handle(query).await?;

    let response = MyClinicsResponse {
        clinics: result
            .clinics
            .into_iter()
            .map(|entry| ClinicWithRoleResponse {
                clinic: ClinicResponse::from(entry.clinic),
                role: entry.role,
            })
            .collect(),
    };

    Ok(Json(response))
}

/// GET /api/clinics/:id - Fetch one clinic (members only)
pub async fn get_clinic(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = GetClinicHandler::new(state.clinics.clone());
    let result = handler.handle(GetClinicQuery { clinic_id }).await?;

    Ok(Json(ClinicResponse::from(result.clinic)))
}

/// POST /api/clinics/:id/members - Add a member to the roster (owner/admin)
pub async fn add_member(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Json(request): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .access
        .require_role(&clinic_id, &user.id, MemberRole::Admin)
        .await?;

    let member_id = UserId::new(&request.user_id).map_err(DomainError::from)?;

    let handler = AddMemberHandler::new(state.clinics.clone(), state.members.clone());
    let cmd = AddMemberCommand {
        clinic_id,
        user_id: member_id,
        role: request.role,
        email: request.email,
        display_name: request.display_name,
    };

    let result = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(result.member))))
}

/// GET /api/clinics/:id/members - List the clinic roster (members only)
pub async fn list_members(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = ListMembersHandler::new(state.clinics.clone(), state.members.clone());
    let result = handler.handle(ListMembersQuery { clinic_id }).await?;

    let response = MembersResponse {
        members: result.members.into_iter().map(MemberResponse::from).collect(),
    };

    Ok(Json(response))
}
