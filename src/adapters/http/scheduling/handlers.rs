//! HTTP handlers for scheduling: service types and appointments.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::scheduling::{
    BookAppointmentCommand, BookAppointmentHandler, CancelAppointmentCommand,
    CancelAppointmentHandler, CompleteAppointmentCommand, CompleteAppointmentHandler,
    CreateServiceTypeCommand, CreateServiceTypeHandler, ListAppointmentsHandler,
    ListAppointmentsQuery, ListServiceTypesHandler, ListServiceTypesQuery,
};
use crate::domain::clinic::MemberRole;
use crate::domain::foundation::{
    AppointmentId, ClientId, ClinicId, DomainError, ServiceTypeId, Timestamp, UserId,
};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AppointmentResponse, AppointmentsResponse, BookAppointmentRequest,
    CompleteAppointmentRequest, CreateServiceTypeRequest, ListAppointmentsParams,
    ListServiceTypesParams, ServiceTypeResponse, ServiceTypesResponse,
};

fn parse_uuid_field<T>(value: &str, field: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = uuid::Error>,
{
    value
        .parse()
        .map_err(|_| ApiError::from(DomainError::validation(field, "must be a UUID")))
}

/// POST /api/clinics/:id/service-types - Define a service (owner/admin)
pub async fn create_service_type(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Json(request): Json<CreateServiceTypeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .access
        .require_role(&clinic_id, &user.id, MemberRole::Admin)
        .await?;

    let handler = CreateServiceTypeHandler::new(state.service_types.clone());
    let cmd = CreateServiceTypeCommand {
        clinic_id,
        name: request.name,
        duration_minutes: request.duration_minutes,
        price: request.price,
    };

    let result = handler.handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(ServiceTypeResponse::from(result.service_type)),
    ))
}

/// GET /api/clinics/:id/service-types - List services
pub async fn list_service_types(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Query(params): Query<ListServiceTypesParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = ListServiceTypesHandler::new(state.service_types.clone());
    let query = ListServiceTypesQuery {
        clinic_id,
        active_only: params.active_only,
    };

    let result = handler.handle(query).await?;

    let response = ServiceTypesResponse {
        service_types: result
            .service_types
            .into_iter()
            .map(ServiceTypeResponse::from)
            .collect(),
    };

    Ok(Json(response))
}

/// POST /api/clinics/:id/appointments - Book an appointment
pub async fn book_appointment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let client_id: ClientId = parse_uuid_field(&request.client_id, "client_id")?;
    let service_type_id: ServiceTypeId =
        parse_uuid_field(&request.service_type_id, "service_type_id")?;
    let clinician_id = match request.clinician_id {
        Some(raw) => UserId::new(raw).map_err(DomainError::from)?,
        None => user.id.clone(),
    };

    let handler = BookAppointmentHandler::new(
        state.appointments.clone(),
        state.service_types.clone(),
        state.clients.clone(),
    );
    let cmd = BookAppointmentCommand {
        clinic_id,
        client_id,
        service_type_id,
        clinician_id,
        starts_at: Timestamp::from_datetime(request.starts_at),
        ends_at: request.ends_at.map(Timestamp::from_datetime),
        notes: request.notes,
    };

    let result = handler.handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from(result.appointment)),
    ))
}

/// GET /api/clinics/:id/appointments - List the schedule for a window
pub async fn list_appointments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
    Query(params): Query<ListAppointmentsParams>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = ListAppointmentsHandler::new(state.appointments.clone());
    let query = ListAppointmentsQuery {
        clinic_id,
        from: params.from.map(Timestamp::from_datetime),
        until: params.until.map(Timestamp::from_datetime),
    };

    let result = handler.handle(query).await?;

    let response = AppointmentsResponse {
        appointments: result
            .appointments
            .into_iter()
            .map(AppointmentResponse::from)
            .collect(),
    };

    Ok(Json(response))
}

/// POST /api/clinics/:id/appointments/:aid/cancel - Cancel a booking
pub async fn cancel_appointment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((clinic_id, appointment_id)): Path<(ClinicId, AppointmentId)>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = CancelAppointmentHandler::new(state.appointments.clone());
    let result = handler
        .handle(CancelAppointmentCommand {
            clinic_id,
            appointment_id,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(result.appointment)))
}

/// POST /api/clinics/:id/appointments/:aid/complete - Close out a booking
pub async fn complete_appointment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((clinic_id, appointment_id)): Path<(ClinicId, AppointmentId)>,
    Json(request): Json<CompleteAppointmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.access.require_member(&clinic_id, &user.id).await?;

    let handler = CompleteAppointmentHandler::new(state.appointments.clone());
    let cmd = CompleteAppointmentCommand {
        clinic_id,
        appointment_id,
        no_show: request.no_show,
        notes: request.notes,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(AppointmentResponse::from(result.appointment)))
}
