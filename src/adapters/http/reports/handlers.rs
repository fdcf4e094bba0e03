//! HTTP handler for the reports overview.
//!
//! The overview read model already serializes in API shape, so there
//! is no DTO layer here.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::reports::{GetOverviewHandler, GetOverviewQuery};
use crate::domain::clinic::MemberRole;
use crate::domain::foundation::ClinicId;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;

/// GET /api/clinics/:id/reports/overview - Practice overview (owner/admin)
///
/// Gated on the plan's reports feature.
pub async fn get_overview(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(clinic_id): Path<ClinicId>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .access
        .require_role(&clinic_id, &user.id, MemberRole::Admin)
        .await?;

    let handler = GetOverviewHandler::new(
        state.reports.clone(),
        state.subscriptions.clone(),
        state.plans.clone(),
    );
    let overview = handler.handle(GetOverviewQuery { clinic_id }).await?;

    Ok(Json(overview))
}
