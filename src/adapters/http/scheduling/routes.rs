//! Axum router for scheduling endpoints.

use axum::routing::post;
use axum::Router;

use super::super::state::AppState;
use super::handlers::{
    book_appointment, cancel_appointment, complete_appointment, create_service_type,
    list_appointments, list_service_types,
};

/// Create the scheduling router.
///
/// # Routes
/// - `POST /clinics/:id/service-types` - Define a service (owner/admin)
/// - `GET /clinics/:id/service-types` - List services
/// - `POST /clinics/:id/appointments` - Book an appointment
/// - `GET /clinics/:id/appointments` - List the schedule for a window
/// - `POST /clinics/:id/appointments/:aid/cancel` - Cancel a booking
/// - `POST /clinics/:id/appointments/:aid/complete` - Close out a booking
pub fn scheduling_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clinics/:clinic_id/service-types",
            post(create_service_type).get(list_service_types),
        )
        .route(
            "/clinics/:clinic_id/appointments",
            post(book_appointment).get(list_appointments),
        )
        .route(
            "/clinics/:clinic_id/appointments/:appointment_id/cancel",
            post(cancel_appointment),
        )
        .route(
            "/clinics/:clinic_id/appointments/:appointment_id/complete",
            post(complete_appointment),
        )
}
