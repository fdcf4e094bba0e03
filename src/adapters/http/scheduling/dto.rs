//! HTTP DTOs for scheduling endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::scheduling::{Appointment, AppointmentStatus, ServiceType};

/// Request to book an appointment.
///
/// `clinician_id` defaults to the caller. `ends_at` defaults to the
/// start plus the service's duration.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub client_id: String,
    pub service_type_id: String,
    #[serde(default)]
    pub clinician_id: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to close out an appointment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteAppointmentRequest {
    #[serde(default)]
    pub no_show: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to define a service type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServiceTypeRequest {
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
}

/// Query parameters for the schedule listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAppointmentsParams {
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

/// Query parameters for the service type listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListServiceTypesParams {
    #[serde(default)]
    pub active_only: bool,
}

/// An appointment as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub clinic_id: String,
    pub client_id: String,
    pub service_type_id: String,
    pub clinician_id: String,
    pub starts_at: String,
    pub ends_at: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id.to_string(),
            clinic_id: appointment.clinic_id.to_string(),
            client_id: appointment.client_id.to_string(),
            service_type_id: appointment.service_type_id.to_string(),
            clinician_id: appointment.clinician_id.to_string(),
            starts_at: appointment.starts_at.as_datetime().to_rfc3339(),
            ends_at: appointment.ends_at.as_datetime().to_rfc3339(),
            status: appointment.status,
            notes: appointment.notes,
            created_at: appointment.created_at.as_datetime().to_rfc3339(),
            updated_at: appointment.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// A service type as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceTypeResponse {
    pub id: String,
    pub clinic_id: String,
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ServiceType> for ServiceTypeResponse {
    fn from(service_type: ServiceType) -> Self {
        Self {
            id: service_type.id.to_string(),
            clinic_id: service_type.clinic_id.to_string(),
            name: service_type.name,
            duration_minutes: service_type.duration_minutes,
            price: service_type.price,
            active: service_type.active,
            created_at: service_type.created_at.as_datetime().to_rfc3339(),
            updated_at: service_type.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for the schedule listing.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentResponse>,
}

/// Response for the service type listing.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceTypesResponse {
    pub service_types: Vec<ServiceTypeResponse>,
}
