//! Appointment repository port.

use crate::domain::foundation::{AppointmentId, ClientId, ClinicId, DomainError, Timestamp};
use crate::domain::scheduling::Appointment;
use async_trait::async_trait;

/// Repository port for Appointment aggregate persistence.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Save a new appointment.
    async fn save(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// Update an existing appointment.
    ///
    /// # Errors
    ///
    /// - `AppointmentNotFound` if it doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// Find an appointment by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError>;

    /// List a clinic's appointments starting within the window,
    /// earliest first.
    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Appointment>, DomainError>;

    /// List all appointments for one client, earliest first.
    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Appointment>, DomainError>;

    /// Next scheduled appointments for the assistant context.
    async fn list_upcoming(
        &self,
        clinic_id: &ClinicId,
        after: Timestamp,
        limit: u32,
    ) -> Result<Vec<Appointment>, DomainError>;
}
