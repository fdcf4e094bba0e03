//! BookAppointmentHandler - Command handler for booking a session.
//!
//! Booking cross-checks every referenced record against the clinic so
//! one tenant can never schedule against another tenant's client or
//! service catalog.

use std::sync::Arc;

use crate::domain::foundation::{ClientId, ClinicId, ServiceTypeId, Timestamp, UserId};
use crate::domain::scheduling::{Appointment, SchedulingError};
use crate::ports::{AppointmentRepository, ClientRepository, ServiceTypeRepository};

/// Command to book an appointment.
#[derive(Debug, Clone)]
pub struct BookAppointmentCommand {
    pub clinic_id: ClinicId,
    pub client_id: ClientId,
    pub service_type_id: ServiceTypeId,
    pub clinician_id: UserId,
    pub starts_at: Timestamp,
    /// When absent, the end is derived from the service's duration.
    pub ends_at: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for appointment booking.
pub struct BookAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
    service_types: Arc<dyn ServiceTypeRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl BookAppointmentHandler {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        service_types: Arc<dyn ServiceTypeRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            appointments,
            service_types,
            clients,
        }
    }

    pub async fn handle(
        &self,
        cmd: BookAppointmentCommand,
    ) -> Result<BookAppointmentResult, SchedulingError> {
        // 1. The client must belong to the booking clinic
        let client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await
            .map_err(|e| SchedulingError::infrastructure(e.to_string()))?
            .filter(|c| c.clinic_id == cmd.clinic_id);
        if client.is_none() {
            return Err(SchedulingError::validation(
                "client_id",
                "client does not belong to this clinic",
            ));
        }

        // 2. The service must belong to the clinic and be bookable
        let service_type = self
            .service_types
            .find_by_id(&cmd.service_type_id)
            .await?
            .filter(|s| s.clinic_id == cmd.clinic_id)
            .ok_or(SchedulingError::ServiceTypeNotFound(cmd.service_type_id))?;
        if !service_type.active {
            return Err(SchedulingError::validation(
                "service_type_id",
                "service type is not active",
            ));
        }

        // 3. Derive the end from the service duration when not given
        let ends_at = cmd.ends_at.unwrap_or_else(|| {
            cmd.starts_at
                .plus_secs(u64::from(service_type.duration_minutes) * 60)
        });

        // 4. Book and persist
        let mut appointment = Appointment::book(
            cmd.clinic_id,
            cmd.client_id,
            cmd.service_type_id,
            cmd.clinician_id,
            cmd.starts_at,
            ends_at,
        )
        .map_err(|e| SchedulingError::validation(e.field(), e.to_string()))?;
        if cmd.notes.is_some() {
            appointment.set_notes(cmd.notes);
        }

        self.appointments.save(&appointment).await?;

        Ok(BookAppointmentResult { appointment })
    }
}
