//! CancelAppointmentHandler - Command handler for calling off a session.

use std::sync::Arc;

use crate::domain::foundation::{AppointmentId, ClinicId};
use crate::domain::scheduling::{Appointment, SchedulingError};
use crate::ports::AppointmentRepository;

/// Command to cancel an appointment.
#[derive(Debug, Clone)]
pub struct CancelAppointmentCommand {
    pub clinic_id: ClinicId,
    pub appointment_id: AppointmentId,
}

/// Result of cancellation.
#[derive(Debug, Clone)]
pub struct CancelAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for appointment cancellation.
pub struct CancelAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl CancelAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        cmd: CancelAppointmentCommand,
    ) -> Result<CancelAppointmentResult, SchedulingError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .filter(|a| a.clinic_id == cmd.clinic_id)
            .ok_or(SchedulingError::AppointmentNotFound(cmd.appointment_id))?;

        appointment.cancel()?;
        self.appointments.update(&appointment).await?;

        Ok(CancelAppointmentResult { appointment })
    }
}
