//! CompleteAppointmentHandler - Command handler for closing out a session.

use std::sync::Arc;

use crate::domain::foundation::{AppointmentId, ClinicId};
use crate::domain::scheduling::{Appointment, SchedulingError};
use crate::ports::AppointmentRepository;

/// Command to mark an appointment completed or a no-show.
#[derive(Debug, Clone)]
pub struct CompleteAppointmentCommand {
    pub clinic_id: ClinicId,
    pub appointment_id: AppointmentId,
    /// Records the client as absent instead of completing the session.
    pub no_show: bool,
    pub notes: Option<String>,
}

/// Result of closing out an appointment.
#[derive(Debug, Clone)]
pub struct CompleteAppointmentResult {
    pub appointment: Appointment,
}

/// Handler for completing appointments.
pub struct CompleteAppointmentHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl CompleteAppointmentHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        cmd: CompleteAppointmentCommand,
    ) -> Result<CompleteAppointmentResult, SchedulingError> {
        let mut appointment = self
            .appointments
            .find_by_id(&cmd.appointment_id)
            .await?
            .filter(|a| a.clinic_id == cmd.clinic_id)
            .ok_or(SchedulingError::AppointmentNotFound(cmd.appointment_id))?;

        if cmd.no_show {
            appointment.mark_no_show()?;
        } else {
            appointment.complete()?;
        }
        if cmd.notes.is_some() {
            appointment.set_notes(cmd.notes);
        }

        self.appointments.update(&appointment).await?;

        Ok(CompleteAppointmentResult { appointment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockAppointmentRepository;
    use crate::domain::foundation::{ClientId, ServiceTypeId, Timestamp, UserId};
    use crate::domain::scheduling::AppointmentStatus;

    fn scheduled(clinic_id: ClinicId) -> Appointment {
        let start = Timestamp::now().minus_days(1);
        Appointment::book(
            clinic_id,
            ClientId::new(),
            ServiceTypeId::new(),
            UserId::new("clinician-1").unwrap(),
            start,
            start.plus_secs(50 * 60),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn completes_with_session_notes() {
        let clinic_id = ClinicId::new();
        let appointment = scheduled(clinic_id);
        let appointment_id = appointment.id;
        let repo = Arc::new(MockAppointmentRepository::with_appointment(appointment));
        let handler = CompleteAppointmentHandler::new(repo.clone());

        let result = handler
            .handle(CompleteAppointmentCommand {
                clinic_id,
                appointment_id,
                no_show: false,
                notes: Some("Good progress".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.appointment.status, AppointmentStatus::Completed);
        assert_eq!(repo.saved()[0].notes.as_deref(), Some("Good progress"));
    }

    #[tokio::test]
    async fn records_no_show() {
        let clinic_id = ClinicId::new();
        let appointment = scheduled(clinic_id);
        let appointment_id = appointment.id;
        let handler = CompleteAppointmentHandler::new(Arc::new(
            MockAppointmentRepository::with_appointment(appointment),
        ));

        let result = handler
            .handle(CompleteAppointmentCommand {
                clinic_id,
                appointment_id,
                no_show: true,
                notes: None,
            })
            .await
            .unwrap();

        assert_eq!(result.appointment.status, AppointmentStatus::NoShow);
    }

    #[tokio::test]
    async fn completing_cancelled_appointment_is_invalid() {
        let clinic_id = ClinicId::new();
        let mut appointment = scheduled(clinic_id);
        appointment.cancel().unwrap();
        let appointment_id = appointment.id;
        let handler = CompleteAppointmentHandler::new(Arc::new(
            MockAppointmentRepository::with_appointment(appointment),
        ));

        let result = handler
            .handle(CompleteAppointmentCommand {
                clinic_id,
                appointment_id,
                no_show: false,
                notes: None,
            })
            .await;
        assert!(matches!(result, Err(SchedulingError::InvalidState { .. })));
    }
}
