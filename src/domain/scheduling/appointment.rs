//! Appointment aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AppointmentId, ClientId, ClinicId, ServiceTypeId, StateMachine, Timestamp, UserId,
    ValidationError,
};

use super::{AppointmentStatus, SchedulingError};

/// A booked session between a client and a clinician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub clinic_id: ClinicId,
    pub client_id: ClientId,
    pub service_type_id: ServiceTypeId,
    /// Clinician delivering the session.
    pub clinician_id: UserId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Appointment {
    /// Books a new appointment. The end must be strictly after the start.
    #[allow(clippy::too_many_arguments)]
    pub fn book(
        clinic_id: ClinicId,
        client_id: ClientId,
        service_type_id: ServiceTypeId,
        clinician_id: UserId,
        starts_at: Timestamp,
        ends_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if !ends_at.is_after(&starts_at) {
            return Err(ValidationError::invalid_format(
                "ends_at",
                "must be after starts_at",
            ));
        }

        let now = Timestamp::now();
        Ok(Appointment {
            id: AppointmentId::new(),
            clinic_id,
            client_id,
            service_type_id,
            clinician_id,
            starts_at,
            ends_at,
            status: AppointmentStatus::Scheduled,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Length of the session in minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.ends_at.duration_since(&self.starts_at).num_minutes()
    }

    /// Moves the appointment to a new time. Only scheduled appointments
    /// can be rescheduled.
    pub fn reschedule(
        &mut self,
        starts_at: Timestamp,
        ends_at: Timestamp,
    ) -> Result<(), SchedulingError> {
        if self.status != AppointmentStatus::Scheduled {
            return Err(SchedulingError::invalid_state(self.status, "reschedule"));
        }
        if !ends_at.is_after(&starts_at) {
            return Err(SchedulingError::validation(
                "ends_at",
                "must be after starts_at",
            ));
        }
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks the session as having taken place.
    pub fn complete(&mut self) -> Result<(), SchedulingError> {
        self.transition(AppointmentStatus::Completed)
    }

    /// Calls the appointment off.
    pub fn cancel(&mut self) -> Result<(), SchedulingError> {
        self.transition(AppointmentStatus::Cancelled)
    }

    /// Records that the client did not attend.
    pub fn mark_no_show(&mut self) -> Result<(), SchedulingError> {
        self.transition(AppointmentStatus::NoShow)
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
        self.updated_at = Timestamp::now();
    }

    fn transition(&mut self, target: AppointmentStatus) -> Result<(), SchedulingError> {
        if !self.status.can_transition_to(&target) {
            return Err(SchedulingError::invalid_state(
                self.status,
                target.display_name(),
            ));
        }
        self.status = target;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
