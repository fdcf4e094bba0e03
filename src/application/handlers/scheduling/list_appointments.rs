//! ListAppointmentsHandler - Query handler for a clinic's schedule.

use std::sync::Arc;

use crate::domain::foundation::{ClinicId, Timestamp};
use crate::domain::scheduling::{Appointment, SchedulingError};
use crate::ports::AppointmentRepository;

/// Days covered when the query gives no explicit window.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Query for appointments in a time window. Missing bounds default to
/// the next `DEFAULT_WINDOW_DAYS` days.
#[derive(Debug, Clone)]
pub struct ListAppointmentsQuery {
    pub clinic_id: ClinicId,
    pub from: Option<Timestamp>,
    pub until: Option<Timestamp>,
}

/// Result of a schedule listing, ordered by start time.
#[derive(Debug, Clone)]
pub struct ListAppointmentsResult {
    pub appointments: Vec<Appointment>,
}

/// Handler for schedule listings.
pub struct ListAppointmentsHandler {
    appointments: Arc<dyn AppointmentRepository>,
}

impl ListAppointmentsHandler {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    pub async fn handle(
        &self,
        query: ListAppointmentsQuery,
    ) -> Result<ListAppointmentsResult, SchedulingError> {
        let from = query.from.unwrap_or_else(Timestamp::now);
        let until = query.until.unwrap_or_else(|| from.add_days(DEFAULT_WINDOW_DAYS));

        let appointments = self
            .appointments
            .list_by_clinic(&query.clinic_id, from, until)
            .await?;

        Ok(ListAppointmentsResult { appointments })
    }
}
