//! Scheduling domain: service types and appointments.
//!
//! A clinic defines the service types it offers, then books
//! appointments against them. Appointments move through a small state
//! machine: scheduled, then exactly one of completed, cancelled, or
//! no-show.

mod appointment;
mod errors;
mod service_type;
mod status;

pub use appointment::Appointment;
pub use errors::SchedulingError;
pub use service_type::ServiceType;
pub use status::AppointmentStatus;
