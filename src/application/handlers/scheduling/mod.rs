//! Scheduling command and query handlers.

mod book_appointment;
mod cancel_appointment;
mod complete_appointment;
mod create_service_type;
mod list_appointments;
mod list_service_types;

pub use book_appointment::{BookAppointmentCommand, BookAppointmentHandler, BookAppointmentResult};
pub use cancel_appointment::{
    CancelAppointmentCommand, CancelAppointmentHandler, CancelAppointmentResult,
};
pub use complete_appointment::{
    CompleteAppointmentCommand, CompleteAppointmentHandler, CompleteAppointmentResult,
};
pub use create_service_type::{
    CreateServiceTypeCommand, CreateServiceTypeHandler, CreateServiceTypeResult,
};
pub use list_appointments::{
    ListAppointmentsHandler, ListAppointmentsQuery, ListAppointmentsResult, DEFAULT_WINDOW_DAYS,
};
pub use list_service_types::{
    ListServiceTypesHandler, ListServiceTypesQuery, ListServiceTypesResult,
};
