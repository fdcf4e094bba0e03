//! Clinic HTTP endpoints: registration, roster, membership management.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::clinic_routes;
