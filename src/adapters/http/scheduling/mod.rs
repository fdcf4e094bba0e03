//! Scheduling HTTP endpoints: service types and appointments.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::scheduling_routes;
