//! Reports HTTP endpoints.

pub mod handlers;
pub mod routes;

pub use routes::reports_routes;
