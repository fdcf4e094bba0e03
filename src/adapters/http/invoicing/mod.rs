//! Invoicing HTTP endpoints: drafting, sending, and the public pay path.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{invoicing_routes, public_invoice_routes};
