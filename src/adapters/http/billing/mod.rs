//! Billing HTTP endpoints: plans, subscriptions, payment webhooks.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{billing_routes, webhook_routes};
