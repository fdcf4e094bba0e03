//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `clinic` - Clinic tenancy and member roles
//! - `client` - Client records and lifecycle
//! - `scheduling` - Service types and appointments
//! - `billing` - Plans, subscriptions, trials, and limit enforcement
//! - `invoicing` - Invoices, line items, and arithmetic validation
//! - `notification` - Per-user and per-clinic notifications
//! - `reports` - Admin report value types and the health score
//! - `assistant` - Prompt assembly and reply post-processing

pub mod assistant;
pub mod billing;
pub mod client;
pub mod clinic;
pub mod foundation;
pub mod invoicing;
pub mod notification;
pub mod reports;
pub mod scheduling;
