//! Application handlers.
//!
//! One submodule per feature area; each handler is a Command or Query
//! struct plus a Handler that orchestrates domain operations through
//! ports. Handlers hold `Arc<dyn Port>` fields and are cheap to clone
//! into whatever serves them.

pub mod assistant;
pub mod billing;
pub mod client;
pub mod clinic;
pub mod invoicing;
pub mod notification;
pub mod reports;
pub mod scheduling;

#[cfg(test)]
pub(crate) mod test_support;
