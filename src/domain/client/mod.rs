//! Client domain: the people a clinic cares for.
//!
//! Clients are scoped to a clinic. Email is unique per clinic, and
//! only clients whose status is not inactive count toward the plan's
//! client limit.

mod client;
mod errors;
mod status;

pub use client::{normalize_email, Client};
pub use errors::ClientError;
pub use status::ClientStatus;
