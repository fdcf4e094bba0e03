//! Clinic domain: practices and their staff.
//!
//! A clinic is the tenant boundary for everything else in the system.
//! Clients, appointments, invoices and subscriptions all hang off a
//! clinic. Membership ties platform users to a clinic with a role that
//! gates what they may do.

mod clinic;
mod errors;
mod member;

pub use clinic::Clinic;
pub use errors::ClinicError;
pub use member::{ClinicMember, MemberRole};
