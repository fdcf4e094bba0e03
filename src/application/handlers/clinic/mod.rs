//! Clinic handlers.
//!
//! Registration provisions the clinic, its owner membership, and a
//! free subscription in one command. The rest are roster queries and
//! membership management.

mod add_member;
mod create_clinic;
mod get_clinic;
mod list_members;
mod list_my_clinics;

pub use add_member::{AddMemberCommand, AddMemberHandler, AddMemberResult};
pub use create_clinic::{CreateClinicCommand, CreateClinicHandler, CreateClinicResult};
pub use get_clinic::{GetClinicHandler, GetClinicQuery, GetClinicResult};
pub use list_members::{ListMembersHandler, ListMembersQuery, ListMembersResult};
pub use list_my_clinics::{
    ClinicWithRole, ListMyClinicsHandler, ListMyClinicsQuery, ListMyClinicsResult,
};
