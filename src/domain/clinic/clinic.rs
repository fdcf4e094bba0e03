//! Clinic aggregate entity.
//!
//! A Clinic is the tenant boundary: it owns clients, service types,
//! appointments, invoices, and exactly one subscription.

use crate::domain::foundation::{ClinicId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Clinic aggregate - a tenant organization.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `email` contains an @ sign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    /// Unique identifier for this clinic.
    pub id: ClinicId,

    /// Practice name shown on invoices and emails.
    pub name: String,

    /// Primary contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Postal address.
    pub address: Option<String>,

    /// IANA timezone name used for scheduling displays.
    pub timezone: String,

    /// When the clinic was created.
    pub created_at: Timestamp,

    /// When the clinic was last updated.
    pub updated_at: Timestamp,
}

impl Clinic {
    /// Create a new clinic.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty or the email is malformed.
    pub fn create(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: ClinicId::new(),
            name,
            email,
            phone: None,
            address: None,
            timezone: "UTC".to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Update contact details. Empty-string fields are rejected at the DTO
    /// layer; None here means "leave unchanged".
    pub fn update_contact(
        &mut self,
        phone: Option<String>,
        address: Option<String>,
        timezone: Option<String>,
    ) {
        if phone.is_some() {
            self.phone = phone;
        }
        if address.is_some() {
            self.address = address;
        }
        if let Some(tz) = timezone {
            self.timezone = tz;
        }
        self.updated_at = Timestamp::now();
    }
}
