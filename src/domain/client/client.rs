//! Client aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, ClinicId, Timestamp, UserId, ValidationError};

use super::ClientStatus;

/// A person receiving care at a clinic.
///
/// Email is unique within the clinic, compared case-insensitively. The
/// aggregate normalizes it on the way in so the persistence layer can
/// rely on a plain unique index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub clinic_id: ClinicId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    /// Clinician this client is assigned to, if any.
    pub assigned_to: Option<UserId>,
    pub notes: Option<String>,
    pub status: ClientStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Client {
    /// Creates a new active client.
    pub fn create(
        clinic_id: ClinicId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let email = normalize_email(email.into());

        if first_name.trim().is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        if last_name.trim().is_empty() {
            return Err(ValidationError::empty_field("last_name"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format(
                "email",
                "must be a valid email address",
            ));
        }

        let now = Timestamp::now();
        Ok(Client {
            id: ClientId::new(),
            clinic_id,
            first_name,
            last_name,
            email,
            phone: None,
            date_of_birth: None,
            assigned_to: None,
            notes: None,
            status: ClientStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Updates contact and profile details. `None` leaves a field unchanged.
    pub fn update_details(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Result<(), ValidationError> {
        if let Some(first) = first_name {
            if first.trim().is_empty() {
                return Err(ValidationError::empty_field("first_name"));
            }
            self.first_name = first;
        }
        if let Some(last) = last_name {
            if last.trim().is_empty() {
                return Err(ValidationError::empty_field("last_name"));
            }
            self.last_name = last;
        }
        if let Some(phone) = phone {
            self.phone = Some(phone);
        }
        if let Some(notes) = notes {
            self.notes = Some(notes);
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Changes the client's email, keeping normalization consistent.
    pub fn change_email(&mut self, email: impl Into<String>) -> Result<(), ValidationError> {
        let email = normalize_email(email.into());
        if !email.contains('@') {
            return Err(ValidationError::invalid_format(
                "email",
                "must be a valid email address",
            ));
        }
        self.email = email;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Assigns the client to a clinician, or clears the assignment.
    pub fn assign_to(&mut self, clinician: Option<UserId>) {
        self.assigned_to = clinician;
        self.updated_at = Timestamp::now();
    }

    /// Moves the client to a new lifecycle status.
    pub fn set_status(&mut self, status: ClientStatus) {
        self.status = status;
        self.updated_at = Timestamp::now();
    }

    /// Marks the client inactive. Frees a slot against the plan limit.
    pub fn archive(&mut self) {
        self.set_status(ClientStatus::Inactive);
    }

    /// Whether this client occupies a slot against the plan's client limit.
    pub fn counts_toward_limit(&self) -> bool {
        self.status.counts_toward_limit()
    }
}

/// Lowercases and trims an email so uniqueness checks are consistent.
pub fn normalize_email(email: String) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        Client::create(ClinicId::new(), "Avery", "Quinn", "avery@example.com").unwrap()
    }

    #[test]
    fn create_starts_active() {
        let client = test_client();
        assert_eq!(client.status, ClientStatus::Active);
        assert!(client.counts_toward_limit());
    }

    #[test]
    fn create_normalizes_email() {
        let client =
            Client::create(ClinicId::new(), "Avery", "Quinn", "  Avery@Example.COM ").unwrap();
        assert_eq!(client.email, "avery@example.com");
    }

    #[test]
    fn create_rejects_empty_first_name() {
        let result = Client::create(ClinicId::new(), "  ", "Quinn", "avery@example.com");
        assert!(result.is_err());
    }

    #[test]
    fn create_rejects_bad_email() {
        let result = Client::create(ClinicId::new(), "Avery", "Quinn", "not-an-email");
        assert!(result.is_err());
    }

    #[test]
    fn full_name_joins_parts() {
        let client = test_client();
        assert_eq!(client.full_name(), "Avery Quinn");
    }

    #[test]
    fn update_details_leaves_unset_fields_alone() {
        let mut client = test_client();
        client
            .update_details(None, None, Some("555-0100".to_string()), None)
            .unwrap();
        assert_eq!(client.first_name, "Avery");
        assert_eq!(client.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn update_details_rejects_blank_name() {
        let mut client = test_client();
        let result = client.update_details(Some("".to_string()), None, None, None);
        assert!(result.is_err());
    }

    #[test]
    fn change_email_normalizes() {
        let mut client = test_client();
        client.change_email("NEW@Example.com").unwrap();
        assert_eq!(client.email, "new@example.com");
    }

    #[test]
    fn archive_frees_limit_slot() {
        let mut client = test_client();
        client.archive();
        assert_eq!(client.status, ClientStatus::Inactive);
        assert!(!client.counts_toward_limit());
    }

    #[test]
    fn assign_and_clear_clinician() {
        let mut client = test_client();
        let clinician = UserId::new("user-1").unwrap();
        client.assign_to(Some(clinician.clone()));
        assert_eq!(client.assigned_to, Some(clinician));
        client.assign_to(None);
        assert!(client.assigned_to.is_none());
    }
}
