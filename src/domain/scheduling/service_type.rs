//! Service type aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClinicId, ServiceTypeId, Timestamp, ValidationError};

/// A kind of appointment a clinic offers, with its default duration
/// and price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: ServiceTypeId,
    pub clinic_id: ClinicId,
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
    /// Inactive service types are hidden from booking but kept for
    /// existing appointments.
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ServiceType {
    pub fn create(
        clinic_id: ClinicId,
        name: impl Into<String>,
        duration_minutes: u32,
        price: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if duration_minutes == 0 {
            return Err(ValidationError::invalid_format(
                "duration_minutes",
                "must be greater than zero",
            ));
        }
        if price < 0.0 {
            return Err(ValidationError::invalid_format(
                "price",
                "must not be negative",
            ));
        }

        let now = Timestamp::now();
        Ok(ServiceType {
            id: ServiceTypeId::new(),
            clinic_id,
            name,
            duration_minutes,
            price,
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Timestamp::now();
    }

    pub fn reactivate(&mut self) {
        self.active = true;
        self.updated_at = Timestamp::now();
    }
}
