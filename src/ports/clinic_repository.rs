//! Clinic repository port.

use crate::domain::clinic::Clinic;
use crate::domain::foundation::{ClinicId, DomainError};
use async_trait::async_trait;

/// Repository port for Clinic aggregate persistence.
#[async_trait]
pub trait ClinicRepository: Send + Sync {
    /// Save a new clinic.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, clinic: &Clinic) -> Result<(), DomainError>;

    /// Update an existing clinic.
    ///
    /// # Errors
    ///
    /// - `ClinicNotFound` if the clinic doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, clinic: &Clinic) -> Result<(), DomainError>;

    /// Find a clinic by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ClinicId) -> Result<Option<Clinic>, DomainError>;

    /// Check if a clinic exists.
    async fn exists(&self, id: &ClinicId) -> Result<bool, DomainError>;
}
