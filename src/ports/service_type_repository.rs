//! Service type repository port.

use crate::domain::foundation::{ClinicId, DomainError, ServiceTypeId};
use crate::domain::scheduling::ServiceType;
use async_trait::async_trait;

/// Repository port for ServiceType persistence.
#[async_trait]
pub trait ServiceTypeRepository: Send + Sync {
    /// Save a new service type.
    async fn save(&self, service_type: &ServiceType) -> Result<(), DomainError>;

    /// Update an existing service type.
    ///
    /// # Errors
    ///
    /// - `ServiceTypeNotFound` if it doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, service_type: &ServiceType) -> Result<(), DomainError>;

    /// Find a service type by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ServiceTypeId) -> Result<Option<ServiceType>, DomainError>;

    /// List a clinic's service types. When `active_only` is set,
    /// deactivated offerings are skipped.
    async fn list_by_clinic(
        &self,
        clinic_id: &ClinicId,
        active_only: bool,
    ) -> Result<Vec<ServiceType>, DomainError>;
}
