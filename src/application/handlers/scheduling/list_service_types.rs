//! ListServiceTypesHandler - Query handler for a clinic's services.

use std::sync::Arc;

use crate::domain::foundation::ClinicId;
use crate::domain::scheduling::{SchedulingError, ServiceType};
use crate::ports::ServiceTypeRepository;

/// Query for a clinic's service types.
#[derive(Debug, Clone)]
pub struct ListServiceTypesQuery {
    pub clinic_id: ClinicId,
    /// When true, deactivated services are omitted.
    pub active_only: bool,
}

/// Result of a service type listing.
#[derive(Debug, Clone)]
pub struct ListServiceTypesResult {
    pub service_types: Vec<ServiceType>,
}

/// Handler for service type listings.
pub struct ListServiceTypesHandler {
    service_types: Arc<dyn ServiceTypeRepository>,
}

impl ListServiceTypesHandler {
    pub fn new(service_types: Arc<dyn ServiceTypeRepository>) -> Self {
        Self { service_types }
    }

    pub async fn handle(
        &self,
        query: ListServiceTypesQuery,
    ) -> Result<ListServiceTypesResult, SchedulingError> {
        let service_types = self
            .service_types
            .list_by_clinic(&query.clinic_id, query.active_only)
            .await?;

        Ok(ListServiceTypesResult { service_types })
    }
}
