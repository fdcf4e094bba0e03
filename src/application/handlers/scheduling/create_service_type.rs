//! CreateServiceTypeHandler - Command handler for defining a service.

use std::sync::Arc;

use crate::domain::foundation::ClinicId;
use crate::domain::scheduling::{SchedulingError, ServiceType};
use crate::ports::ServiceTypeRepository;

/// Command to define a new service type.
#[derive(Debug, Clone)]
pub struct CreateServiceTypeCommand {
    pub clinic_id: ClinicId,
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
}

/// Result of service type creation.
#[derive(Debug, Clone)]
pub struct CreateServiceTypeResult {
    pub service_type: ServiceType,
}

/// Handler for service type creation.
pub struct CreateServiceTypeHandler {
    service_types: Arc<dyn ServiceTypeRepository>,
}

impl CreateServiceTypeHandler {
    pub fn new(service_types: Arc<dyn ServiceTypeRepository>) -> Self {
        Self { service_types }
    }

    pub async fn handle(
        &self,
        cmd: CreateServiceTypeCommand,
    ) -> Result<CreateServiceTypeResult, SchedulingError> {
        let service_type =
            ServiceType::create(cmd.clinic_id, cmd.name, cmd.duration_minutes, cmd.price)
                .map_err(|e| SchedulingError::validation(e.field(), e.to_string()))?;

        self.service_types.save(&service_type).await?;

        Ok(CreateServiceTypeResult { service_type })
    }
}
