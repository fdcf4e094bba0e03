//! GetClinicHandler - Query handler for loading one clinic.

use std::sync::Arc;

use crate::domain::clinic::{Clinic, ClinicError};
use crate::domain::foundation::ClinicId;
use crate::ports::ClinicRepository;

/// Query for a single clinic.
#[derive(Debug, Clone)]
pub struct GetClinicQuery {
    pub clinic_id: ClinicId,
}

/// Result of a clinic lookup.
#[derive(Debug, Clone)]
pub struct GetClinicResult {
    pub clinic: Clinic,
}

/// Handler for clinic lookups.
pub struct GetClinicHandler {
    clinics: Arc<dyn ClinicRepository>,
}

impl GetClinicHandler {
    pub fn new(clinics: Arc<dyn ClinicRepository>) -> Self {
        Self { clinics }
    }

    pub async fn handle(&self, query: GetClinicQuery) -> Result<GetClinicResult, ClinicError> {
        let clinic = self
            .clinics
            .find_by_id(&query.clinic_id)
            .await?
            .ok_or(ClinicError::NotFound(query.clinic_id))?;

        Ok(GetClinicResult { clinic })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockClinicRepository;

    #[tokio::test]
    async fn returns_existing_clinic() {
        let clinic = Clinic::create("Riverside Therapy", "hello@riverside.example").unwrap();
        let clinic_id = clinic.id;
        let handler = GetClinicHandler::new(Arc::new(MockClinicRepository::with_clinic(clinic)));

        let result = handler.handle(GetClinicQuery { clinic_id }).await.unwrap();
        assert_eq!(result.clinic.id, clinic_id);
    }

    #[tokio::test]
    async fn unknown_clinic_is_not_found() {
        let handler = GetClinicHandler::new(Arc::new(MockClinicRepository::new()));

        let result = handler
            .handle(GetClinicQuery {
                clinic_id: ClinicId::new(),
            })
            .await;
        assert!(matches!(result, Err(ClinicError::NotFound(_))));
    }
}
