use tracing::debug;
use uuid::Uuid;

use scheduling_cell::models::Professional;
use shared_config::AppConfig;
use shared_database::StorageClient;

use crate::models::{ProfessionalError, ProfessionalRecord};

/// Reads professional rows from storage and parses their loosely-typed
/// schedule fields at this boundary, so every caller sees the validated
/// shape only.
pub struct ProfessionalService {
    storage: StorageClient,
}

impl ProfessionalService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            storage: StorageClient::new(config),
        }
    }

    pub async fn get_professional(&self, id: Uuid) -> Result<Professional, ProfessionalError> {
        debug!("Fetching professional {}", id);

        let rows: Vec<ProfessionalRecord> = self
            .storage
            .fetch("professionals", &format!("id=eq.{}", id))
            .await
            .map_err(|e| ProfessionalError::Storage(e.to_string()))?;

        rows.into_iter()
            .next()
            .map(ProfessionalRecord::into_professional)
            .ok_or(ProfessionalError::NotFound)
    }

    pub async fn list_professionals(&self) -> Result<Vec<Professional>, ProfessionalError> {
        debug!("Listing professionals");

        let rows: Vec<ProfessionalRecord> = self
            .storage
            .fetch("professionals", "order=full_name.asc")
            .await
            .map_err(|e| ProfessionalError::Storage(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(ProfessionalRecord::into_professional)
            .collect())
    }
}
