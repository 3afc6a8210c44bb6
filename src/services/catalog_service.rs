use std::sync::Arc;

use tracing::info;

use super::{require, require_id, ServiceError};
use crate::database::models::{Allergy, Need};
use crate::database::repository::{AllergyRepository, NeedRepository};

/// Standalone registration and lookup of needs and allergies
pub struct CatalogService {
    needs: Arc<dyn NeedRepository>,
    allergies: Arc<dyn AllergyRepository>,
    max_list_rows: i64,
}

impl CatalogService {
    pub fn new(
        needs: Arc<dyn NeedRepository>,
        allergies: Arc<dyn AllergyRepository>,
        max_list_rows: i64,
    ) -> Self {
        Self {
            needs,
            allergies,
            max_list_rows,
        }
    }

    pub async fn create_need(&self, mut need: Need) -> Result<Need, ServiceError> {
        require("type", &need.kind)?;
        need.id.clear();
        self.needs.create(&mut need).await?;
        info!("Registered need {} ({})", need.id, need.kind);
        Ok(need)
    }

    pub async fn get_need(&self, id: &str) -> Result<Need, ServiceError> {
        require_id("id", id)?;
        Ok(self.needs.get_by_id(id).await?)
    }

    pub async fn list_needs(&self) -> Result<Vec<Need>, ServiceError> {
        Ok(self.needs.list(self.max_list_rows).await?)
    }

    pub async fn create_allergy(&self, mut allergy: Allergy) -> Result<Allergy, ServiceError> {
        require("type", &allergy.kind)?;
        allergy.id.clear();
        self.allergies.create(&mut allergy).await?;
        info!("Registered allergy {} ({})", allergy.id, allergy.kind);
        Ok(allergy)
    }

    pub async fn get_allergy(&self, id: &str) -> Result<Allergy, ServiceError> {
        require_id("id", id)?;
        Ok(self.allergies.get_by_id(id).await?)
    }

    pub async fn list_allergies(&self) -> Result<Vec<Allergy>, ServiceError> {
        Ok(self.allergies.list(self.max_list_rows).await?)
    }
}
