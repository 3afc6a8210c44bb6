use std::sync::Arc;

use tracing::info;

use super::{require, require_id, ServiceError};
use crate::database::models::Volunteer;
use crate::database::repository::VolunteerRepository;

pub struct VolunteerService {
    volunteers: Arc<dyn VolunteerRepository>,
    max_list_rows: i64,
}

impl VolunteerService {
    pub fn new(volunteers: Arc<dyn VolunteerRepository>, max_list_rows: i64) -> Self {
        Self {
            volunteers,
            max_list_rows,
        }
    }

    pub async fn create_volunteer(&self, mut volunteer: Volunteer) -> Result<Volunteer, ServiceError> {
        require("name", &volunteer.name)?;
        volunteer.id.clear();
        self.volunteers.create(&mut volunteer).await?;
        info!("Created volunteer {}", volunteer.id);
        Ok(volunteer)
    }

    pub async fn get_volunteer(&self, id: &str) -> Result<Volunteer, ServiceError> {
        require_id("id", id)?;
        Ok(self.volunteers.get_by_id(id).await?)
    }

    pub async fn update_volunteer(
        &self,
        id: &str,
        mut volunteer: Volunteer,
    ) -> Result<Volunteer, ServiceError> {
        require_id("id", id)?;
        require("name", &volunteer.name)?;
        volunteer.id = id.to_string();
        self.volunteers.update(&mut volunteer).await?;
        info!("Updated volunteer {}", volunteer.id);
        Ok(volunteer)
    }

    pub async fn delete_volunteer(&self, id: &str) -> Result<(), ServiceError> {
        require_id("id", id)?;
        self.volunteers.delete(id).await?;
        info!("Deleted volunteer {}", id);
        Ok(())
    }

    pub async fn list_volunteers(&self) -> Result<Vec<Volunteer>, ServiceError> {
        Ok(self.volunteers.list(self.max_list_rows).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[tokio::test]
    async fn update_keeps_the_path_id() {
        let store = MemoryStore::new();
        let svc = VolunteerService::new(store.clone(), 10);
        let created = svc
            .create_volunteer(Volunteer {
                name: "Maya".to_string(),
                skills: "first aid".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let body = Volunteer {
            id: "ignored".to_string(),
            name: "Maya".to_string(),
            availability: "weekends".to_string(),
            ..Default::default()
        };
        let updated = svc.update_volunteer(&created.id, body).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(svc.get_volunteer(&created.id).await.unwrap().availability, "weekends");
    }

    #[tokio::test]
    async fn failed_writes_surface_as_storage_errors() {
        let store = MemoryStore::new();
        let svc = VolunteerService::new(store.clone(), 10);
        store.fail_writes(true);
        let err = svc
            .create_volunteer(Volunteer {
                name: "Maya".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }
}
