use std::sync::Arc;

use tracing::info;

use super::{require, require_id, ServiceError};
use crate::database::models::Caretaker;
use crate::database::repository::CaretakerRepository;

pub struct CaretakerService {
    caretakers: Arc<dyn CaretakerRepository>,
    max_list_rows: i64,
}

impl CaretakerService {
    pub fn new(caretakers: Arc<dyn CaretakerRepository>, max_list_rows: i64) -> Self {
        Self {
            caretakers,
            max_list_rows,
        }
    }

    pub async fn create_caretaker(&self, mut caretaker: Caretaker) -> Result<Caretaker, ServiceError> {
        require("name", &caretaker.name)?;
        caretaker.id.clear();
        self.caretakers.create(&mut caretaker).await?;
        info!("Created caretaker {}", caretaker.id);
        Ok(caretaker)
    }

    pub async fn get_caretaker(&self, id: &str) -> Result<Caretaker, ServiceError> {
        require_id("id", id)?;
        Ok(self.caretakers.get_by_id(id).await?)
    }

    pub async fn update_caretaker(
        &self,
        id: &str,
        mut caretaker: Caretaker,
    ) -> Result<Caretaker, ServiceError> {
        require_id("id", id)?;
        require("name", &caretaker.name)?;
        caretaker.id = id.to_string();
        self.caretakers.update(&mut caretaker).await?;
        info!("Updated caretaker {}", caretaker.id);
        Ok(caretaker)
    }

    pub async fn delete_caretaker(&self, id: &str) -> Result<(), ServiceError> {
        require_id("id", id)?;
        self.caretakers.delete(id).await?;
        info!("Deleted caretaker {}", id);
        Ok(())
    }

    pub async fn list_caretakers(&self) -> Result<Vec<Caretaker>, ServiceError> {
        Ok(self.caretakers.list(self.max_list_rows).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[tokio::test]
    async fn caretakers_are_listed_by_name() {
        let store = MemoryStore::new();
        let svc = CaretakerService::new(store.clone(), 10);
        for name in ["Zoe", "Adam"] {
            svc.create_caretaker(Caretaker {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let names: Vec<String> = svc
            .list_caretakers()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Adam", "Zoe"]);
    }

    #[tokio::test]
    async fn name_is_required() {
        let store = MemoryStore::new();
        let svc = CaretakerService::new(store.clone(), 10);
        assert!(matches!(
            svc.create_caretaker(Caretaker::default()).await,
            Err(ServiceError::Validation { ref field, .. }) if field == "name"
        ));
        assert!(matches!(
            svc.delete_caretaker("missing").await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
