use std::sync::Arc;

use tracing::info;

use super::{require, require_id, ServiceError};
use crate::database::models::Group;
use crate::database::repository::GroupRepository;

pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    max_list_rows: i64,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>, max_list_rows: i64) -> Self {
        Self {
            groups,
            max_list_rows,
        }
    }

    pub async fn create_group(&self, mut group: Group) -> Result<Group, ServiceError> {
        validate(&group)?;
        group.id.clear();
        self.groups.create(&mut group).await?;
        info!("Created group {} ({})", group.id, group.name);
        Ok(group)
    }

    pub async fn get_group(&self, id: &str) -> Result<Group, ServiceError> {
        require_id("id", id)?;
        Ok(self.groups.get_by_id(id).await?)
    }

    pub async fn update_group(&self, id: &str, mut group: Group) -> Result<Group, ServiceError> {
        require_id("id", id)?;
        validate(&group)?;
        group.id = id.to_string();
        self.groups.update(&mut group).await?;
        info!("Updated group {}", group.id);
        Ok(group)
    }

    /// Children in the group stay enrolled with no group
    pub async fn delete_group(&self, id: &str) -> Result<(), ServiceError> {
        require_id("id", id)?;
        self.groups.delete(id).await?;
        info!("Deleted group {}", id);
        Ok(())
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, ServiceError> {
        Ok(self.groups.list(self.max_list_rows).await?)
    }
}

fn validate(group: &Group) -> Result<(), ServiceError> {
    require("name", &group.name)?;
    if group.capacity < 0 {
        return Err(ServiceError::validation("capacity", "must not be negative"));
    }
    Ok(())
}
