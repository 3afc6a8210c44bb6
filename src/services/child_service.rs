use std::sync::Arc;

use tracing::{debug, info};

use super::{blank_to_none, require, require_id, ServiceError};
use crate::database::models::{Child, UpdateChildRequest};
use crate::database::repository::ChildRepository;
use crate::filter::ChildFilter;

/// Children and their need/allergy links.
///
/// Validation happens here, before any repository call; a rejected child
/// never reaches storage.
pub struct ChildService {
    children: Arc<dyn ChildRepository>,
    max_list_rows: i64,
}

impl ChildService {
    pub fn new(children: Arc<dyn ChildRepository>, max_list_rows: i64) -> Self {
        Self {
            children,
            max_list_rows,
        }
    }

    /// Store a new child, creating any embedded need or allergy without an id
    /// and linking all of them. Returns the child with server-assigned ids.
    pub async fn create_child(&self, mut child: Child) -> Result<Child, ServiceError> {
        normalize(&mut child);
        validate(&child)?;

        child.id.clear();
        self.children.create(&mut child).await?;

        info!(
            "Created child {} with {} needs and {} allergies",
            child.id,
            child.needs.len(),
            child.allergies.len()
        );
        Ok(child)
    }

    pub async fn get_child(&self, id: &str) -> Result<Child, ServiceError> {
        require_id("id", id)?;
        Ok(self.children.get_by_id(id).await?)
    }

    /// Replace the child's fields. Association lists present in the request
    /// are reconciled; absent ones stay as stored.
    pub async fn update_child(
        &self,
        id: &str,
        request: UpdateChildRequest,
    ) -> Result<Child, ServiceError> {
        require_id("id", id)?;
        let (mut child, sync) = request.into_child(id.to_string());
        normalize(&mut child);
        validate(&child)?;

        self.children.update(&mut child, sync).await?;

        info!("Updated child {}", child.id);
        debug!(
            "Child {} now has {} needs and {} allergies",
            child.id,
            child.needs.len(),
            child.allergies.len()
        );
        Ok(child)
    }

    pub async fn delete_child(&self, id: &str) -> Result<(), ServiceError> {
        require_id("id", id)?;
        self.children.delete(id).await?;
        info!("Deleted child {}", id);
        Ok(())
    }

    pub async fn list_children(&self, filter: &ChildFilter) -> Result<Vec<Child>, ServiceError> {
        Ok(self.children.list(filter, self.max_list_rows).await?)
    }

    /// Link an existing need to an existing child and return the child as
    /// stored afterwards. Linking twice is not an error.
    pub async fn associate_need(&self, child_id: &str, need_id: &str) -> Result<Child, ServiceError> {
        require_id("child_id", child_id)?;
        require_id("need_id", need_id)?;
        self.children.get_by_id(child_id).await?;

        self.children.associate_need(child_id, need_id).await?;
        debug!("Linked need {} to child {}", need_id, child_id);

        Ok(self.children.get_by_id(child_id).await?)
    }

    pub async fn associate_allergy(
        &self,
        child_id: &str,
        allergy_id: &str,
    ) -> Result<Child, ServiceError> {
        require_id("child_id", child_id)?;
        require_id("allergy_id", allergy_id)?;
        self.children.get_by_id(child_id).await?;

        self.children.associate_allergy(child_id, allergy_id).await?;
        debug!("Linked allergy {} to child {}", allergy_id, child_id);

        Ok(self.children.get_by_id(child_id).await?)
    }
}

fn normalize(child: &mut Child) {
    child.photo_url = blank_to_none(child.photo_url.take());
    child.group_id = blank_to_none(child.group_id.take());
    for need in &mut child.needs {
        need.id = need.id.trim().to_string();
    }
    for allergy in &mut child.allergies {
        allergy.id = allergy.id.trim().to_string();
    }
}

fn validate(child: &Child) -> Result<(), ServiceError> {
    require("name", &child.name)?;
    if child.birth_date.is_none() {
        return Err(ServiceError::validation("birth_date", "is required"));
    }
    require("gender", &child.gender)?;

    for (i, need) in child.needs.iter().enumerate() {
        if !need.is_identified() {
            require(&format!("needs[{}].type", i), &need.kind)?;
        }
    }
    for (i, allergy) in child.allergies.iter().enumerate() {
        if !allergy.is_identified() {
            require(&format!("allergies[{}].type", i), &allergy.kind)?;
        }
    }
    Ok(())
}
