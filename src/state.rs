use std::sync::Arc;

use crate::config::{AppConfig, Environment};
use crate::database::repository::{HealthCheck, Repositories};
use crate::services::{
    CaretakerService, CatalogService, ChildService, GroupService, VolunteerService,
};

/// Shared handler state; cloned per request
#[derive(Clone)]
pub struct AppState {
    pub children: Arc<ChildService>,
    pub catalog: Arc<CatalogService>,
    pub groups: Arc<GroupService>,
    pub caretakers: Arc<CaretakerService>,
    pub volunteers: Arc<VolunteerService>,
    pub health: Arc<dyn HealthCheck>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(repos: Repositories, health: Arc<dyn HealthCheck>, config: &AppConfig) -> Self {
        let max_rows = config.api.max_list_rows;
        Self {
            children: Arc::new(ChildService::new(repos.children, max_rows)),
            catalog: Arc::new(CatalogService::new(repos.needs, repos.allergies, max_rows)),
            groups: Arc::new(GroupService::new(repos.groups, max_rows)),
            caretakers: Arc::new(CaretakerService::new(repos.caretakers, max_rows)),
            volunteers: Arc::new(VolunteerService::new(repos.volunteers, max_rows)),
            health,
            environment: config.environment,
        }
    }
}
