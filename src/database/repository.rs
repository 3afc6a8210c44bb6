//! Storage capabilities, one trait per entity.
//!
//! Services depend on these traits only. `database::postgres` holds the
//! PostgreSQL implementations; tests use an in-memory double.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Allergy, AssociationSync, Caretaker, Child, Group, Need, Volunteer,
};
use crate::database::postgres::{
    PgAllergyRepository, PgCaretakerRepository, PgChildRepository, PgGroupRepository,
    PgNeedRepository, PgVolunteerRepository,
};
use crate::filter::ChildFilter;

#[async_trait]
pub trait ChildRepository: Send + Sync {
    /// Store a new child together with any needs/allergies that lack an id and
    /// every junction row, all in one transaction. Assigns ids and timestamps
    /// in place.
    async fn create(&self, child: &mut Child) -> Result<(), DatabaseError>;

    /// Load a child with its live need and allergy lists.
    /// Fails with `DatabaseError::NotFound` when no row matches.
    async fn get_by_id(&self, id: &str) -> Result<Child, DatabaseError>;

    /// Update scalar fields and reconcile the association sets selected by `sync`.
    async fn update(&self, child: &mut Child, sync: AssociationSync) -> Result<(), DatabaseError>;

    async fn delete(&self, id: &str) -> Result<(), DatabaseError>;

    async fn list(&self, filter: &ChildFilter, limit: i64) -> Result<Vec<Child>, DatabaseError>;

    /// Link an existing need; an already linked pair is a no-op
    async fn associate_need(&self, child_id: &str, need_id: &str) -> Result<(), DatabaseError>;

    /// Link an existing allergy; an already linked pair is a no-op
    async fn associate_allergy(&self, child_id: &str, allergy_id: &str) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait NeedRepository: Send + Sync {
    async fn create(&self, need: &mut Need) -> Result<(), DatabaseError>;
    async fn get_by_id(&self, id: &str) -> Result<Need, DatabaseError>;
    async fn list(&self, limit: i64) -> Result<Vec<Need>, DatabaseError>;
}

#[async_trait]
pub trait AllergyRepository: Send + Sync {
    async fn create(&self, allergy: &mut Allergy) -> Result<(), DatabaseError>;
    async fn get_by_id(&self, id: &str) -> Result<Allergy, DatabaseError>;
    async fn list(&self, limit: i64) -> Result<Vec<Allergy>, DatabaseError>;
}

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn create(&self, group: &mut Group) -> Result<(), DatabaseError>;
    async fn get_by_id(&self, id: &str) -> Result<Group, DatabaseError>;
    async fn update(&self, group: &mut Group) -> Result<(), DatabaseError>;
    async fn delete(&self, id: &str) -> Result<(), DatabaseError>;
    async fn list(&self, limit: i64) -> Result<Vec<Group>, DatabaseError>;
}

#[async_trait]
pub trait CaretakerRepository: Send + Sync {
    async fn create(&self, caretaker: &mut Caretaker) -> Result<(), DatabaseError>;
    async fn get_by_id(&self, id: &str) -> Result<Caretaker, DatabaseError>;
    async fn update(&self, caretaker: &mut Caretaker) -> Result<(), DatabaseError>;
    async fn delete(&self, id: &str) -> Result<(), DatabaseError>;
    async fn list(&self, limit: i64) -> Result<Vec<Caretaker>, DatabaseError>;
}

#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    async fn create(&self, volunteer: &mut Volunteer) -> Result<(), DatabaseError>;
    async fn get_by_id(&self, id: &str) -> Result<Volunteer, DatabaseError>;
    async fn update(&self, volunteer: &mut Volunteer) -> Result<(), DatabaseError>;
    async fn delete(&self, id: &str) -> Result<(), DatabaseError>;
    async fn list(&self, limit: i64) -> Result<Vec<Volunteer>, DatabaseError>;
}

/// Liveness probe for the storage backend, used by `GET /health`
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// The full set of repositories a running server needs
#[derive(Clone)]
pub struct Repositories {
    pub children: Arc<dyn ChildRepository>,
    pub needs: Arc<dyn NeedRepository>,
    pub allergies: Arc<dyn AllergyRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub caretakers: Arc<dyn CaretakerRepository>,
    pub volunteers: Arc<dyn VolunteerRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            children: Arc::new(PgChildRepository::new(pool.clone())),
            needs: Arc::new(PgNeedRepository::new(pool.clone())),
            allergies: Arc::new(PgAllergyRepository::new(pool.clone())),
            groups: Arc::new(PgGroupRepository::new(pool.clone())),
            caretakers: Arc::new(PgCaretakerRepository::new(pool.clone())),
            volunteers: Arc::new(PgVolunteerRepository::new(pool)),
        }
    }
}
