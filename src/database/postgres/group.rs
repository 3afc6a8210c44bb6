use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Group;
use crate::database::repository::GroupRepository;

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn create(&self, group: &mut Group) -> Result<(), DatabaseError> {
        let id = Uuid::new_v4().to_string();
        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO groups (id, name, description, age_range, capacity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(&group.age_range)
        .bind(group.capacity)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::during("group_repository.create"))?;

        group.id = id;
        group.created_at = Some(created_at);
        group.updated_at = Some(updated_at);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Group, DatabaseError> {
        sqlx::query_as::<_, Group>(
            r#"
            SELECT id, name, description, age_range, capacity, created_at, updated_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("group_repository.get_by_id"))?
        .ok_or_else(|| DatabaseError::NotFound(format!("group {}", id)))
    }

    async fn update(&self, group: &mut Group) -> Result<(), DatabaseError> {
        let stamps: Option<(DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            r#"
            UPDATE groups SET
                name = $1,
                description = $2,
                age_range = $3,
                capacity = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&group.name)
        .bind(&group.description)
        .bind(&group.age_range)
        .bind(group.capacity)
        .bind(&group.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("group_repository.update"))?;

        let (created_at, updated_at) =
            stamps.ok_or_else(|| DatabaseError::NotFound(format!("group {}", group.id)))?;
        group.created_at = Some(created_at);
        group.updated_at = Some(updated_at);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::during("group_repository.delete"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("group {}", id)));
        }
        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<Group>, DatabaseError> {
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, name, description, age_range, capacity, created_at, updated_at
            FROM groups
            ORDER BY name, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::during("group_repository.list"))?;
        Ok(groups)
    }
}
