use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::debug;
use uuid::Uuid;

use super::allergy::{insert_allergy, linked_allergies, linked_allergies_for};
use super::association::{associate, reconcile, Junction};
use super::need::{insert_need, linked_needs, linked_needs_for};
use crate::database::manager::DatabaseError;
use crate::database::models::{Allergy, AssociationSync, Child, Need};
use crate::database::repository::ChildRepository;
use crate::filter::ChildFilter;

pub struct PgChildRepository {
    pool: PgPool,
}

impl PgChildRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace the child's lists with what the junction tables hold right now
    async fn load_associations(&self, child: &mut Child) -> Result<(), DatabaseError> {
        let (needs, allergies) = futures::try_join!(
            linked_needs(&self.pool, &child.id),
            linked_allergies(&self.pool, &child.id),
        )?;
        child.needs = needs;
        child.allergies = allergies;
        Ok(())
    }
}

async fn store_new_needs(conn: &mut PgConnection, needs: &mut [Need]) -> Result<(), DatabaseError> {
    for need in needs.iter_mut().filter(|n| !n.is_identified()) {
        insert_need(&mut *conn, need).await?;
    }
    Ok(())
}

async fn store_new_allergies(
    conn: &mut PgConnection,
    allergies: &mut [Allergy],
) -> Result<(), DatabaseError> {
    for allergy in allergies.iter_mut().filter(|a| !a.is_identified()) {
        insert_allergy(&mut *conn, allergy).await?;
    }
    Ok(())
}

#[async_trait]
impl ChildRepository for PgChildRepository {
    async fn create(&self, child: &mut Child) -> Result<(), DatabaseError> {
        const OP: &str = "child_repository.create";
        let mut tx = self.pool.begin().await.map_err(DatabaseError::during(OP))?;

        store_new_needs(&mut tx, &mut child.needs).await?;
        store_new_allergies(&mut tx, &mut child.allergies).await?;

        let id = Uuid::new_v4().to_string();
        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO children (id, name, birth_date, gender, photo_url, group_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(&child.name)
        .bind(child.birth_date)
        .bind(&child.gender)
        .bind(&child.photo_url)
        .bind(&child.group_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::during(OP))?;

        child.id = id;
        child.created_at = Some(created_at);
        child.updated_at = Some(updated_at);

        for need in &child.needs {
            associate(&mut *tx, Junction::Needs, &child.id, &need.id).await?;
        }
        for allergy in &child.allergies {
            associate(&mut *tx, Junction::Allergies, &child.id, &allergy.id).await?;
        }

        tx.commit().await.map_err(DatabaseError::during(OP))?;
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Child, DatabaseError> {
        let mut child = sqlx::query_as::<_, Child>(
            r#"
            SELECT id, name, birth_date, gender, photo_url, group_id, created_at, updated_at
            FROM children
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("child_repository.get_by_id"))?
        .ok_or_else(|| DatabaseError::NotFound(format!("child {}", id)))?;

        self.load_associations(&mut child).await?;
        Ok(child)
    }

    async fn update(&self, child: &mut Child, sync: AssociationSync) -> Result<(), DatabaseError> {
        const OP: &str = "child_repository.update";
        let mut tx = self.pool.begin().await.map_err(DatabaseError::during(OP))?;

        let stamps: Option<(DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            r#"
            UPDATE children SET
                name = $1,
                birth_date = $2,
                gender = $3,
                photo_url = $4,
                group_id = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&child.name)
        .bind(child.birth_date)
        .bind(&child.gender)
        .bind(&child.photo_url)
        .bind(&child.group_id)
        .bind(&child.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::during(OP))?;

        let (created_at, updated_at) =
            stamps.ok_or_else(|| DatabaseError::NotFound(format!("child {}", child.id)))?;
        child.created_at = Some(created_at);
        child.updated_at = Some(updated_at);

        if sync.needs {
            store_new_needs(&mut tx, &mut child.needs).await?;
            let ids: Vec<String> = child.needs.iter().map(|n| n.id.clone()).collect();
            reconcile(&mut tx, Junction::Needs, &child.id, &ids).await?;
        }
        if sync.allergies {
            store_new_allergies(&mut tx, &mut child.allergies).await?;
            let ids: Vec<String> = child.allergies.iter().map(|a| a.id.clone()).collect();
            reconcile(&mut tx, Junction::Allergies, &child.id, &ids).await?;
        }

        tx.commit().await.map_err(DatabaseError::during(OP))?;

        self.load_associations(child).await
    }

    async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM children WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::during("child_repository.delete"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("child {}", id)));
        }
        Ok(())
    }

    async fn list(&self, filter: &ChildFilter, limit: i64) -> Result<Vec<Child>, DatabaseError> {
        if !filter.is_empty() {
            debug!("Child list filters are not applied yet: {:?}", filter);
        }

        let mut children = sqlx::query_as::<_, Child>(
            r#"
            SELECT id, name, birth_date, gender, photo_url, group_id, created_at, updated_at
            FROM children
            ORDER BY created_at, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::during("child_repository.list"))?;

        if children.is_empty() {
            return Ok(children);
        }

        let ids: Vec<String> = children.iter().map(|c| c.id.clone()).collect();
        let (mut needs, mut allergies) = futures::try_join!(
            linked_needs_for(&self.pool, &ids),
            linked_allergies_for(&self.pool, &ids),
        )?;
        for child in &mut children {
            child.needs = needs.remove(&child.id).unwrap_or_default();
            child.allergies = allergies.remove(&child.id).unwrap_or_default();
        }
        Ok(children)
    }

    async fn associate_need(&self, child_id: &str, need_id: &str) -> Result<(), DatabaseError> {
        associate(&self.pool, Junction::Needs, child_id, need_id).await
    }

    async fn associate_allergy(&self, child_id: &str, allergy_id: &str) -> Result<(), DatabaseError> {
        associate(&self.pool, Junction::Allergies, child_id, allergy_id).await
    }
}
