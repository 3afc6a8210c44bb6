use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Need;
use crate::database::repository::NeedRepository;

pub struct PgNeedRepository {
    pool: PgPool,
}

impl PgNeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NeedRepository for PgNeedRepository {
    async fn create(&self, need: &mut Need) -> Result<(), DatabaseError> {
        insert_need(&self.pool, need).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Need, DatabaseError> {
        sqlx::query_as::<_, Need>(
            "SELECT id, type, description, created_at, updated_at FROM needs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("need_repository.get_by_id"))?
        .ok_or_else(|| DatabaseError::NotFound(format!("need {}", id)))
    }

    async fn list(&self, limit: i64) -> Result<Vec<Need>, DatabaseError> {
        let needs = sqlx::query_as::<_, Need>(
            r#"
            SELECT id, type, description, created_at, updated_at
            FROM needs
            ORDER BY created_at, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::during("need_repository.list"))?;
        Ok(needs)
    }
}

/// Insert a need row, writing the generated id and timestamps back into `need`
pub(crate) async fn insert_need<'e, E>(executor: E, need: &mut Need) -> Result<(), DatabaseError>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4().to_string();
    let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
        r#"
        INSERT INTO needs (id, type, description)
        VALUES ($1, $2, $3)
        RETURNING created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(&need.kind)
    .bind(&need.description)
    .fetch_one(executor)
    .await
    .map_err(DatabaseError::during("need_repository.create"))?;

    need.id = id;
    need.created_at = Some(created_at);
    need.updated_at = Some(updated_at);
    Ok(())
}

/// Needs linked to one child, through `child_needs`
pub(crate) async fn linked_needs(pool: &PgPool, child_id: &str) -> Result<Vec<Need>, DatabaseError> {
    let needs = sqlx::query_as::<_, Need>(
        r#"
        SELECT n.id, n.type, n.description, n.created_at, n.updated_at
        FROM needs n
        INNER JOIN child_needs cn ON n.id = cn.need_id
        WHERE cn.child_id = $1
        "#,
    )
    .bind(child_id)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::during("child_repository.load_needs"))?;
    Ok(needs)
}

#[derive(FromRow)]
struct LinkedNeed {
    child_id: String,
    #[sqlx(flatten)]
    need: Need,
}

/// Needs for a batch of children, keyed by child id
pub(crate) async fn linked_needs_for(
    pool: &PgPool,
    child_ids: &[String],
) -> Result<HashMap<String, Vec<Need>>, DatabaseError> {
    let rows = sqlx::query_as::<_, LinkedNeed>(
        r#"
        SELECT cn.child_id, n.id, n.type, n.description, n.created_at, n.updated_at
        FROM needs n
        INNER JOIN child_needs cn ON n.id = cn.need_id
        WHERE cn.child_id = ANY($1)
        "#,
    )
    .bind(child_ids)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::during("child_repository.load_needs"))?;

    let mut by_child: HashMap<String, Vec<Need>> = HashMap::new();
    for row in rows {
        by_child.entry(row.child_id).or_default().push(row.need);
    }
    Ok(by_child)
}
