use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Allergy;
use crate::database::repository::AllergyRepository;

pub struct PgAllergyRepository {
    pool: PgPool,
}

impl PgAllergyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AllergyRepository for PgAllergyRepository {
    async fn create(&self, allergy: &mut Allergy) -> Result<(), DatabaseError> {
        insert_allergy(&self.pool, allergy).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Allergy, DatabaseError> {
        sqlx::query_as::<_, Allergy>(
            r#"
            SELECT id, type, description, severity, created_at, updated_at
            FROM allergies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("allergy_repository.get_by_id"))?
        .ok_or_else(|| DatabaseError::NotFound(format!("allergy {}", id)))
    }

    async fn list(&self, limit: i64) -> Result<Vec<Allergy>, DatabaseError> {
        let allergies = sqlx::query_as::<_, Allergy>(
            r#"
            SELECT id, type, description, severity, created_at, updated_at
            FROM allergies
            ORDER BY created_at, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::during("allergy_repository.list"))?;
        Ok(allergies)
    }
}

pub(crate) async fn insert_allergy<'e, E>(
    executor: E,
    allergy: &mut Allergy,
) -> Result<(), DatabaseError>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4().to_string();
    let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
        r#"
        INSERT INTO allergies (id, type, description, severity)
        VALUES ($1, $2, $3, $4)
        RETURNING created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(&allergy.kind)
    .bind(&allergy.description)
    .bind(&allergy.severity)
    .fetch_one(executor)
    .await
    .map_err(DatabaseError::during("allergy_repository.create"))?;

    allergy.id = id;
    allergy.created_at = Some(created_at);
    allergy.updated_at = Some(updated_at);
    Ok(())
}

pub(crate) async fn linked_allergies(
    pool: &PgPool,
    child_id: &str,
) -> Result<Vec<Allergy>, DatabaseError> {
    let allergies = sqlx::query_as::<_, Allergy>(
        r#"
        SELECT a.id, a.type, a.description, a.severity, a.created_at, a.updated_at
        FROM allergies a
        INNER JOIN child_allergies ca ON a.id = ca.allergy_id
        WHERE ca.child_id = $1
        "#,
    )
    .bind(child_id)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::during("child_repository.load_allergies"))?;
    Ok(allergies)
}

#[derive(FromRow)]
struct LinkedAllergy {
    child_id: String,
    #[sqlx(flatten)]
    allergy: Allergy,
}

pub(crate) async fn linked_allergies_for(
    pool: &PgPool,
    child_ids: &[String],
) -> Result<HashMap<String, Vec<Allergy>>, DatabaseError> {
    let rows = sqlx::query_as::<_, LinkedAllergy>(
        r#"
        SELECT ca.child_id, a.id, a.type, a.description, a.severity, a.created_at, a.updated_at
        FROM allergies a
        INNER JOIN child_allergies ca ON a.id = ca.allergy_id
        WHERE ca.child_id = ANY($1)
        "#,
    )
    .bind(child_ids)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::during("child_repository.load_allergies"))?;

    let mut by_child: HashMap<String, Vec<Allergy>> = HashMap::new();
    for row in rows {
        by_child.entry(row.child_id).or_default().push(row.allergy);
    }
    Ok(by_child)
}
