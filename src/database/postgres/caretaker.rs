use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Caretaker;
use crate::database::repository::CaretakerRepository;

pub struct PgCaretakerRepository {
    pool: PgPool,
}

impl PgCaretakerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaretakerRepository for PgCaretakerRepository {
    async fn create(&self, caretaker: &mut Caretaker) -> Result<(), DatabaseError> {
        let id = Uuid::new_v4().to_string();
        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO caretakers (id, name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(&caretaker.name)
        .bind(&caretaker.email)
        .bind(&caretaker.phone)
        .bind(&caretaker.address)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::during("caretaker_repository.create"))?;

        caretaker.id = id;
        caretaker.created_at = Some(created_at);
        caretaker.updated_at = Some(updated_at);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Caretaker, DatabaseError> {
        sqlx::query_as::<_, Caretaker>(
            r#"
            SELECT id, name, email, phone, address, created_at, updated_at
            FROM caretakers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("caretaker_repository.get_by_id"))?
        .ok_or_else(|| DatabaseError::NotFound(format!("caretaker {}", id)))
    }

    async fn update(&self, caretaker: &mut Caretaker) -> Result<(), DatabaseError> {
        let stamps: Option<(DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            r#"
            UPDATE caretakers SET
                name = $1,
                email = $2,
                phone = $3,
                address = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&caretaker.name)
        .bind(&caretaker.email)
        .bind(&caretaker.phone)
        .bind(&caretaker.address)
        .bind(&caretaker.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("caretaker_repository.update"))?;

        let (created_at, updated_at) = stamps
            .ok_or_else(|| DatabaseError::NotFound(format!("caretaker {}", caretaker.id)))?;
        caretaker.created_at = Some(created_at);
        caretaker.updated_at = Some(updated_at);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM caretakers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::during("caretaker_repository.delete"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("caretaker {}", id)));
        }
        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<Caretaker>, DatabaseError> {
        let caretakers = sqlx::query_as::<_, Caretaker>(
            r#"
            SELECT id, name, email, phone, address, created_at, updated_at
            FROM caretakers
            ORDER BY name, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::during("caretaker_repository.list"))?;
        Ok(caretakers)
    }
}
