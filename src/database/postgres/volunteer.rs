use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Volunteer;
use crate::database::repository::VolunteerRepository;

pub struct PgVolunteerRepository {
    pool: PgPool,
}

impl PgVolunteerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VolunteerRepository for PgVolunteerRepository {
    async fn create(&self, volunteer: &mut Volunteer) -> Result<(), DatabaseError> {
        let id = Uuid::new_v4().to_string();
        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO volunteers (id, name, email, phone, skills, availability)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(&volunteer.name)
        .bind(&volunteer.email)
        .bind(&volunteer.phone)
        .bind(&volunteer.skills)
        .bind(&volunteer.availability)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::during("volunteer_repository.create"))?;

        volunteer.id = id;
        volunteer.created_at = Some(created_at);
        volunteer.updated_at = Some(updated_at);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Volunteer, DatabaseError> {
        sqlx::query_as::<_, Volunteer>(
            r#"
            SELECT id, name, email, phone, skills, availability, created_at, updated_at
            FROM volunteers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("volunteer_repository.get_by_id"))?
        .ok_or_else(|| DatabaseError::NotFound(format!("volunteer {}", id)))
    }

    async fn update(&self, volunteer: &mut Volunteer) -> Result<(), DatabaseError> {
        let stamps: Option<(DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
            r#"
            UPDATE volunteers SET
                name = $1,
                email = $2,
                phone = $3,
                skills = $4,
                availability = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&volunteer.name)
        .bind(&volunteer.email)
        .bind(&volunteer.phone)
        .bind(&volunteer.skills)
        .bind(&volunteer.availability)
        .bind(&volunteer.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::during("volunteer_repository.update"))?;

        let (created_at, updated_at) = stamps
            .ok_or_else(|| DatabaseError::NotFound(format!("volunteer {}", volunteer.id)))?;
        volunteer.created_at = Some(created_at);
        volunteer.updated_at = Some(updated_at);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM volunteers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::during("volunteer_repository.delete"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("volunteer {}", id)));
        }
        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<Volunteer>, DatabaseError> {
        let volunteers = sqlx::query_as::<_, Volunteer>(
            r#"
            SELECT id, name, email, phone, skills, availability, created_at, updated_at
            FROM volunteers
            ORDER BY name, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::during("volunteer_repository.list"))?;
        Ok(volunteers)
    }
}
