//! Approved-holder directory repository

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::holder::{CreateHolder, Holder, HolderIdentity},
};

#[derive(Clone)]
pub struct HoldersRepository {
    pool: Pool<Postgres>,
}

impl HoldersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all holders
    pub async fn list(&self) -> AppResult<Vec<Holder>> {
        let rows = sqlx::query_as::<_, Holder>("SELECT * FROM holders ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get holder by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Holder> {
        sqlx::query_as::<_, Holder>("SELECT * FROM holders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Holder {} not found", id)))
    }

    /// Create a holder
    pub async fn create(&self, data: &CreateHolder) -> AppResult<Holder> {
        let row = sqlx::query_as::<_, Holder>(
            r#"
            INSERT INTO holders (name, department, approved)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.department)
        .bind(data.approved.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Resolve an approved holder's identity inside the engine's transaction
    pub async fn resolve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        holder_id: i32,
    ) -> AppResult<HolderIdentity> {
        let row: Option<(String, String)> = sqlx::query_as(
            "SELECT name, department FROM holders WHERE id = $1 AND approved = TRUE",
        )
        .bind(holder_id)
        .fetch_optional(&mut **tx)
        .await?;

        row.map(|(name, department)| HolderIdentity { name, department })
            .ok_or_else(|| {
                AppError::NotFound(format!("Holder {} not found or not approved", holder_id))
            })
    }
}
