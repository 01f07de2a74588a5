//! History log repository
//!
//! Append-only: this module exposes `append` and `list` and nothing else;
//! no UPDATE or DELETE against `loan_history` exists in the crate.

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::AppResult,
    models::history::{HistoryRecord, NewHistoryRecord},
};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

#[derive(Clone)]
pub struct HistoryRepository {
    pool: Pool<Postgres>,
}

impl HistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append one event inside the engine's transaction
    pub async fn append(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &NewHistoryRecord,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO loan_history
                (equipment_id, equipment_name, serial_number, action,
                 holder_name, department, quantity, condition_on_return)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.equipment_id)
        .bind(&record.equipment_name)
        .bind(&record.serial_number)
        .bind(record.action)
        .bind(&record.holder_name)
        .bind(&record.department)
        .bind(record.quantity)
        .bind(record.condition_on_return)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// List history, newest first, optionally for one equipment item
    pub async fn list(
        &self,
        equipment_id: Option<i32>,
        limit: Option<i64>,
    ) -> AppResult<Vec<HistoryRecord>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let records = match equipment_id {
            Some(id) => {
                sqlx::query_as::<_, HistoryRecord>(
                    r#"
                    SELECT * FROM loan_history
                    WHERE equipment_id = $1
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2
                    "#,
                )
                .bind(id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, HistoryRecord>(
                    "SELECT * FROM loan_history ORDER BY created_at DESC, id DESC LIMIT $1",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(records)
    }
}
