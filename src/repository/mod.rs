//! Repository layer for database operations
//!
//! Methods that participate in a checkout/check-in transaction take a
//! `&mut Transaction` so every read and write happens under the same lock
//! scope; plain reads go through the pool.

pub mod equipment;
pub mod history;
pub mod holders;
pub mod loans;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub loans: loans::LoansRepository,
    pub history: history::HistoryRepository,
    pub holders: holders::HoldersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            history: history::HistoryRepository::new(pool.clone()),
            holders: holders::HoldersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a transaction with a bounded lock wait.
    ///
    /// `SET LOCAL` scopes the timeout to this transaction; a wait past the
    /// bound fails with SQLSTATE 55P03, surfaced as a retryable error.
    pub async fn begin_locked(
        &self,
        lock_timeout_ms: u32,
    ) -> AppResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!("SET LOCAL lock_timeout = '{}ms'", lock_timeout_ms))
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}
