//! Active loan set repository

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{holder::HolderIdentity, loan::Loan},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List active loans, newest first, optionally for one equipment item
    pub async fn list_active(&self, equipment_id: Option<i32>) -> AppResult<Vec<Loan>> {
        let loans = match equipment_id {
            Some(id) => {
                sqlx::query_as::<_, Loan>(
                    r#"
                    SELECT * FROM active_loans
                    WHERE equipment_id = $1
                    ORDER BY checked_out_at DESC, id DESC
                    "#,
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Loan>(
                    "SELECT * FROM active_loans ORDER BY checked_out_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(loans)
    }

    /// Create a loan inside the engine's transaction
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment_id: i32,
        holder_id: i32,
        holder: &HolderIdentity,
        quantity: i32,
    ) -> AppResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO active_loans (equipment_id, holder_id, holder_name, department, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(equipment_id)
        .bind(holder_id)
        .bind(&holder.name)
        .bind(&holder.department)
        .bind(quantity)
        .fetch_one(&mut **tx)
        .await?;
        Ok(loan)
    }

    /// Read a loan row under an exclusive row lock.
    ///
    /// Check-in locks the loan first, then the equipment row; checkout locks
    /// only the equipment row, so this ordering cannot deadlock against it.
    pub async fn lock_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM active_loans WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))
    }

    /// Settle `quantity` units of a locked loan: delete it when fully
    /// returned, otherwise decrement the balance. Returns the remaining
    /// quantity. Bounds were validated by the engine before locking.
    pub async fn reduce_or_delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        loan: &Loan,
        quantity: i32,
    ) -> AppResult<i32> {
        if quantity == loan.quantity {
            sqlx::query("DELETE FROM active_loans WHERE id = $1")
                .bind(loan.id)
                .execute(&mut **tx)
                .await?;
            Ok(0)
        } else {
            sqlx::query("UPDATE active_loans SET quantity = quantity - $2 WHERE id = $1")
                .bind(loan.id)
                .bind(quantity)
                .execute(&mut **tx)
                .await?;
            Ok(loan.quantity - quantity)
        }
    }

    /// Number of active loans for an item, as seen inside the transaction
    pub async fn count_for_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment_id: i32,
    ) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM active_loans WHERE equipment_id = $1")
                .bind(equipment_id)
                .fetch_one(&mut **tx)
                .await?;
        Ok(count)
    }

    /// Holder name when exactly one loan remains for the item; used to
    /// recompute `assigned_to` after a check-in
    pub async fn sole_holder_name_for_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment_id: i32,
    ) -> AppResult<Option<String>> {
        let name: Option<String> = sqlx::query_scalar(
            "SELECT holder_name FROM active_loans WHERE equipment_id = $1 ORDER BY id LIMIT 1",
        )
        .bind(equipment_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(name)
    }
}
