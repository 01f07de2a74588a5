//! Equipment ledger repository

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{Condition, EquipmentStatus},
        equipment::{CreateEquipment, Equipment},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment; everything starts fully available
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment
                (name, brand, model, serial_number, total_quantity, available_quantity, status, notes)
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(data.total_quantity)
        .bind(EquipmentStatus::Available)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Read the equipment row under an exclusive row lock.
    ///
    /// Serializes concurrent checkouts/check-ins of the same item: the lock
    /// is held until the surrounding transaction commits or rolls back, so
    /// a second caller observes the first caller's committed quantities.
    pub async fn lock_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Write the engine-owned fields after a checkout or check-in.
    ///
    /// `condition` is only written on check-in; `None` leaves the last
    /// observed condition untouched.
    pub async fn apply_assignment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        available_quantity: i32,
        status: EquipmentStatus,
        assigned_to: Option<&str>,
        condition: Option<Condition>,
    ) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET available_quantity = $2,
                status = $3,
                assigned_to = $4,
                condition = COALESCE($5, condition),
                modif_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(available_quantity)
        .bind(status)
        .bind(assigned_to)
        .bind(condition)
        .fetch_one(&mut **tx)
        .await?;
        Ok(row)
    }

    /// Write the full row for a metadata edit (caller computed all fields
    /// under the row lock)
    pub async fn save(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &Equipment,
    ) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET name = $2,
                brand = $3,
                model = $4,
                serial_number = $5,
                total_quantity = $6,
                available_quantity = $7,
                status = $8,
                assigned_to = $9,
                notes = $10,
                modif_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.brand)
        .bind(&item.model)
        .bind(&item.serial_number)
        .bind(item.total_quantity)
        .bind(item.available_quantity)
        .bind(item.status)
        .bind(&item.assigned_to)
        .bind(&item.notes)
        .fetch_one(&mut **tx)
        .await?;
        Ok(row)
    }

    /// Delete equipment (caller has already locked the row and verified no
    /// active loans reference it)
    pub async fn delete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }
}
