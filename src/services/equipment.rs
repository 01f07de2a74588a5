//! Equipment metadata administration service
//!
//! Descriptive fields and manual status overrides live here, outside the
//! checkout/check-in engine. Edits that touch quantities still run under the
//! row lock so they cannot race a concurrent checkout.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
    repository::Repository,
    services::checkout::derive_assignment,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    lock_timeout_ms: u32,
}

impl EquipmentService {
    pub fn new(repository: Repository, lock_timeout_ms: u32) -> Self {
        Self {
            repository,
            lock_timeout_ms,
        }
    }

    /// List all equipment
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    /// Get equipment by ID
    pub async fn get(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Create equipment
    pub async fn create(&self, data: CreateEquipment) -> AppResult<Equipment> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.equipment.create(&data).await
    }

    /// Edit metadata, resize the total quantity, or override the status.
    ///
    /// Shrinking `total_quantity` below the currently-loaned sum is rejected;
    /// an allowed resize moves `available_quantity` by the same delta so the
    /// ledger invariant holds. Status and `assigned_to` are re-derived from
    /// the live loan set unless the caller sets a manual status.
    pub async fn update(&self, id: i32, data: UpdateEquipment) -> AppResult<Equipment> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = self.repository.begin_locked(self.lock_timeout_ms).await?;
        let mut item = self.repository.equipment.lock_for_update(&mut tx, id).await?;

        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(brand) = data.brand {
            item.brand = Some(brand);
        }
        if let Some(model) = data.model {
            item.model = Some(model);
        }
        if let Some(serial_number) = data.serial_number {
            item.serial_number = Some(serial_number);
        }
        if let Some(notes) = data.notes {
            item.notes = Some(notes);
        }

        if let Some(new_total) = data.total_quantity {
            let loaned = item.loaned_quantity();
            if new_total < loaned {
                return Err(AppError::Validation(format!(
                    "Cannot reduce total quantity to {}: {} unit(s) are checked out",
                    new_total, loaned
                )));
            }
            item.total_quantity = new_total;
            item.available_quantity = new_total - loaned;
        }

        let loan_count = self.repository.loans.count_for_item(&mut tx, id).await?;
        let sole_holder = if loan_count == 1 {
            self.repository
                .loans
                .sole_holder_name_for_item(&mut tx, id)
                .await?
        } else {
            None
        };
        let (derived_status, derived_assigned) = derive_assignment(
            item.total_quantity,
            item.available_quantity,
            loan_count,
            sole_holder.as_deref(),
        );

        item.status = match data.status {
            // Manual override in, or explicit request back to a derived state
            Some(status) if status.is_manual() => status,
            Some(_) => derived_status,
            // No status in the request: keep a standing manual override
            None if item.status.is_manual() => item.status,
            None => derived_status,
        };
        item.assigned_to = derived_assigned;

        let updated = self.repository.equipment.save(&mut tx, &item).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Delete equipment; rejected while any active loan references it.
    /// History records keep their denormalized copy of the item fields.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.repository.begin_locked(self.lock_timeout_ms).await?;
        self.repository.equipment.lock_for_update(&mut tx, id).await?;

        let loan_count = self.repository.loans.count_for_item(&mut tx, id).await?;
        if loan_count > 0 {
            return Err(AppError::HasActiveLoans(format!(
                "Cannot delete equipment {}: {} active loan(s) reference it",
                id, loan_count
            )));
        }

        self.repository.equipment.delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}
