//! Checkout/check-in engine
//!
//! Each operation is one transaction: lock the rows, validate, mutate the
//! ledger and the loan set, append history, commit. Any early return drops
//! the transaction, which rolls everything back; partial state is never
//! visible to other connections.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, HistoryAction},
        history::NewHistoryRecord,
        loan::{CheckinRequest, CheckinResponse, CheckoutRequest, CheckoutResponse},
    },
    repository::Repository,
};

/// `assigned_to` value when more than one holder has units out
pub const MULTIPLE_HOLDERS: &str = "Multiple";

#[derive(Clone)]
pub struct CheckoutService {
    repository: Repository,
    lock_timeout_ms: u32,
}

impl CheckoutService {
    pub fn new(repository: Repository, lock_timeout_ms: u32) -> Self {
        Self {
            repository,
            lock_timeout_ms,
        }
    }

    /// Check out `quantity` units of an equipment item to an approved holder
    pub async fn checkout(
        &self,
        equipment_id: i32,
        request: CheckoutRequest,
    ) -> AppResult<CheckoutResponse> {
        // Shape validation happens before any lock is taken
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = self.repository.begin_locked(self.lock_timeout_ms).await?;

        let item = self
            .repository
            .equipment
            .lock_for_update(&mut tx, equipment_id)
            .await?;

        if item.status.is_manual() {
            return Err(AppError::NotCheckoutable(format!(
                "Equipment {} is {} and cannot be checked out",
                item.id, item.status
            )));
        }

        if request.quantity > item.available_quantity {
            return Err(AppError::InsufficientAvailability(format!(
                "requested {}, only {} of {} available",
                request.quantity, item.available_quantity, item.total_quantity
            )));
        }

        let holder = self
            .repository
            .holders
            .resolve(&mut tx, request.holder_id)
            .await?;

        let loan = self
            .repository
            .loans
            .create(&mut tx, equipment_id, request.holder_id, &holder, request.quantity)
            .await?;

        let new_available = item.available_quantity - request.quantity;
        let loan_count = self
            .repository
            .loans
            .count_for_item(&mut tx, equipment_id)
            .await?;
        // A single loan after the insert can only be the one just created
        let (status, assigned_to) = derive_assignment(
            item.total_quantity,
            new_available,
            loan_count,
            Some(&holder.name),
        );

        let equipment = self
            .repository
            .equipment
            .apply_assignment(
                &mut tx,
                equipment_id,
                new_available,
                status,
                assigned_to.as_deref(),
                None,
            )
            .await?;

        self.repository
            .history
            .append(
                &mut tx,
                &NewHistoryRecord {
                    equipment_id,
                    equipment_name: item.name.clone(),
                    serial_number: item.serial_number.clone(),
                    action: HistoryAction::CheckOut,
                    holder_name: holder.name.clone(),
                    department: holder.department.clone(),
                    quantity: request.quantity,
                    condition_on_return: None,
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            equipment_id,
            loan_id = loan.id,
            quantity = request.quantity,
            holder = %holder.name,
            "checked out"
        );

        Ok(CheckoutResponse {
            equipment,
            loan,
            message: format!("Checked out {} unit(s) to {}", request.quantity, holder.name),
        })
    }

    /// Check `quantity` units of a loan back in, recording their condition
    pub async fn checkin(
        &self,
        loan_id: i32,
        request: CheckinRequest,
    ) -> AppResult<CheckinResponse> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = self.repository.begin_locked(self.lock_timeout_ms).await?;

        // Lock order is loan first, then equipment; checkout locks only the
        // equipment row, so the two operations cannot deadlock each other
        let loan = self
            .repository
            .loans
            .lock_for_update(&mut tx, loan_id)
            .await?;

        if request.quantity > loan.quantity {
            return Err(AppError::ExceedsLoanBalance(format!(
                "Cannot return {} unit(s): loan has {} outstanding",
                request.quantity, loan.quantity
            )));
        }

        let item = self
            .repository
            .equipment
            .lock_for_update(&mut tx, loan.equipment_id)
            .await?;

        let new_available = item.available_quantity + request.quantity;
        let remaining = self
            .repository
            .loans
            .reduce_or_delete(&mut tx, &loan, request.quantity)
            .await?;

        let loan_count = self
            .repository
            .loans
            .count_for_item(&mut tx, loan.equipment_id)
            .await?;
        let sole_holder = if loan_count == 1 {
            self.repository
                .loans
                .sole_holder_name_for_item(&mut tx, loan.equipment_id)
                .await?
        } else {
            None
        };

        let (derived_status, assigned_to) = derive_assignment(
            item.total_quantity,
            new_available,
            loan_count,
            sole_holder.as_deref(),
        );
        // A manual maintenance/out_of_service status survives check-in; the
        // engine only ever writes available/in_use
        let status = if item.status.is_manual() {
            item.status
        } else {
            derived_status
        };

        let equipment = self
            .repository
            .equipment
            .apply_assignment(
                &mut tx,
                loan.equipment_id,
                new_available,
                status,
                assigned_to.as_deref(),
                Some(request.condition),
            )
            .await?;

        self.repository
            .history
            .append(
                &mut tx,
                &NewHistoryRecord {
                    equipment_id: loan.equipment_id,
                    equipment_name: item.name.clone(),
                    serial_number: item.serial_number.clone(),
                    action: HistoryAction::CheckIn,
                    holder_name: loan.holder_name.clone(),
                    department: loan.department.clone(),
                    quantity: request.quantity,
                    condition_on_return: Some(request.condition),
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            equipment_id = loan.equipment_id,
            loan_id,
            quantity = request.quantity,
            remaining,
            condition = %request.condition,
            "checked in"
        );

        Ok(CheckinResponse {
            equipment,
            returned_quantity: request.quantity,
            remaining_quantity: remaining,
            loan_closed: remaining == 0,
            condition: request.condition,
            message: format!(
                "Checked in {} unit(s) from {}",
                request.quantity, loan.holder_name
            ),
        })
    }
}

/// Derive `status` / `assigned_to` from the post-mutation quantities and
/// loan set.
///
/// `sole_holder_name` is only consulted when exactly one loan remains.
pub(crate) fn derive_assignment(
    total_quantity: i32,
    available_quantity: i32,
    active_loan_count: i64,
    sole_holder_name: Option<&str>,
) -> (EquipmentStatus, Option<String>) {
    let loaned = total_quantity - available_quantity;
    if loaned <= 0 {
        (EquipmentStatus::Available, None)
    } else if active_loan_count <= 1 {
        (
            EquipmentStatus::InUse,
            sole_holder_name.map(str::to_string),
        )
    } else {
        (EquipmentStatus::InUse, Some(MULTIPLE_HOLDERS.to_string()))
    }
}
