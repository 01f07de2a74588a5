//! Business logic services

pub mod checkout;
pub mod equipment;
pub mod history;
pub mod holders;
pub mod loans;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub checkout: checkout::CheckoutService,
    pub equipment: equipment::EquipmentService,
    pub loans: loans::LoansService,
    pub history: history::HistoryService,
    pub holders: holders::HoldersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lock_timeout_ms: u32) -> Self {
        Self {
            checkout: checkout::CheckoutService::new(repository.clone(), lock_timeout_ms),
            equipment: equipment::EquipmentService::new(repository.clone(), lock_timeout_ms),
            loans: loans::LoansService::new(repository.clone()),
            history: history::HistoryService::new(repository.clone()),
            holders: holders::HoldersService::new(repository),
        }
    }
}
