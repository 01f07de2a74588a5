//! Active loan listing service

use crate::{error::AppResult, models::loan::Loan, repository::Repository};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List active loans, newest first, optionally filtered to one item
    pub async fn list_active(&self, equipment_id: Option<i32>) -> AppResult<Vec<Loan>> {
        if let Some(id) = equipment_id {
            // Distinguish "no loans" from "no such equipment"
            self.repository.equipment.get_by_id(id).await?;
        }
        self.repository.loans.list_active(equipment_id).await
    }
}
