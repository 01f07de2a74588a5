//! History listing service

use crate::{error::AppResult, models::history::HistoryRecord, repository::Repository};

#[derive(Clone)]
pub struct HistoryService {
    repository: Repository,
}

impl HistoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List history, newest first.
    ///
    /// No equipment existence check: history holds soft references and must
    /// stay readable after the item is deleted.
    pub async fn list(
        &self,
        equipment_id: Option<i32>,
        limit: Option<i64>,
    ) -> AppResult<Vec<HistoryRecord>> {
        self.repository.history.list(equipment_id, limit).await
    }
}
