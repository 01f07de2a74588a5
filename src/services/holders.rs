//! Approved-holder directory service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::holder::{CreateHolder, Holder},
    repository::Repository,
};

#[derive(Clone)]
pub struct HoldersService {
    repository: Repository,
}

impl HoldersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all holders
    pub async fn list(&self) -> AppResult<Vec<Holder>> {
        self.repository.holders.list().await
    }

    /// Get holder by ID
    pub async fn get(&self, id: i32) -> AppResult<Holder> {
        self.repository.holders.get_by_id(id).await
    }

    /// Create a holder
    pub async fn create(&self, data: CreateHolder) -> AppResult<Holder> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.holders.create(&data).await
    }
}
