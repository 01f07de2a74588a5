//! Approved-holder directory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Approved holder record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Holder {
    pub id: i32,
    pub name: String,
    pub department: String,
    pub approved: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Identity resolved for a checkout: the fields denormalized onto loans
/// and history records
#[derive(Debug, Clone)]
pub struct HolderIdentity {
    pub name: String,
    pub department: String,
}

/// Create holder request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHolder {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Department must not be empty"))]
    pub department: String,
    pub approved: Option<bool>,
}
