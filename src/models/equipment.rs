//! Equipment model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{Condition, EquipmentStatus};

/// Equipment record
///
/// `available_quantity`, `status` and `assigned_to` are owned by the
/// checkout/check-in engine; after every committed transaction
/// `available_quantity == total_quantity - sum(active loan quantities)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Equipment name / description
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// Number of units that exist
    pub total_quantity: i32,
    /// Number of units not currently on loan
    pub available_quantity: i32,
    pub status: EquipmentStatus,
    /// Sole holder's name, "Multiple", or null when nothing is loaned
    pub assigned_to: Option<String>,
    /// Condition observed at the most recent check-in
    pub condition: Option<Condition>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Equipment {
    /// Units currently out on loan
    pub fn loaned_quantity(&self) -> i32 {
        self.total_quantity - self.available_quantity
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    #[validate(range(min = 1, message = "Total quantity must be at least 1"))]
    pub total_quantity: i32,
    pub notes: Option<String>,
}

/// Update equipment request (metadata edit path)
///
/// `status` here is the manual override to maintenance / out_of_service and
/// back; availability-driven statuses are recomputed, not taken from the
/// caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    #[validate(range(min = 1, message = "Total quantity must be at least 1"))]
    pub total_quantity: Option<i32>,
    pub status: Option<EquipmentStatus>,
    pub notes: Option<String>,
}
