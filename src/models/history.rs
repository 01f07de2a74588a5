//! History log model (append-only)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::{Condition, HistoryAction};

/// One immutable checkout/check-in event.
///
/// Equipment name and serial number are snapshotted so the record survives
/// later equipment edits or deletion; `equipment_id` is a soft reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HistoryRecord {
    pub id: i32,
    pub equipment_id: Option<i32>,
    pub equipment_name: String,
    pub serial_number: Option<String>,
    pub action: HistoryAction,
    pub holder_name: String,
    pub department: String,
    pub quantity: i32,
    pub condition_on_return: Option<Condition>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new history entry, written inside the engine's transaction
#[derive(Debug)]
pub struct NewHistoryRecord {
    pub equipment_id: i32,
    pub equipment_name: String,
    pub serial_number: Option<String>,
    pub action: HistoryAction,
    pub holder_name: String,
    pub department: String,
    pub quantity: i32,
    pub condition_on_return: Option<Condition>,
}

/// History query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HistoryQuery {
    /// Restrict to one equipment item
    pub equipment_id: Option<i32>,
    /// Maximum records to return (default 50, capped at 500)
    pub limit: Option<i64>,
}
