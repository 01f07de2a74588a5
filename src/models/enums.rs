//! Shared domain enums, stored as SMALLINT codes

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Equipment availability status.
///
/// `Available` and `InUse` are derived from the active loan set by the
/// checkout/check-in engine; `Maintenance` and `OutOfService` are only ever
/// set through the manual status-edit path.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum EquipmentStatus {
    Available = 0,
    InUse = 1,
    Maintenance = 2,
    OutOfService = 3,
}

impl EquipmentStatus {
    /// Statuses under manual control, never written by checkout/check-in.
    pub fn is_manual(self) -> bool {
        matches!(self, EquipmentStatus::Maintenance | EquipmentStatus::OutOfService)
    }
}

impl From<i16> for EquipmentStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => EquipmentStatus::InUse,
            2 => EquipmentStatus::Maintenance,
            3 => EquipmentStatus::OutOfService,
            _ => EquipmentStatus::Available,
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::InUse => "in_use",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::OutOfService => "out_of_service",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Observed physical condition, recorded at check-in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum Condition {
    Excellent = 0,
    Good = 1,
    Fair = 2,
    Poor = 3,
    NeedsRepair = 4,
}

impl From<i16> for Condition {
    fn from(v: i16) -> Self {
        match v {
            0 => Condition::Excellent,
            2 => Condition::Fair,
            3 => Condition::Poor,
            4 => Condition::NeedsRepair,
            _ => Condition::Good,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Condition::Excellent => "excellent",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
            Condition::NeedsRepair => "needs_repair",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// HistoryAction
// ---------------------------------------------------------------------------

/// Action recorded in a history entry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum HistoryAction {
    CheckOut = 0,
    CheckIn = 1,
}

impl From<i16> for HistoryAction {
    fn from(v: i16) -> Self {
        match v {
            1 => HistoryAction::CheckIn,
            _ => HistoryAction::CheckOut,
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HistoryAction::CheckOut => "check_out",
            HistoryAction::CheckIn => "check_in",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_through_codes() {
        for status in [
            EquipmentStatus::Available,
            EquipmentStatus::InUse,
            EquipmentStatus::Maintenance,
            EquipmentStatus::OutOfService,
        ] {
            assert_eq!(EquipmentStatus::from(status as i16), status);
        }
    }

    #[test]
    fn manual_statuses() {
        assert!(EquipmentStatus::Maintenance.is_manual());
        assert!(EquipmentStatus::OutOfService.is_manual());
        assert!(!EquipmentStatus::Available.is_manual());
        assert!(!EquipmentStatus::InUse.is_manual());
    }

    #[test]
    fn condition_parses_from_snake_case() {
        let c: Condition = serde_json::from_str("\"needs_repair\"").unwrap();
        assert_eq!(c, Condition::NeedsRepair);
        assert!(serde_json::from_str::<Condition>("\"pristine\"").is_err());
    }
}
