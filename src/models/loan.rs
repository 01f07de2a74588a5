//! Active loan model and checkout/check-in request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::Condition;
use super::equipment::Equipment;

/// Active loan: one holder's outstanding claim on some quantity of an item.
/// Holder name and department are denormalized at loan time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub equipment_id: i32,
    pub holder_id: i32,
    pub holder_name: String,
    pub department: String,
    pub quantity: i32,
    pub checked_out_at: DateTime<Utc>,
}

/// Checkout request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    /// Approved holder ID
    pub holder_id: i32,
    /// Number of units to check out
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Check-in request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckinRequest {
    /// Number of units returned
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    /// Observed condition of the returned units
    pub condition: Condition,
}

/// Active loan query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LoanQuery {
    /// Restrict to one equipment item
    pub equipment_id: Option<i32>,
}

/// Checkout response: updated equipment snapshot plus the created loan
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub equipment: Equipment,
    pub loan: Loan,
    pub message: String,
}

/// Check-in response
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckinResponse {
    pub equipment: Equipment,
    /// Units returned in this check-in
    pub returned_quantity: i32,
    /// Units the holder still has out on this loan (0 when closed)
    pub remaining_quantity: i32,
    /// Whether the loan was fully settled and deleted
    pub loan_closed: bool,
    pub condition: Condition,
    pub message: String,
}
