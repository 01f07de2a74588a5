//! Checkout, check-in and loan listing endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::ValidJson;
use crate::{
    error::AppResult,
    models::loan::{
        CheckinRequest, CheckinResponse, CheckoutRequest, CheckoutResponse, Loan, LoanQuery,
    },
};

/// Check out equipment to a holder
#[utoipa::path(
    post,
    path = "/equipment/{id}/checkout",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Checked out", body = CheckoutResponse),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Equipment or holder not found"),
        (status = 409, description = "Insufficient availability or equipment unavailable"),
        (status = 503, description = "Lock wait timed out; retry")
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    Path(equipment_id): Path<i32>,
    ValidJson(request): ValidJson<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<CheckoutResponse>)> {
    let response = state.services.checkout.checkout(equipment_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Check in some or all units of a loan
#[utoipa::path(
    post,
    path = "/loans/{id}/checkin",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Checked in", body = CheckinResponse),
        (status = 400, description = "Invalid quantity or condition"),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Quantity exceeds loan balance"),
        (status = 503, description = "Lock wait timed out; retry")
    )
)]
pub async fn checkin(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i32>,
    ValidJson(request): ValidJson<CheckinRequest>,
) -> AppResult<Json<CheckinResponse>> {
    let response = state.services.checkout.checkin(loan_id, request).await?;
    Ok(Json(response))
}

/// List active loans, newest first
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    params(LoanQuery),
    responses(
        (status = 200, description = "Active loans", body = Vec<Loan>),
        (status = 404, description = "Filtered equipment not found")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    Query(query): Query<LoanQuery>,
) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.list_active(query.equipment_id).await?;
    Ok(Json(loans))
}
