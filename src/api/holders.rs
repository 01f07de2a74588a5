//! Approved-holder directory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::ValidJson;
use crate::{
    error::AppResult,
    models::holder::{CreateHolder, Holder},
};

/// List all holders
#[utoipa::path(
    get,
    path = "/holders",
    tag = "holders",
    responses(
        (status = 200, description = "All holders", body = Vec<Holder>)
    )
)]
pub async fn list_holders(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Holder>>> {
    let holders = state.services.holders.list().await?;
    Ok(Json(holders))
}

/// Get one holder
#[utoipa::path(
    get,
    path = "/holders/{id}",
    tag = "holders",
    params(
        ("id" = i32, Path, description = "Holder ID")
    ),
    responses(
        (status = 200, description = "Holder found", body = Holder),
        (status = 404, description = "Holder not found")
    )
)]
pub async fn get_holder(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Holder>> {
    let holder = state.services.holders.get(id).await?;
    Ok(Json(holder))
}

/// Create a holder
#[utoipa::path(
    post,
    path = "/holders",
    tag = "holders",
    request_body = CreateHolder,
    responses(
        (status = 201, description = "Holder created", body = Holder),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_holder(
    State(state): State<crate::AppState>,
    ValidJson(request): ValidJson<CreateHolder>,
) -> AppResult<(StatusCode, Json<Holder>)> {
    let holder = state.services.holders.create(request).await?;
    Ok((StatusCode::CREATED, Json(holder)))
}
