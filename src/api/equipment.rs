//! Equipment metadata endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::ValidJson;
use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

/// List all equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "All equipment", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Equipment>>> {
    let items = state.services.equipment.list().await?;
    Ok(Json(items))
}

/// Get one equipment item
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment found", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let item = state.services.equipment.get(id).await?;
    Ok(Json(item))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    ValidJson(request): ValidJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let item = state.services.equipment.create(request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update equipment metadata, resize quantity, or override status
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 400, description = "Invalid request or total below checked-out units"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let item = state.services.equipment.update(id, request).await?;
    Ok(Json(item))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Active loans reference this equipment")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
