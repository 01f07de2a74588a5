//! History endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::history::{HistoryQuery, HistoryRecord},
};

/// List checkout/check-in history, newest first
#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "History records", body = Vec<HistoryRecord>)
    )
)]
pub async fn list_history(
    State(state): State<crate::AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<HistoryRecord>>> {
    let records = state
        .services
        .history
        .list(query.equipment_id, query.limit)
        .await?;
    Ok(Json(records))
}
