// handlers/catalog/needs.rs - /api/v1/needs handlers
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::database::models::Need;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/v1/needs
pub async fn need_post(
    State(state): State<AppState>,
    payload: Result<Json<Need>, JsonRejection>,
) -> ApiResult<Need> {
    let Json(need) = payload?;
    let need = state.catalog.create_need(need).await?;
    Ok(ApiResponse::created(need))
}

/// GET /api/v1/needs
pub async fn needs_get(State(state): State<AppState>) -> ApiResult<Vec<Need>> {
    Ok(ApiResponse::success(state.catalog.list_needs().await?))
}

/// GET /api/v1/needs/:id
pub async fn need_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Need> {
    Ok(ApiResponse::success(state.catalog.get_need(&id).await?))
}
