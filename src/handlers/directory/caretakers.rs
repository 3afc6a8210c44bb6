// handlers/directory/caretakers.rs - /api/v1/caretakers handlers
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::database::models::Caretaker;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/v1/caretakers
pub async fn caretaker_post(
    State(state): State<AppState>,
    payload: Result<Json<Caretaker>, JsonRejection>,
) -> ApiResult<Caretaker> {
    let Json(caretaker) = payload?;
    let caretaker = state.caretakers.create_caretaker(caretaker).await?;
    Ok(ApiResponse::created(caretaker))
}

/// GET /api/v1/caretakers
pub async fn caretakers_get(State(state): State<AppState>) -> ApiResult<Vec<Caretaker>> {
    Ok(ApiResponse::success(state.caretakers.list_caretakers().await?))
}

/// GET /api/v1/caretakers/:id
pub async fn caretaker_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Caretaker> {
    Ok(ApiResponse::success(state.caretakers.get_caretaker(&id).await?))
}

/// PUT /api/v1/caretakers/:id
pub async fn caretaker_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Caretaker>, JsonRejection>,
) -> ApiResult<Caretaker> {
    let Json(caretaker) = payload?;
    let caretaker = state.caretakers.update_caretaker(&id, caretaker).await?;
    Ok(ApiResponse::success(caretaker))
}

/// DELETE /api/v1/caretakers/:id
pub async fn caretaker_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.caretakers.delete_caretaker(&id).await?;
    Ok(ApiResponse::no_content())
}
