// handlers/children/child_put.rs - PUT /api/v1/children/:id handler
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::database::models::{Child, UpdateChildRequest};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Replace a child's fields. `needs`/`allergies` replace the linked sets
/// when present and are left alone when omitted.
pub async fn child_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateChildRequest>, JsonRejection>,
) -> ApiResult<Child> {
    let Json(request) = payload?;
    let child = state.children.update_child(&id, request).await?;
    Ok(ApiResponse::success(child))
}
