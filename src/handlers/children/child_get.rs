// handlers/children/child_get.rs - GET /api/v1/children/:id handler
use axum::extract::{Path, State};

use crate::database::models::Child;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn child_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Child> {
    let child = state.children.get_child(&id).await?;
    Ok(ApiResponse::success(child))
}
