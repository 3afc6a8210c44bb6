// handlers/children/child_delete.rs - DELETE /api/v1/children/:id handler
use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn child_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.children.delete_child(&id).await?;
    Ok(ApiResponse::no_content())
}
