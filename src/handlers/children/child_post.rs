// handlers/children/child_post.rs - POST /api/v1/children handler
use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::database::models::Child;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Create a child. Embedded needs/allergies without an `id` are created,
/// the others are linked as they are.
pub async fn child_post(
    State(state): State<AppState>,
    payload: Result<Json<Child>, JsonRejection>,
) -> ApiResult<Child> {
    let Json(child) = payload?;
    let child = state.children.create_child(child).await?;
    Ok(ApiResponse::created(child))
}
