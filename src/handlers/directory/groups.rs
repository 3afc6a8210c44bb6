// handlers/directory/groups.rs - /api/v1/groups handlers
//
// Deleting a group leaves its children in place with no group.
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::database::models::Group;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/v1/groups
pub async fn group_post(
    State(state): State<AppState>,
    payload: Result<Json<Group>, JsonRejection>,
) -> ApiResult<Group> {
    let Json(group) = payload?;
    let group = state.groups.create_group(group).await?;
    Ok(ApiResponse::created(group))
}

/// GET /api/v1/groups
pub async fn groups_get(State(state): State<AppState>) -> ApiResult<Vec<Group>> {
    Ok(ApiResponse::success(state.groups.list_groups().await?))
}

/// GET /api/v1/groups/:id
pub async fn group_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Group> {
    Ok(ApiResponse::success(state.groups.get_group(&id).await?))
}

/// PUT /api/v1/groups/:id
pub async fn group_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Group>, JsonRejection>,
) -> ApiResult<Group> {
    let Json(group) = payload?;
    let group = state.groups.update_group(&id, group).await?;
    Ok(ApiResponse::success(group))
}

/// DELETE /api/v1/groups/:id
pub async fn group_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.groups.delete_group(&id).await?;
    Ok(ApiResponse::no_content())
}
