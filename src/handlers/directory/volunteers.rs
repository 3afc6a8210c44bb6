// handlers/directory/volunteers.rs - /api/v1/volunteers handlers
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::database::models::Volunteer;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/v1/volunteers
pub async fn volunteer_post(
    State(state): State<AppState>,
    payload: Result<Json<Volunteer>, JsonRejection>,
) -> ApiResult<Volunteer> {
    let Json(volunteer) = payload?;
    let volunteer = state.volunteers.create_volunteer(volunteer).await?;
    Ok(ApiResponse::created(volunteer))
}

/// GET /api/v1/volunteers
pub async fn volunteers_get(State(state): State<AppState>) -> ApiResult<Vec<Volunteer>> {
    Ok(ApiResponse::success(state.volunteers.list_volunteers().await?))
}

/// GET /api/v1/volunteers/:id
pub async fn volunteer_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Volunteer> {
    Ok(ApiResponse::success(state.volunteers.get_volunteer(&id).await?))
}

/// PUT /api/v1/volunteers/:id
pub async fn volunteer_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Volunteer>, JsonRejection>,
) -> ApiResult<Volunteer> {
    let Json(volunteer) = payload?;
    let volunteer = state.volunteers.update_volunteer(&id, volunteer).await?;
    Ok(ApiResponse::success(volunteer))
}

/// DELETE /api/v1/volunteers/:id
pub async fn volunteer_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.volunteers.delete_volunteer(&id).await?;
    Ok(ApiResponse::no_content())
}
