// handlers/children/associate.rs - PUT /api/v1/children/:id/{needs,allergies}/:target_id
use axum::extract::{Path, State};

use crate::database::models::Child;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Link an existing need; repeating the call changes nothing
pub async fn need_put(
    State(state): State<AppState>,
    Path((id, need_id)): Path<(String, String)>,
) -> ApiResult<Child> {
    let child = state.children.associate_need(&id, &need_id).await?;
    Ok(ApiResponse::success(child))
}

/// Link an existing allergy; repeating the call changes nothing
pub async fn allergy_put(
    State(state): State<AppState>,
    Path((id, allergy_id)): Path<(String, String)>,
) -> ApiResult<Child> {
    let child = state.children.associate_allergy(&id, &allergy_id).await?;
    Ok(ApiResponse::success(child))
}
