// handlers/children/children_get.rs - GET /api/v1/children handler
use axum::extract::{rejection::QueryRejection, Query, State};

use crate::database::models::Child;
use crate::error::ApiError;
use crate::filter::ChildFilter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// List children, oldest first, up to the configured row cap.
/// `?name=` and `?group_id=` are accepted but do not narrow the result yet.
pub async fn children_get(
    State(state): State<AppState>,
    query: Result<Query<ChildFilter>, QueryRejection>,
) -> ApiResult<Vec<Child>> {
    let Query(filter) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let children = state.children.list_children(&filter).await?;
    Ok(ApiResponse::success(children))
}
