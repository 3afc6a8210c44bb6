// handlers/catalog/allergies.rs - /api/v1/allergies handlers
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::database::models::Allergy;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/v1/allergies
pub async fn allergy_post(
    State(state): State<AppState>,
    payload: Result<Json<Allergy>, JsonRejection>,
) -> ApiResult<Allergy> {
    let Json(allergy) = payload?;
    let allergy = state.catalog.create_allergy(allergy).await?;
    Ok(ApiResponse::created(allergy))
}

/// GET /api/v1/allergies
pub async fn allergies_get(State(state): State<AppState>) -> ApiResult<Vec<Allergy>> {
    Ok(ApiResponse::success(state.catalog.list_allergies().await?))
}

/// GET /api/v1/allergies/:id
pub async fn allergy_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Allergy> {
    Ok(ApiResponse::success(state.catalog.get_allergy(&id).await?))
}
