// handlers/public.rs - unauthenticated service endpoints
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root_get() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Kids API",
            "version": version,
            "description": "Childcare program records: children, needs, allergies, groups, caretakers and volunteers",
            "endpoints": {
                "health": "/health",
                "children": "/api/v1/children[/:id]",
                "child_needs": "/api/v1/children/:id/needs/:need_id",
                "child_allergies": "/api/v1/children/:id/allergies/:allergy_id",
                "needs": "/api/v1/needs[/:id]",
                "allergies": "/api/v1/allergies[/:id]",
                "groups": "/api/v1/groups[/:id]",
                "caretakers": "/api/v1/caretakers[/:id]",
                "volunteers": "/api/v1/volunteers[/:id]",
            }
        }
    }))
}

/// GET /health - 200 when the database answers, 503 otherwise
pub async fn health_get(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
