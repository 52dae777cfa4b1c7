// handlers/public.rs - unauthenticated endpoints
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Hobbees API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/api/health (public)",
                "hobbies": "/api/hobbies[/:hobby_id] (protected)",
                "categories": "/api/hobbies/:hobby_id/categories[/:category_name] (protected)",
                "items": "/api/hobbies/:hobby_id/categories/:category_name/items[/:item_id] (protected)",
            }
        }
    }))
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.hobbies.store().ping().await.map_err(|e| {
        tracing::warn!("Health check failed: {}", e);
        ApiError::service_unavailable("Store unavailable")
    })?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "status": "ok",
                "timestamp": chrono::Utc::now(),
                "store": "ok"
            }
        })),
    ))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
