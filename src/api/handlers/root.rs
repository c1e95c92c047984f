use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "message": "API is up and running",
        "name": "Youth Registry API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "members": "/registered/",
            "docs": "/docs"
        }
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "status",
    responses(
        (status = 200, description = "Service and database are up"),
        (status = 503, description = "Database did not answer")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match state.service_context.db_pool.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({
            "status": "healthy",
            "database": "up",
            "timestamp": timestamp
        }))),
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({
                "status": "unhealthy",
                "database": "down",
                "timestamp": timestamp
            })))
        }
    }
}
