//! Health check handler

use crate::{db, middleware::AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// Liveness plus database reachability
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    db::record_pool_metrics(&state.db);

    match db::health_check(&state.db).await {
        db::HealthStatus::Healthy => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "database": "up"
            })),
        ),
        db::HealthStatus::Unhealthy(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "version": env!("CARGO_PKG_VERSION"),
                "database": "down"
            })),
        ),
    }
}
