//! API route definitions

use crate::{handlers, state::AppState};
use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use std::sync::Arc;

/// Analytics endpoints
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/overview", post(handlers::overview::get_overview))
        .route("/api/v1/revenue", post(handlers::overview::get_revenue))
        .route(
            "/api/v1/status-counts",
            post(handlers::overview::get_status_counts),
        )
        .route("/api/v1/conversion", post(handlers::overview::get_conversion))
        .route("/", get(root_endpoint))
}

/// Health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// Combine all routes into a single router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(api_routes())
        .merge(health_routes())
        // Fallback handler for unknown routes
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (axum::http::StatusCode, axum::Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}

/// Service info
async fn root_endpoint(State(state): State<Arc<AppState>>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "service": "paydash payment overview API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "locale": state.options.locale.tag(),
        "buyerStatus": state.options.buyer_status,
        "endpoints": {
            "overview": "/api/v1/overview",
            "revenue": "/api/v1/revenue",
            "statusCounts": "/api/v1/status-counts",
            "conversion": "/api/v1/conversion",
            "health": "/health",
            "ready": "/ready"
        }
    }))
}
