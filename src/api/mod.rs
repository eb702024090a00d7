//! API layer - HTTP handlers and routing
//!
//! All endpoints live under `/api/v1`:
//! - `GET /posts` post search, `GET /posts/{id}` post detail
//! - `GET /tags/{title}` tag with post count
//! - `GET /health` database liveness

pub mod middleware;
pub mod posts;
pub mod responses;
pub mod tags;

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState};

/// Build the main API router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .nest("/posts", posts::router())
        .nest("/tags", tags::router())
        .route("/health", get(health))
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .nest("/api/v1", build_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// GET /api/v1/health
async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    state.pool.ping().await.map_err(|e| {
        tracing::warn!("Health check failed: {:#}", e);
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
