use axum::extract::State;

use crate::api::Payload;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::routes::AppState;

/// GET / - Service name and version
pub async fn root() -> ApiResult<Payload> {
    Ok(ApiResponse::success(Payload::Service {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> ApiResult<Payload> {
    match state.health.ping().await {
        Ok(()) => Ok(ApiResponse::success(Payload::Health { status: "ok", database: "ok" })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("Database unavailable"))
        }
    }
}
