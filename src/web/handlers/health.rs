//! Health and cache administration handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::services::SetHealth;
use crate::web::{
    AppState,
    responses::{ApiResponse, handle_result},
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub degraded_sets: usize,
}

#[derive(Debug, Serialize)]
pub struct CacheHealthResponse {
    pub degraded: bool,
    pub sets: Vec<SetHealth>,
}

/// Store connectivity plus a coarse view of the reference cache
///
/// Answers 503 when the store cannot be reached. Degraded reference sets are
/// reported but do not fail the check: writes still work and the next
/// successful refresh clears them.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match state.database.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            warn!("Health check could not reach the store: {:#}", e);
            "unreachable"
        }
    };
    let degraded_sets = state
        .registry
        .cache
        .health()
        .iter()
        .filter(|set| set.degraded.is_some())
        .count();

    let status = match (database, degraded_sets) {
        ("connected", 0) => "healthy",
        ("connected", _) => "degraded",
        _ => "unhealthy",
    };
    let code = if status == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        degraded_sets,
    };
    (code, Json(ApiResponse::success(body))).into_response()
}

/// Member count, generation, last refresh and degraded reason per set
pub async fn cache_health(State(state): State<AppState>) -> Response {
    let cache = &state.registry.cache;
    handle_result::<CacheHealthResponse>(Ok(CacheHealthResponse {
        degraded: cache.is_degraded(),
        sets: cache.health(),
    }))
}

/// Reload every reference set from the store
pub async fn refresh_cache(State(state): State<AppState>) -> Response {
    info!("Manual reference cache refresh requested");
    let cache = &state.registry.cache;
    let result = cache
        .load_all()
        .await
        .map(|_| CacheHealthResponse {
            degraded: cache.is_degraded(),
            sets: cache.health(),
        })
        .map_err(AppError::from);
    handle_result(result)
}
