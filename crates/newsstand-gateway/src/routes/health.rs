//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// Whether the market database answered a ping.
    pub store_connected: bool,
    /// House lookup cache counters.
    pub house_cache: HouseCacheJson,
}

/// House lookup cache counters.
#[derive(Debug, Serialize)]
pub struct HouseCacheJson {
    /// Stored lookups.
    pub entries: usize,
    /// Lookups served from memory.
    pub hits: u64,
    /// Lookups that queried the store.
    pub misses: u64,
}

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = state.market.executor().ping().await.is_ok();
    let stats = state.market.house_cache_stats();

    Json(HealthResponse {
        status: if store_connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store_connected,
        house_cache: HouseCacheJson {
            entries: state.market.house_cache_len(),
            hits: stats.hits() + stats.coalesced(),
            misses: stats.misses(),
        },
    })
}
