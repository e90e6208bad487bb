//! Newsstand HTTP Gateway.
//!
//! This crate serves read-only market lookups (realm houses, item price
//! summaries, item definitions) over HTTP, as JSON or XML.

pub mod config;
pub mod error;
pub mod format;
pub mod markup;
pub mod routes;
pub mod store;

pub use config::{Args, GatewayConfig};
pub use error::AppError;
pub use store::MySqlExecutor;

use std::sync::Arc;

use axum::Router;
use newsstand_core::{CacheConfig, MarketService, QueryExecutor};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Market lookups with the shared house cache.
    pub market: Arc<MarketService>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(executor: Arc<dyn QueryExecutor>, config: GatewayConfig) -> Self {
        let cache = CacheConfig {
            max_entries: config.house_cache_max_entries,
        };

        Self {
            market: Arc::new(MarketService::with_cache_config(executor, cache)),
            config,
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::house::routes())
        .merge(routes::price::routes())
        .merge(routes::item::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
