//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    all_characters_handler, character_handler, clear_cache_handler, health_handler, index_handler,
    search_handler, stats_handler, AppState,
};
use super::middleware::track_requests;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /characters`, `GET /character` - All characters (cached 10s)
/// - `GET /characters/:id`, `GET /character/:id` - One character (cached 15s)
/// - `GET /characters/search/:name` - Search by name (cached 30s)
/// - `GET /stats` - Cache statistics
/// - `DELETE /cache` - Flush the cache
/// - `GET /health` - Health check
/// - `GET /` - Endpoint listing
///
/// # Middleware
/// - Request tracking: counts requests and logs latency
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/characters", get(all_characters_handler))
        .route("/character", get(all_characters_handler))
        .route("/characters/search/:name", get(search_handler))
        .route("/characters/:id", get(character_handler))
        .route("/character/:id", get(character_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
