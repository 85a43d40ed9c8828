//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{keys, CacheAside, CacheBackend, StatsAggregator};
use crate::error::{ProxyError, Result};
use crate::models::{annotate, ClearCacheResponse, HealthResponse, IndexResponse, StatsResponse};
use crate::upstream::CharacterApi;

/// Application state shared across all handlers.
///
/// The store, stats and upstream client are each shared behind an `Arc`, so
/// cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Key-value store backing the cache
    pub store: Arc<dyn CacheBackend>,
    /// Process-wide hit/miss/request counters
    pub stats: Arc<StatsAggregator>,
    /// Upstream character API
    pub upstream: CharacterApi,
    /// Cache-aside resolver over `store`
    pub resolver: CacheAside,
    /// Public base URL used in the index examples
    pub public_url: String,
}

impl AppState {
    /// Creates a new AppState around a store and upstream client.
    pub fn new(store: Arc<dyn CacheBackend>, upstream: CharacterApi) -> Self {
        let stats = Arc::new(StatsAggregator::new());
        let resolver = CacheAside::new(store.clone(), stats.clone());
        Self {
            store,
            stats,
            upstream,
            resolver,
            public_url: "http://localhost:3000".to_string(),
        }
    }

    /// Overrides the base URL shown in the index examples.
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }
}

/// Resolves `key` through the cache and wraps the result in the data envelope.
async fn cached_response<F, Fut>(
    state: &AppState,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<Json<Value>>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<Value>>,
{
    let started = Instant::now();
    let resolved = state.resolver.resolve(key, ttl, fetch).await?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if !resolved.from_cache {
        info!(key, ttl_secs = ttl.as_secs(), elapsed_ms, "Saved upstream response to cache");
    }

    Ok(Json(annotate(resolved.value, resolved.from_cache, elapsed_ms)))
}

/// Accepts a non-empty run of ASCII digits and hands it on verbatim, so ids
/// wider than any integer type still reach the upstream and come back as 404.
fn parse_id(raw: &str) -> Result<&str> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProxyError::InvalidRequest(format!(
            "Character ID must be a non-negative integer, got '{}'",
            raw
        )));
    }
    Ok(raw)
}

/// Handler for GET /characters and GET /character
pub async fn all_characters_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let upstream = &state.upstream;
    cached_response(&state, &keys::all_characters(), keys::ALL_CHARACTERS_TTL, move || {
        upstream.all_characters()
    })
    .await
    .inspect_err(|e| warn!(error = %e, "Failed to load all characters"))
}

/// Handler for GET /characters/:id and GET /character/:id
pub async fn character_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_id(&raw_id)?;
    let upstream = &state.upstream;

    cached_response(&state, &keys::character_by_id(id), keys::CHARACTER_BY_ID_TTL, move || async move {
        upstream
            .character(id)
            .await
            .map_err(|e| e.describe_not_found(format!("Character with ID {} not found", id)))
    })
    .await
    .inspect_err(|e| {
        if e.is_not_found() {
            info!(%id, "Character not found upstream");
        } else {
            warn!(%id, error = %e, "Failed to load character");
        }
    })
}

/// Handler for GET /characters/search/:name
pub async fn search_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>> {
    let upstream = &state.upstream;
    let query = name.as_str();

    cached_response(&state, &keys::character_search(&name), keys::SEARCH_TTL, move || async move {
        upstream
            .search(query)
            .await
            .map_err(|e| e.describe_not_found(format!("No characters found with name \"{}\"", query)))
    })
    .await
    .inspect_err(|e| {
        if !e.is_not_found() {
            warn!(name = %name, error = %e, "Character search failed");
        }
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let snapshot = state.stats.snapshot();
    let key_count = state.store.key_count().await?;
    let connected = state.store.is_connected().await;

    Ok(Json(StatsResponse::new(&snapshot, key_count, connected)))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Result<Json<ClearCacheResponse>> {
    let result = state
        .store
        .flush()
        .await
        .inspect_err(|e| warn!(error = %e, "Failed to clear cache"))?;
    info!(backend = state.store.name(), "Cache cleared");

    Ok(Json(ClearCacheResponse::new(result)))
}

/// Handler for GET /
pub async fn index_handler(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse::new(&state.public_url))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.store.is_connected().await;
    Json(HealthResponse::new(state.store.name(), connected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    fn test_state() -> AppState {
        // Nothing listens on port 9; tests here never reach the upstream
        let upstream = CharacterApi::new("http://127.0.0.1:9/api", Duration::from_secs(1)).unwrap();
        AppState::new(Arc::new(MemoryStore::new()), upstream)
    }

    #[tokio::test]
    async fn test_character_from_cache() {
        let state = test_state();
        state
            .store
            .set_with_ttl("character:1", r#"{"id":1,"name":"Rick Sanchez"}"#, Duration::from_secs(15))
            .await
            .unwrap();

        let Json(body) = character_handler(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();
        assert_eq!(body["name"], "Rick Sanchez");
        assert_eq!(body["_cache"], true);
        assert_eq!(state.stats.snapshot().hits, 1);
    }

    #[tokio::test]
    async fn test_character_invalid_id() {
        let state = test_state();

        let result = character_handler(State(state.clone()), Path("abc".to_string())).await;
        assert!(matches!(result, Err(ProxyError::InvalidRequest(_))));
        // Rejected before the cache is consulted
        assert_eq!(state.stats.snapshot().misses, 0);
    }

    #[tokio::test]
    async fn test_search_hits_lowercased_key() {
        let state = test_state();
        state
            .store
            .set_with_ttl("character:search:rick", r#"{"results":[]}"#, Duration::from_secs(30))
            .await
            .unwrap();

        let Json(body) = search_handler(State(state), Path("RiCk".to_string())).await.unwrap();
        assert_eq!(body["_cache"], true);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_cached() {
        let state = test_state();

        let result = all_characters_handler(State(state.clone())).await;
        assert!(matches!(result, Err(ProxyError::Upstream(_))));
        assert_eq!(state.store.key_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        state.stats.record_request();

        let Json(response) = stats_handler(State(state)).await.unwrap();
        assert_eq!(response.cache.hits, 0);
        assert_eq!(response.cache.misses, 0);
        assert_eq!(response.cache.hit_rate, 0.0);
        assert_eq!(response.requests.total, 1);
        assert!(response.redis.connected);
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let state = test_state();
        state.store.set_with_ttl("characters:all", "{}", Duration::from_secs(10)).await.unwrap();

        let Json(response) = clear_cache_handler(State(state.clone())).await.unwrap();
        assert_eq!(response.result, "OK");
        assert_eq!(state.store.key_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(response) = health_handler(State(test_state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.store.backend, "memory");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), "42");
        assert_eq!(parse_id("99999999999").unwrap(), "99999999999");
        assert_eq!(parse_id("007").unwrap(), "007");
        assert!(parse_id("-1").is_err());
        assert!(parse_id("+7").is_err());
        assert!(parse_id(" 7").is_err());
        assert!(parse_id("").is_err());
        assert!(parse_id("rick").is_err());
    }
}
