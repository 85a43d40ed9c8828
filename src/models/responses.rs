//! Response DTOs for the proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::cache::{format_uptime, StatsSnapshot};

// == Data Envelope ==
/// Adds `_cache` and `_responseTime` to an upstream payload.
///
/// Objects are annotated in place; any other JSON value is wrapped as
/// `{"data": value}` first.
pub fn annotate(value: Value, from_cache: bool, response_time_ms: u64) -> Value {
    let mut object = match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    object.insert("_cache".to_string(), Value::Bool(from_cache));
    object.insert("_responseTime".to_string(), json!(response_time_ms));
    Value::Object(object)
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: CacheSection,
    pub requests: RequestsSection,
    pub server: ServerSection,
    pub redis: StoreSection,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSection {
    pub hits: u64,
    pub misses: u64,
    /// Percentage of requests served from cache, two decimals
    pub hit_rate: f64,
    pub total_keys: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestsSection {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSection {
    /// Whole seconds, e.g. `"42s"`
    pub uptime: String,
    /// e.g. `"0h 0m 42s"`
    pub uptime_formatted: String,
    /// Process start time in RFC 3339
    pub started_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSection {
    pub connected: bool,
    pub keys_in_cache: u64,
}

impl StatsResponse {
    /// Builds the stats body from a counter snapshot and store introspection.
    pub fn new(snapshot: &StatsSnapshot, key_count: u64, connected: bool) -> Self {
        Self {
            cache: CacheSection {
                hits: snapshot.hits,
                misses: snapshot.misses,
                hit_rate: snapshot.hit_rate(),
                total_keys: key_count,
            },
            requests: RequestsSection {
                total: snapshot.total_requests,
            },
            server: ServerSection {
                uptime: format!("{}s", snapshot.uptime_secs),
                uptime_formatted: format_uptime(snapshot.uptime_secs),
                started_at: snapshot.started_at.to_rfc3339(),
            },
            redis: StoreSection {
                connected,
                keys_in_cache: key_count,
            },
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
    /// The store's flush acknowledgment
    pub result: String,
}

impl ClearCacheResponse {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            message: "Cache cleared successfully".to_string(),
            result: result.into(),
        }
    }
}

/// Response body for the index endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: Value,
    pub example: Value,
}

impl IndexResponse {
    /// Describes the available endpoints, with examples rooted at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            message: "Redis Caching Demo API".to_string(),
            endpoints: json!({
                "GET /characters": "Get all characters",
                "GET /character/:id": "Get character by ID",
                "GET /characters/search/:name": "Search characters by name",
                "GET /stats": "Get cache statistics",
                "GET /health": "Health check",
                "DELETE /cache": "Clear all cache"
            }),
            example: json!({
                "getAll": format!("{}/characters", base_url),
                "getById": format!("{}/character/1", base_url),
                "search": format!("{}/characters/search/rick", base_url),
                "stats": format!("{}/stats", base_url)
            }),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"healthy"` when the store is reachable, `"degraded"` otherwise
    pub status: String,
    pub store: StoreHealth,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreHealth {
    pub backend: String,
    pub connected: bool,
}

impl HealthResponse {
    pub fn new(backend: &str, connected: bool) -> Self {
        Self {
            status: if connected { "healthy" } else { "degraded" }.to_string(),
            store: StoreHealth {
                backend: backend.to_string(),
                connected,
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
