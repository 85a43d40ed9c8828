//! Cache-aside resolver.
//!
//! Checks the store before calling the upstream, and populates the store on a
//! miss. Concurrent misses for the same key are not coalesced: each caller
//! fetches and writes independently.

use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::{CacheBackend, StatsAggregator};
use crate::error::{ProxyError, Result};

/// A resolved value and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: Value,
    pub from_cache: bool,
}

/// Runs the cache-aside sequence against a store, recording hits and misses.
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheBackend>,
    stats: Arc<StatsAggregator>,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheBackend>, stats: Arc<StatsAggregator>) -> Self {
        Self { store, stats }
    }

    /// Returns the cached value for `key`, or calls `fetch`, caches the result
    /// for `ttl`, and returns it.
    ///
    /// Errors from `fetch` are returned unchanged and nothing is cached.
    pub async fn resolve<F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<Resolved>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        if let Some(raw) = self.store.get(key).await? {
            self.stats.record_hit();
            let value = serde_json::from_str(&raw).map_err(|e| {
                ProxyError::Store(format!("Corrupt cache entry for '{}': {}", key, e))
            })?;
            info!(key, "Cache hit");
            return Ok(Resolved {
                value,
                from_cache: true,
            });
        }

        self.stats.record_miss();
        info!(key, "Cache miss, fetching from upstream");

        let value = fetch().await?;
        let raw = serde_json::to_string(&value)?;
        self.store.set_with_ttl(key, &raw, ttl).await?;
        debug!(key, ttl_secs = ttl.as_secs(), "Saved to cache");

        Ok(Resolved {
            value,
            from_cache: false,
        })
    }
}
