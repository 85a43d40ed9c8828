//! Cache backend trait.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Abstraction over the external key-value store.
///
/// Values are serialized JSON strings. Implementations must honour the TTL
/// given to [`CacheBackend::set_with_ttl`] so that an expired key reads as
/// absent.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Short backend name used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Get a raw value. Returns `None` if the key doesn't exist or has expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a raw value that expires after `ttl`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Remove every key in the namespace. Returns the store's acknowledgment.
    async fn flush(&self) -> Result<String>;

    /// Number of keys currently held.
    async fn key_count(&self) -> Result<u64>;

    /// Whether the store is currently reachable.
    async fn is_connected(&self) -> bool;
}
