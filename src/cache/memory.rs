//! In-process stand-in for Redis.
//!
//! Used by the test suite and for local runs without a Redis server
//! (`CACHE_BACKEND=memory`). Production deployments use
//! [`RedisStore`](super::RedisStore).
//!
//! A `HashMap` of entries behind a `tokio::sync::RwLock`. Expired entries read
//! as absent; [`MemoryStore::purge_expired`] reclaims them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::entry::CacheEntry;
use super::CacheBackend;
use crate::error::Result;

/// Redis substitute for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Purge Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Length ==
    /// Number of entries held, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry::new(value.to_string(), ttl));
        Ok(())
    }

    async fn flush(&self) -> Result<String> {
        self.entries.write().await.clear();
        Ok("OK".to_string())
    }

    async fn key_count(&self) -> Result<u64> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries.values().filter(|e| !e.is_expired_at(now)).count() as u64)
    }

    async fn is_connected(&self) -> bool {
        true
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_store_new() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.key_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = MemoryStore::new();

        assert_ok!(store.set_with_ttl("key1", "value1", Duration::from_secs(10)).await);
        let value = store.get("key1").await.unwrap();

        assert_eq!(value.as_deref(), Some("value1"));
        assert_eq!(store.key_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_overwrite_resets_value() {
        let store = MemoryStore::new();

        store.set_with_ttl("key1", "value1", Duration::from_secs(10)).await.unwrap();
        store.set_with_ttl("key1", "value2", Duration::from_secs(10)).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap().as_deref(), Some("value2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_ttl_expiration() {
        let store = MemoryStore::new();

        store.set_with_ttl("key1", "value1", Duration::from_millis(50)).await.unwrap();
        assert!(store.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(store.get("key1").await.unwrap(), None);
        assert_eq!(store.key_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_flush() {
        let store = MemoryStore::new();

        store.set_with_ttl("a", "1", Duration::from_secs(10)).await.unwrap();
        store.set_with_ttl("b", "2", Duration::from_secs(10)).await.unwrap();

        assert_eq!(store.flush().await.unwrap(), "OK");
        assert!(store.is_empty().await);
        assert_eq!(store.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_purge_expired() {
        let store = MemoryStore::new();

        store.set_with_ttl("short", "1", Duration::from_millis(30)).await.unwrap();
        store.set_with_ttl("long", "2", Duration::from_secs(10)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("long").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set_with_ttl("shared", "v", Duration::from_secs(10)).await.unwrap();
        assert_eq!(other.get("shared").await.unwrap().as_deref(), Some("v"));
    }
}
