//! Redis-backed cache store.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, info};

use super::CacheBackend;
use crate::error::{ProxyError, Result};

/// Cache store talking to a single Redis server.
///
/// Holds one multiplexed, auto-reconnecting connection that is cloned per call.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis at `url`.
    ///
    /// Fails if the URL is invalid or the server cannot be reached.
    pub async fn connect(url: &str) -> Result<Self> {
        info!(url, "Connecting to Redis");
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheBackend for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| ProxyError::Store(format!("Failed to get key '{}': {}", key, e)))?;
        Ok(value)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        // EX takes whole seconds; never let a sub-second TTL become "no expiry".
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| ProxyError::Store(format!("Failed to set key '{}': {}", key, e)))?;

        debug!(key, ttl_secs, "Stored key in Redis");
        Ok(())
    }

    async fn flush(&self) -> Result<String> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(reply)
    }

    async fn key_count(&self) -> Result<u64> {
        let mut conn = self.conn.clone();
        let count: u64 = redis::cmd("DBSIZE").query_async(&mut conn).await?;
        Ok(count)
    }

    async fn is_connected(&self) -> bool {
        let mut conn = self.conn.clone();
        let pong: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        pong.is_ok()
    }
}
