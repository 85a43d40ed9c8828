//! Cache Entry Module
//!
//! A serialized upstream response held by the in-process store, with its expiry.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored JSON body and the instant it stops being served.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    /// Serialized upstream response
    pub value: String,
    /// When the entry expires
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiry instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against an explicit instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
