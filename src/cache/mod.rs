//! Cache Module
//!
//! Cache-aside resolution over a pluggable key-value store, with key
//! derivation, per-endpoint TTLs and hit/miss statistics.

mod backend;
mod entry;
pub mod keys;
mod memory;
mod redis_store;
mod resolver;
mod stats;


// Re-export public types
pub use backend::CacheBackend;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use resolver::{CacheAside, Resolved};
pub use stats::{format_uptime, hit_rate_percent, StatsAggregator, StatsSnapshot};
