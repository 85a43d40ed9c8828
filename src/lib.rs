//! Character Cache - a cache-aside HTTP proxy for the Rick and Morty API
//!
//! Serves character data from Redis when fresh, falling back to the upstream
//! API and caching the response with an endpoint-specific TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ProxyError, Result};
pub use tasks::spawn_cleanup_task;
