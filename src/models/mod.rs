//! Response models for the proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing HTTP response bodies, and the cache annotation envelope.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    annotate, ClearCacheResponse, ErrorResponse, HealthResponse, IndexResponse, StatsResponse,
};
