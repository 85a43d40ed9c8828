//! API Module
//!
//! HTTP handlers, routing and middleware for the caching proxy.
//!
//! # Endpoints
//! - `GET /characters`, `GET /character` - All characters
//! - `GET /characters/:id`, `GET /character/:id` - One character
//! - `GET /characters/search/:name` - Search by name
//! - `GET /stats` - Cache statistics
//! - `DELETE /cache` - Flush the cache
//! - `GET /health` - Health check
//! - `GET /` - Endpoint listing

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
