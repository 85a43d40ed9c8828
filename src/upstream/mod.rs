//! Upstream Module
//!
//! HTTP client for the public character API that the proxy caches.

mod client;

pub use client::CharacterApi;
