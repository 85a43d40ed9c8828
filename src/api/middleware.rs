//! Request tracking middleware.
//!
//! Counts every request toward the total shown by `/stats` and logs its
//! latency once the response is ready.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::info;

use super::handlers::AppState;

/// Increments the request counter and logs method, path, status and elapsed time.
pub async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    state.stats.record_request();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms,
        "Request completed"
    );

    response
}
