//! Character Cache - a cache-aside HTTP proxy for the Rick and Morty API
//!
//! Serves character data from Redis when fresh, falling back to the upstream
//! API and caching the response with an endpoint-specific TTL.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use character_cache::cache::{CacheBackend, MemoryStore, RedisStore};
use character_cache::config::BackendKind;
use character_cache::upstream::CharacterApi;
use character_cache::{create_router, spawn_cleanup_task, AppState, Config};

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to the cache store (fatal on failure)
/// 4. Build the upstream client with its request timeout
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "character_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Character Cache proxy");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, redis_url={}, upstream={}, upstream_timeout={}s, port={}",
        config.backend,
        config.redis_url,
        config.upstream_base_url,
        config.upstream_timeout_secs,
        config.server_port
    );

    let (store, cleanup_handle): (Arc<dyn CacheBackend>, Option<JoinHandle<()>>) =
        match config.backend {
            BackendKind::Redis => {
                let store = RedisStore::connect(&config.redis_url)
                    .await
                    .with_context(|| {
                        format!(
                            "Error connecting to Redis at {}; make sure Redis is running",
                            config.redis_url
                        )
                    })?;
                info!("Connected to Redis");
                let store: Arc<dyn CacheBackend> = Arc::new(store);
                (store, None)
            }
            BackendKind::Memory => {
                let store = MemoryStore::new();
                let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
                warn!("Using in-process cache store; entries are lost on restart and not shared between instances");
                let store: Arc<dyn CacheBackend> = Arc::new(store);
                (store, Some(handle))
            }
        };

    let upstream = CharacterApi::new(&config.upstream_base_url, config.upstream_timeout())
        .context("Failed to create upstream client")?;

    let state = AppState::new(store, upstream)
        .with_public_url(format!("http://localhost:{}", config.server_port));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the expiry sweep task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Expiry sweep task aborted");
    }
}
