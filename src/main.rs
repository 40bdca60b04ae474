//! Patreon Feed - A read-through caching proxy for creator posts
//!
//! Serves Atom feeds and search on the main port and Prometheus metrics on a
//! separate one.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patreon_feed::api::create_router;
use patreon_feed::metrics::metrics_router;
use patreon_feed::{AppState, Config};

/// Main entry point for the feed proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the upstream client and one cache per resource kind
/// 4. Start the metrics listener
/// 5. Start the HTTP server on the configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patreon_feed=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Patreon feed proxy");

    let config = Config::from_env();
    info!(
        "Configuration loaded: upstream={}, max_entries={}, ttl campaign={}s posts={}s search={}s, port={}, metrics_port={}",
        config.upstream_base_url,
        config.cache_max_entries,
        config.campaign_ttl,
        config.posts_ttl,
        config.search_ttl,
        config.server_port,
        config.metrics_port
    );
    if config.upstream_timeout.is_none() {
        info!("No UPSTREAM_TIMEOUT_SECS set; upstream requests use the transport default");
    }

    let state = AppState::from_config(&config).context("building application state")?;
    info!("Caches initialized");

    // One signal fans out to both listeners
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let metrics_listener = tokio::net::TcpListener::bind(metrics_addr)
        .await
        .with_context(|| format!("binding metrics listener on {}", metrics_addr))?;
    info!("Metrics listening on http://{}/metrics", metrics_addr);
    let metrics_server = tokio::spawn(
        axum::serve(metrics_listener, metrics_router(state.metrics.clone()))
            .with_graceful_shutdown(wait_for(shutdown_rx.clone()))
            .into_future(),
    );

    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding server on {}", addr))?;
    info!("Server listening on http://{}", addr);

    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for(shutdown_rx))
        .await
        .context("serving HTTP")?;
    metrics_server
        .await
        .context("metrics task panicked")?
        .context("serving metrics")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves once the shutdown flag flips.
fn wait_for(mut rx: watch::Receiver<bool>) -> impl Future<Output = ()> + Send + 'static {
    async move {
        let _ = rx.wait_for(|stop| *stop).await;
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
}
