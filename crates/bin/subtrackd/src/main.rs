//! # subtrackd: subtrack daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging from the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the repository, the service and the axum router
//! - Bind to a TCP port and serve, bounding each request by the configured timeout
//! - Handle graceful shutdown (SIGTERM/SIGINT) bounded by a drain deadline
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use subtrack_adapter_http_axum::router;
use subtrack_adapter_http_axum::state::AppState;
use subtrack_adapter_storage_sqlite_sqlx::{Config as StorageConfig, SqliteSubscriptionRepository};
use subtrack_app::services::subscription_service::SubscriptionService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;

    // Services
    let subscription_repo = SqliteSubscriptionRepository::new(db.pool().clone());
    let subscription_service = SubscriptionService::new(subscription_repo);

    // HTTP
    let app = router::with_request_timeout(
        router::build(AppState::new(subscription_service)),
        config.request_timeout(),
    );

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "subtrackd listening");

    let (draining_tx, draining_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                draining_tx.send_replace(true);
            })
            .await
    });

    let timeout = config.shutdown_timeout();
    tokio::select! {
        result = &mut server => result??,
        () = drain_deadline(draining_rx, timeout) => {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "shutdown deadline elapsed, dropping in-flight requests"
            );
            server.abort();
        }
    }

    tracing::info!("subtrackd stopped");
    Ok(())
}

/// Resolves `timeout` after draining begins. Never resolves if it doesn't.
async fn drain_deadline(mut draining: watch::Receiver<bool>, timeout: Duration) {
    if draining.wait_for(|started| *started).await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(timeout).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
