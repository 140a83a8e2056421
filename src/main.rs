//! KU Connect Server: student matching, connections and chat.
//!
//! Main entry point that wires all crates together and starts the server.

use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use kuconnect_api::{AppState, build_app};
use kuconnect_core::config::{AppConfig, DatabaseBackend};
use kuconnect_core::error::AppError;
use kuconnect_database::{DatabasePool, MemoryStore, Stores};
use kuconnect_service::{build_embedder, build_push_sender};

#[tokio::main]
async fn main() {
    let env = std::env::var("KUCONNECT_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = ?e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting KU Connect v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage backend ──────────────────────────────────
    let (stores, database) = match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            (Stores::postgres(pool.pool().clone()), Some(pool))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            (Stores::memory(MemoryStore::with_default_interests()), None)
        }
    };

    // ── Step 2: Outbound providers ───────────────────────────────
    let embedder = build_embedder(&config.embedding)?;
    let push = build_push_sender(&config.push)?;
    tracing::info!(
        embedding = ?config.embedding.provider,
        push = ?config.push.provider,
        "Providers initialized"
    );

    // ── Step 3: Services, realtime and notification worker ───────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let (state, worker) = AppState::build(config, stores, database.clone(), embedder, push);
    let worker_handle = worker.spawn();
    let realtime = state.realtime.clone();

    // ── Step 4: HTTP server ──────────────────────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(addr = %addr, "Listening");

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            realtime.shutdown();
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // Notifications already queued get `grace` to drain.
    if tokio::time::timeout(grace, worker_handle).await.is_err() {
        tracing::warn!("Notification worker did not finish within the shutdown grace period");
    }
    if let Some(pool) = database {
        pool.close().await;
    }

    tracing::info!("KU Connect stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
