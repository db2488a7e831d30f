//! # Bazaar Seller API
//!
//! HTTP server for the seller dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Seller API Server                                │
//! │                                                                         │
//! │  Dashboard ───► HTTP (8080) ───► Services ───► PostgreSQL               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bazaar_db::Database;
use bazaar_seller_api::auth::JwtAuthGate;
use bazaar_seller_api::{app, AppState, Settings, Stores};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Bazaar seller API...");

    let settings = Settings::load().context("loading configuration")?;
    info!(
        port = settings.server.port,
        database = %settings.database.redacted_url(),
        monotonic = settings.orders.enforce_monotonic_transitions,
        "Configuration loaded"
    );

    let db = Database::new(settings.db_config())
        .await
        .context("connecting to PostgreSQL")?;
    info!("Connected to PostgreSQL");

    let auth = Arc::new(JwtAuthGate::new(
        settings.auth.jwt_secret.clone(),
        settings.auth.token_lifetime_secs,
    ));
    let state = AppState::new(Stores::postgres(&db), auth, settings.service_options())
        .with_database(db.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Seller API listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
