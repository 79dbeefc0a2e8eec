//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the content directory and the Axum
//! server lifecycle.

use crate::application::services::{LinkService, QrService};
use crate::config::Config;
use crate::infrastructure::persistence::{PgQrCodeRepository, PgShortLinkRepository};
use crate::infrastructure::storage::QrImageStore;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::ShortLinkGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - QR content directory
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The content directory cannot be created
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;

    let images = Arc::new(QrImageStore::new(config.data_dir.clone()));
    images
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    tracing::info!(dir = %config.data_dir.display(), "QR content directory ready");

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgShortLinkRepository::new(pool.clone()));
    let qr_repository = Arc::new(PgQrCodeRepository::new(pool));

    let state = AppState {
        link_service: Arc::new(LinkService::new(
            link_repository,
            Arc::new(ShortLinkGenerator::new()),
        )),
        qr_service: Arc::new(QrService::new(qr_repository, images)),
        base_url: config.base_url.clone(),
    };

    let app = app_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
