// ABOUTME: HTTP server lifecycle for the Cookbook API
// ABOUTME: Opens the database, binds the listener, serves the router, and shuts down on signal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::database::Database;
use crate::routes::build_router;
use crate::services::RecipeService;

/// Run the HTTP server until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the listener
/// cannot be bound
pub async fn run(config: ServerConfig) -> Result<()> {
    let db = Database::connect(&config.database)
        .await
        .context("Failed to open database")?;
    let service = Arc::new(RecipeService::new(db.clone()));
    let router = build_router(service, &config);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped, closing database");
    db.close().await;
    Ok(())
}

/// Resolve when the process is asked to stop (Ctrl+C, or SIGTERM on unix)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
