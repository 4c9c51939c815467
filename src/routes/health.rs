// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness always answers; readiness also round-trips the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use cookbook_core::constants::endpoints;
use serde_json::{json, Value};
use tracing::warn;

use crate::database::Database;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(db: Database) -> Router {
        Router::new()
            .route(endpoints::HEALTH_CHECK, get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(db)
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(State(db): State<Database>) -> (StatusCode, Json<Value>) {
        match db.ping().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            ),
            Err(e) => {
                warn!(error = %e, "Readiness check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "status": "unavailable",
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    })),
                )
            }
        }
    }
}
