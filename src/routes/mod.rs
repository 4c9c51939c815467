// ABOUTME: Route module organization for the Cookbook HTTP API
// ABOUTME: Assembles domain routers and wraps them in the tower-http middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Cookbook server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Health check and readiness routes
pub mod health;
/// Recipe CRUD routes
pub mod recipes;
/// Form suggestion listings
pub mod suggestions;

pub use health::HealthRoutes;
pub use recipes::{ListRecipesResponse, RecipeRoutes, RecipeSummary};
pub use suggestions::{SuggestionRoutes, SuggestionsResponse};

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::HeaderMap, Router};
use cookbook_core::constants::limits;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::middleware::{create_request_span, record_response, request_id, setup_cors};
use crate::services::{RecipeService, SuggestionService};

/// Build the complete application router
///
/// Layers, outermost first: request ID assignment, tracing, request ID
/// propagation to the response, CORS, timeout, body size limit.
pub fn build_router(service: Arc<RecipeService>, config: &ServerConfig) -> Router {
    let db = service.database().clone();
    let suggestions = Arc::new(SuggestionService::new(db.clone()));

    Router::new()
        .merge(HealthRoutes::routes(db))
        .merge(RecipeRoutes::routes(service))
        .merge(SuggestionRoutes::routes(suggestions))
        .layer(DefaultBodyLimit::max(limits::MAX_REQUEST_BODY_BYTES))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(setup_cors(&config.cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(create_request_span)
                .on_response(record_response),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Attach the request ID, when present, to an error response
fn tag(error: AppError, headers: &HeaderMap) -> AppError {
    match request_id(headers) {
        Some(id) => error.with_request_id(id),
        None => error,
    }
}
