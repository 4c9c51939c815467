// ABOUTME: Route handlers listing form suggestions for units, ingredients, and tags
// ABOUTME: Each endpoint answers with an options array of label/value pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::tag;
use crate::{errors::AppError, services::SuggestionService};
use axum::{extract::State, http::HeaderMap, routing::get, Json, Router};
use cookbook_core::constants::endpoints;
use cookbook_core::models::SuggestionOption;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for every suggestion listing
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    /// Options in listing order
    pub options: Vec<SuggestionOption>,
}

/// Suggestion routes implementation
pub struct SuggestionRoutes;

impl SuggestionRoutes {
    /// Create all suggestion routes
    pub fn routes(service: Arc<SuggestionService>) -> Router {
        let base = endpoints::SUGGESTIONS;
        Router::new()
            .route(
                &format!("{base}/ingredients"),
                get(Self::handle_ingredients),
            )
            .route(&format!("{base}/tags"), get(Self::handle_tags))
            .route(&format!("{base}/units"), get(Self::handle_units))
            .with_state(service)
    }

    /// GET /suggestions/ingredients
    async fn handle_ingredients(
        State(service): State<Arc<SuggestionService>>,
        headers: HeaderMap,
    ) -> Result<Json<SuggestionsResponse>, AppError> {
        let options = service
            .ingredients()
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;
        Ok(Json(SuggestionsResponse { options }))
    }

    /// GET /suggestions/tags
    async fn handle_tags(
        State(service): State<Arc<SuggestionService>>,
        headers: HeaderMap,
    ) -> Result<Json<SuggestionsResponse>, AppError> {
        let options = service
            .tags()
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;
        Ok(Json(SuggestionsResponse { options }))
    }

    /// GET /suggestions/units
    async fn handle_units(
        State(service): State<Arc<SuggestionService>>,
    ) -> Json<SuggestionsResponse> {
        Json(SuggestionsResponse {
            options: service.units(),
        })
    }
}
