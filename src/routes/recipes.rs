// ABOUTME: Route handlers for the recipes REST API
// ABOUTME: Validates payloads, delegates to RecipeService, and shapes JSON responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! `{id_or_slug}` path segments accept either a recipe UUID or its slug.

use super::tag;
use crate::{
    errors::{AppError, ErrorCode},
    services::RecipeService,
    validation::validate_recipe_input,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use cookbook_core::constants::endpoints;
use cookbook_core::models::{Recipe, RecipeInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Recipe as shown in listings (no ingredient lines)
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Unique identifier
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Slug derived from the title
    pub slug: String,
    /// Short teaser
    pub headline: Option<String>,
    /// Long description
    pub description: Option<String>,
    /// Preparation steps
    pub steps: Option<String>,
    /// Number of servings
    pub servings: Option<u32>,
    /// Source URL
    pub url: Option<String>,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            slug: recipe.slug,
            headline: recipe.headline,
            description: recipe.description,
            steps: recipe.steps,
            servings: recipe.servings,
            url: recipe.url,
            tags: recipe.tags,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Response for listing recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    /// Recipes, oldest first
    pub recipes: Vec<RecipeSummary>,
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(service: Arc<RecipeService>) -> Router {
        Router::new()
            .route(
                endpoints::RECIPES,
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                &format!("{}/:id_or_slug", endpoints::RECIPES),
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(service)
    }

    /// GET /recipes
    async fn handle_list(
        State(service): State<Arc<RecipeService>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let recipes = service
            .get_all()
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;

        let response = ListRecipesResponse {
            recipes: recipes.into_iter().map(RecipeSummary::from).collect(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// POST /recipes
    async fn handle_create(
        State(service): State<Arc<RecipeService>>,
        headers: HeaderMap,
        body: Result<Json<RecipeInput>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let input = parse_body(body, &headers)?;

        let recipe = service
            .create(&input)
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// GET /recipes/:id_or_slug
    async fn handle_get(
        State(service): State<Arc<RecipeService>>,
        Path(id_or_slug): Path<String>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let recipe = service
            .get(&id_or_slug)
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// PUT /recipes/:id_or_slug
    async fn handle_update(
        State(service): State<Arc<RecipeService>>,
        Path(id_or_slug): Path<String>,
        headers: HeaderMap,
        body: Result<Json<RecipeInput>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let input = parse_body(body, &headers)?;

        let existing = service
            .get(&id_or_slug)
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;
        let recipe = service
            .update(existing.id, &input)
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// DELETE /recipes/:id_or_slug
    async fn handle_delete(
        State(service): State<Arc<RecipeService>>,
        Path(id_or_slug): Path<String>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let existing = service
            .get(&id_or_slug)
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;
        service
            .delete(existing.id)
            .await
            .map_err(|e| tag(AppError::from(e), &headers))?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}

/// Unwrap and validate a JSON recipe payload
fn parse_body(
    body: Result<Json<RecipeInput>, JsonRejection>,
    headers: &HeaderMap,
) -> Result<RecipeInput, AppError> {
    let Json(input) = body.map_err(|rejection| {
        tag(
            AppError::new(ErrorCode::InvalidFormat, rejection.body_text()),
            headers,
        )
    })?;
    validate_recipe_input(&input).map_err(|e| tag(e, headers))?;
    Ok(input)
}
