// ABOUTME: HTTP tests for the suggestion routes
// ABOUTME: Checks the units, ingredients, and tags listings through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::{http::StatusCode, Router};
use cookbook_core::models::{SuggestionOption, Unit};
use cookbook_server::config::ServerConfig;
use cookbook_server::routes::{build_router, SuggestionsResponse};
use cookbook_server::services::RecipeService;
use helpers::axum_test::AxumTestRequest;
use tempfile::TempDir;

async fn setup() -> (TempDir, Arc<RecipeService>, Router) {
    let (dir, service) = common::create_test_service().await;
    let service = Arc::new(service);
    let router = build_router(Arc::clone(&service), &ServerConfig::default());
    (dir, service, router)
}

async fn options(app: &Router, uri: &str) -> Vec<SuggestionOption> {
    AxumTestRequest::get(uri)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json::<SuggestionsResponse>()
        .options
}

fn values(options: &[SuggestionOption]) -> Vec<&str> {
    options.iter().map(|o| o.value.as_str()).collect()
}

#[tokio::test]
async fn test_units_list_every_unit_with_display_name() {
    let (_dir, _service, app) = setup().await;

    let units = options(&app, "/suggestions/units").await;

    assert_eq!(units.len(), Unit::ALL.len());
    assert_eq!(
        units[0],
        SuggestionOption {
            label: "kg".to_owned(),
            value: "kilo".to_owned(),
        }
    );
    assert!(units
        .iter()
        .any(|o| o.value == "countable" && o.label == "unit(s)"));
}

#[tokio::test]
async fn test_empty_catalog_has_no_ingredient_or_tag_options() {
    let (_dir, _service, app) = setup().await;

    assert!(options(&app, "/suggestions/ingredients").await.is_empty());
    assert!(options(&app, "/suggestions/tags").await.is_empty());
}

#[tokio::test]
async fn test_ingredients_and_tags_follow_the_catalog() {
    let (_dir, service, app) = setup().await;

    service.create(&common::spicy_tofu()).await.unwrap();
    let mut curry = common::recipe_input(
        "Green Curry",
        &[("basil", 10.0, Unit::Gram), ("tofu", 300.0, Unit::Gram)],
    );
    curry.tags = vec!["dinner".to_owned(), "vegan".to_owned()];
    service.create(&curry).await.unwrap();

    let ingredients = options(&app, "/suggestions/ingredients").await;
    assert_eq!(values(&ingredients), vec!["basil", "chili", "tofu"]);
    assert!(ingredients.iter().all(|o| o.label == o.value));

    let tags = options(&app, "/suggestions/tags").await;
    assert_eq!(values(&tags), vec!["dinner", "quick", "vegan"]);
}

#[tokio::test]
async fn test_deleted_recipe_tags_disappear() {
    let (_dir, service, app) = setup().await;

    let recipe = service.create(&common::spicy_tofu()).await.unwrap();
    service.delete(recipe.id).await.unwrap();

    assert!(options(&app, "/suggestions/tags").await.is_empty());
    // Dictionary entries outlive the recipes that introduced them
    let ingredients = options(&app, "/suggestions/ingredients").await;
    assert_eq!(values(&ingredients), vec!["chili", "tofu"]);
}
