// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides temporary SQLite databases, services, and recipe input builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    unused_imports,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `cookbook_server`

use cookbook_core::models::{IngredientLineInput, RecipeInput, Unit};
use cookbook_server::{
    config::{DatabaseConfig, DatabaseUrl, PoolConfig},
    database::Database,
    services::RecipeService,
};
use std::sync::Once;
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Migrated database in a fresh temporary directory
///
/// Keep the returned `TempDir` alive for as long as the database is used.
pub async fn create_test_database() -> (TempDir, Database) {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("cookbook.db"),
    };
    let config = DatabaseConfig::with_url(url, true, PoolConfig::default()).unwrap();
    let db = Database::connect(&config).await.unwrap();
    (dir, db)
}

/// Recipe service over a fresh temporary database
pub async fn create_test_service() -> (TempDir, RecipeService) {
    let (dir, db) = create_test_database().await;
    (dir, RecipeService::new(db))
}

/// Recipe input with the given title and `(name, quantity, unit)` lines
pub fn recipe_input(title: &str, lines: &[(&str, f64, Unit)]) -> RecipeInput {
    let mut input = RecipeInput::titled(title);
    input.ingredients = lines
        .iter()
        .map(|&(name, quantity, unit)| IngredientLineInput::new(name, quantity, unit))
        .collect();
    input
}

/// The "Spicy Tofu" recipe used across tests
pub fn spicy_tofu() -> RecipeInput {
    let mut input = recipe_input(
        "Spicy Tofu",
        &[("tofu", 200.0, Unit::Gram), ("chili", 2.0, Unit::Countable)],
    );
    input.servings = Some(2);
    input.tags = vec!["vegan".to_owned(), "quick".to_owned()];
    input
}
