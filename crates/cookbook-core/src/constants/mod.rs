// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Constraint names, service defaults, and statement limits for the cookbook
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Names of the storage constraints surfaced in `DuplicateKey` and `Constraint` errors
pub mod constraints {
    /// Unique natural key on `ingredients.name`
    pub const INGREDIENTS_NAME_KEY: &str = "ingredients_name_key";
    /// Unique alternate key on `recipes.slug`
    pub const RECIPES_SLUG_KEY: &str = "recipes_slug_key";
    /// Primary key of `recipes`
    pub const RECIPES_PKEY: &str = "recipes_pkey";
    /// Primary key of `ingredients`
    pub const INGREDIENTS_PKEY: &str = "ingredients_pkey";
    /// Join row reference to its owning recipe
    pub const RECIPE_INGREDIENTS_RECIPE_FK: &str = "recipe_ingredients_recipe_id_fkey";
    /// Join row reference to the shared ingredient dictionary
    pub const RECIPE_INGREDIENTS_INGREDIENT_FK: &str = "recipe_ingredients_ingredient_id_fkey";
    /// Used when the engine reports a foreign key failure without naming it
    pub const UNNAMED_FOREIGN_KEY: &str = "foreign_key";

    /// Map a SQLite `table.column` uniqueness target to its canonical constraint name
    #[must_use]
    pub fn unique_constraint_for(target: &str) -> Option<&'static str> {
        match target {
            "ingredients.name" => Some(INGREDIENTS_NAME_KEY),
            "recipes.slug" => Some(RECIPES_SLUG_KEY),
            "recipes.id" => Some(RECIPES_PKEY),
            "ingredients.id" => Some(INGREDIENTS_PKEY),
            _ => None,
        }
    }
}

/// Service names used in structured logs
pub mod service_names {
    /// Name of the HTTP server
    pub const COOKBOOK_SERVER: &str = "cookbook-server";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;
    /// Default bind address
    pub const HTTP_HOST: &str = "0.0.0.0";
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/cookbook.db";
    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Default allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Default pool size
    pub const DATABASE_MAX_CONNECTIONS: u32 = 10;
    /// Default number of idle connections kept open
    pub const DATABASE_MIN_CONNECTIONS: u32 = 1;
    /// Default pool acquire timeout in seconds
    pub const DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 30;
    /// Default `SQLite` busy timeout in milliseconds
    pub const DATABASE_BUSY_TIMEOUT_MS: u64 = 5_000;
}

/// Limits applied by the persistence layer and request validation
pub mod limits {
    /// Join rows written by a single multi-row INSERT (5 bound values each)
    pub const MAX_JOIN_ROWS_PER_STATEMENT: usize = 500;
    /// Maximum accepted recipe title length in characters
    pub const MAX_TITLE_LENGTH: usize = 300;
    /// Maximum request body size in bytes
    pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Recipe collection endpoint
    pub const RECIPES: &str = "/recipes";
    /// Form suggestion endpoints
    pub const SUGGESTIONS: &str = "/suggestions";
}
