// ABOUTME: Suggestion use cases listing units, dictionary ingredients, and catalog tags
// ABOUTME: Read-only; every listing runs in autocommit mode against the pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cookbook_core::models::{SuggestionOption, Unit};
use tracing::debug;

use crate::database::{Database, DatabaseResult, ExecutionScope, ResultExt};

/// Options offered to clients filling in a recipe
#[derive(Clone)]
pub struct SuggestionService {
    db: Database,
}

impl SuggestionService {
    /// Create a service over `db`
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every dictionary ingredient, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary cannot be read
    pub async fn ingredients(&self) -> DatabaseResult<Vec<SuggestionOption>> {
        let ingredients = self
            .db
            .ingredients()
            .list_all(ExecutionScope::Pool)
            .await
            .context("find all ingredients")?;

        debug!(count = ingredients.len(), "Ingredient suggestions");
        Ok(ingredients
            .into_iter()
            .map(|ingredient| SuggestionOption::plain(ingredient.name))
            .collect())
    }

    /// Distinct recipe tags in ascending order
    ///
    /// # Errors
    ///
    /// Returns an error if the tags cannot be read
    pub async fn tags(&self) -> DatabaseResult<Vec<SuggestionOption>> {
        let tags = self
            .db
            .recipes()
            .distinct_tags(ExecutionScope::Pool)
            .await
            .context("find all tags")?;

        Ok(tags.into_iter().map(SuggestionOption::plain).collect())
    }

    /// Every measurement unit with its display name
    #[must_use]
    pub fn units(&self) -> Vec<SuggestionOption> {
        unit_options()
    }
}

fn unit_options() -> Vec<SuggestionOption> {
    Unit::ALL.into_iter().map(SuggestionOption::from).collect()
}
