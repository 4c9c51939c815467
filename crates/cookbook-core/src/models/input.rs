// ABOUTME: Request payloads for creating and updating recipes
// ABOUTME: Validated by the HTTP layer before they reach the recipe service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Unit;
use serde::{Deserialize, Serialize};

/// Full replacement payload for a recipe (create and update share it)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    /// Title, source of the slug
    pub title: String,
    /// Short teaser
    #[serde(default)]
    pub headline: Option<String>,
    /// Long description
    #[serde(default)]
    pub description: Option<String>,
    /// Preparation steps
    #[serde(default)]
    pub steps: Option<String>,
    /// Number of servings
    #[serde(default)]
    pub servings: Option<u32>,
    /// Source URL
    #[serde(default)]
    pub url: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ingredient lines in display order
    #[serde(default)]
    pub ingredients: Vec<IngredientLineInput>,
}

/// One requested ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLineInput {
    /// Dictionary name; created on first use
    pub name: String,
    /// Positive amount (`amount` is accepted as in responses)
    #[serde(alias = "amount")]
    pub quantity: f64,
    /// Measurement unit
    pub unit: Unit,
}

impl IngredientLineInput {
    /// Convenience constructor
    pub fn new(name: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
        }
    }
}

impl RecipeInput {
    /// Payload with only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headline: None,
            description: None,
            steps: None,
            servings: None,
            url: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
        }
    }

    /// Ingredient names in line order, duplicates included
    #[must_use]
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients
            .iter()
            .map(|line| line.name.as_str())
            .collect()
    }
}
