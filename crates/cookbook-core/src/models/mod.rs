// ABOUTME: Core data models for the recipe catalog
// ABOUTME: Recipes, ingredient lines, the ingredient dictionary, units, inputs, and suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shared ingredient dictionary
pub mod ingredient;
/// Create/update payloads
pub mod input;
/// Recipe aggregate
pub mod recipe;
/// Form suggestions
pub mod suggestion;
/// Measurement units
pub mod unit;

pub use ingredient::{Ingredient, ResolvedIngredients};
pub use input::{IngredientLineInput, RecipeInput};
pub use recipe::{slugify, Recipe, RecipeDraft, RecipeIngredient};
pub use suggestion::SuggestionOption;
pub use unit::{InvalidUnit, Unit, UnitKind};
