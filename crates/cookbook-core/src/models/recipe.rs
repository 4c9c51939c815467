// ABOUTME: Recipe aggregate root, its ingredient lines, and the slug derived from its title
// ABOUTME: Drafts are assembled before persistence; recipes carry server-assigned timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Ingredient, Unit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ingredient line of a recipe
///
/// Snapshot of the dictionary entry plus the recipe-specific amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Dictionary identity
    pub id: Uuid,
    /// Dictionary name
    pub name: String,
    /// Dictionary kind at read time
    pub kind: Option<String>,
    /// Measurement unit
    pub unit: Unit,
    /// Positive amount
    #[serde(rename = "amount")]
    pub quantity: f64,
}

impl RecipeIngredient {
    /// Attach a unit and quantity to a resolved dictionary entry
    #[must_use]
    pub fn from_ingredient(ingredient: &Ingredient, unit: Unit, quantity: f64) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
            kind: ingredient.kind.clone(),
            unit,
            quantity,
        }
    }
}

/// Recipe aggregate assembled by the service, before the store assigns timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    /// Recipe identity
    pub id: Uuid,
    /// Title, source of the slug
    pub title: String,
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
    /// Free-form tags, order preserved
    pub tags: Vec<String>,
    /// Ingredient lines, order preserved
    pub ingredients: Vec<RecipeIngredient>,
}

impl RecipeDraft {
    /// Alternate lookup key derived from the title
    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

/// Persisted recipe aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe identity
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Unique slug derived from the title
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
    /// Ingredient lines (empty in listings)
    pub ingredients: Vec<RecipeIngredient>,
    /// Set by the storage engine on insert
    pub created_at: DateTime<Utc>,
    /// Set by the storage engine on every write
    pub updated_at: DateTime<Utc>,
}

/// Derive the URL-safe slug for a recipe title
///
/// Lowercases the title and joins its alphanumeric runs with single
/// hyphens, so `"Spicy  Tofu!"` becomes `"spicy-tofu"`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Spicy Tofu"), "spicy-tofu");
        assert_eq!(slugify("  Spicy   Tofu!! "), "spicy-tofu");
        assert_eq!(slugify("Mom's Apple-Pie (v2)"), "mom-s-apple-pie-v2");
        assert_eq!(slugify("Crème Brûlée"), "crème-brûlée");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_draft_slug_follows_title() {
        let draft = RecipeDraft {
            id: Uuid::new_v4(),
            title: "Green Curry".to_owned(),
            headline: None,
            description: None,
            steps: None,
            servings: Some(2),
            url: None,
            tags: vec![],
            ingredients: vec![],
        };
        assert_eq!(draft.slug(), "green-curry");
    }

    #[test]
    fn test_ingredient_line_serializes_quantity_as_amount() {
        let line = RecipeIngredient {
            id: Uuid::nil(),
            name: "tofu".to_owned(),
            kind: None,
            unit: Unit::Gram,
            quantity: 200.0,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["amount"], 200.0);
        assert_eq!(json["unit"], "g");
    }
}
