// ABOUTME: Request payload validation for recipe create and update calls
// ABOUTME: Collects every offending field into one INVALID_INPUT error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Input validation for recipe payloads
//!
//! The recipe service trusts its input; handlers call
//! [`validate_recipe_input`] first.

use cookbook_core::constants::limits;
use cookbook_core::models::{slugify, RecipeInput};
use serde::Serialize;
use serde_json::json;
use url::Url;

use crate::errors::{AppError, AppResult};

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// JSON path of the field (`ingredients[1].quantity`)
    pub field: String,
    /// Why it was rejected
    pub reason: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Check a recipe payload, returning every violation found
#[must_use]
pub fn recipe_violations(input: &RecipeInput) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if input.title.trim().is_empty() {
        violations.push(FieldViolation::new("title", "must not be blank"));
    } else if slugify(&input.title).is_empty() {
        violations.push(FieldViolation::new(
            "title",
            "must contain at least one letter or digit",
        ));
    }
    if input.title.chars().count() > limits::MAX_TITLE_LENGTH {
        violations.push(FieldViolation::new(
            "title",
            format!("must be at most {} characters", limits::MAX_TITLE_LENGTH),
        ));
    }

    for (field, value) in [
        ("headline", &input.headline),
        ("description", &input.description),
        ("steps", &input.steps),
    ] {
        if value.as_deref().is_some_and(str::is_empty) {
            violations.push(FieldViolation::new(field, "must not be empty when present"));
        }
    }

    if input.servings == Some(0) {
        violations.push(FieldViolation::new("servings", "must be at least 1"));
    }

    if let Some(url) = &input.url {
        if let Err(e) = Url::parse(url) {
            violations.push(FieldViolation::new("url", format!("is not a valid URL: {e}")));
        }
    }

    for (index, tag) in input.tags.iter().enumerate() {
        if tag.trim().is_empty() {
            violations.push(FieldViolation::new(
                format!("tags[{index}]"),
                "must not be blank",
            ));
        }
    }

    for (index, line) in input.ingredients.iter().enumerate() {
        if line.name.trim().is_empty() {
            violations.push(FieldViolation::new(
                format!("ingredients[{index}].name"),
                "must not be blank",
            ));
        }
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            violations.push(FieldViolation::new(
                format!("ingredients[{index}].quantity"),
                "must be a positive number",
            ));
        }
    }

    violations
}

/// Validate a recipe payload
///
/// # Errors
///
/// Returns `INVALID_INPUT` listing every offending field in `details.fields`
pub fn validate_recipe_input(input: &RecipeInput) -> AppResult<()> {
    let violations = recipe_violations(input);
    if violations.is_empty() {
        return Ok(());
    }

    let summary = violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ");
    Err(AppError::invalid_input(format!("Invalid recipe: {summary}"))
        .with_details(json!({ "fields": violations })))
}
