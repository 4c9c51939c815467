// ABOUTME: Shared ingredient dictionary entries and their resolved-by-name view
// ABOUTME: Resolution keeps input order and a name index so identities are never misassigned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Entry of the shared ingredient dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Surrogate identity
    pub id: Uuid,
    /// Natural key, unique across the dictionary
    pub name: String,
    /// Categorical tag, populated only by curation
    pub kind: Option<String>,
}

/// Canonical identities for a list of requested ingredient names
///
/// Holds the identities in the same order as the requested names (one
/// entry per name, duplicates included) and an index from name to
/// identity. Callers attaching per-line data should use [`Self::get`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedIngredients {
    ordered: Vec<Ingredient>,
    by_name: HashMap<String, usize>,
}

impl ResolvedIngredients {
    /// Create an empty resolution with room for `capacity` names
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ordered: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
        }
    }

    /// Record the identity resolved for the next requested name
    pub fn push(&mut self, ingredient: Ingredient) {
        self.by_name
            .entry(ingredient.name.clone())
            .or_insert(self.ordered.len());
        self.ordered.push(ingredient);
    }

    /// Identity resolved for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.by_name.get(name).map(|&index| &self.ordered[index])
    }

    /// Number of resolved names, duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether no names were resolved
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Identities in requested order
    #[must_use]
    pub fn as_slice(&self) -> &[Ingredient] {
        &self.ordered
    }

    /// Iterate identities in requested order
    pub fn iter(&self) -> std::slice::Iter<'_, Ingredient> {
        self.ordered.iter()
    }

    /// Consume into the ordered list
    #[must_use]
    pub fn into_vec(self) -> Vec<Ingredient> {
        self.ordered
    }
}

impl<'a> IntoIterator for &'a ResolvedIngredients {
    type Item = &'a Ingredient;
    type IntoIter = std::slice::Iter<'a, Ingredient>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
