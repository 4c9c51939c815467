// ABOUTME: Recipe use cases: transactional create/update plus plain reads and deletes
// ABOUTME: Sequences begin, ingredient resolution, assembly, persistence, and commit or rollback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use cookbook_core::models::{
    Ingredient, Recipe, RecipeDraft, RecipeIngredient, RecipeInput, ResolvedIngredients,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::database::{
    Database, DatabaseError, DatabaseResult, ExecutionScope, ResultExt, SqliteTransactionGuard,
};

/// Progress of a transactional recipe write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStage {
    /// Transaction open, nothing written yet
    Started,
    /// Every ingredient name has a canonical identity
    IngredientsResolved,
    /// The aggregate is built from input lines and resolved identities
    Assembled,
    /// Header and join rows are written inside the transaction
    Persisted,
    /// Transaction committed
    Committed,
    /// Transaction rolled back after a failure
    RolledBack,
}

impl WriteStage {
    /// Label used in log events
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::IngredientsResolved => "ingredients_resolved",
            Self::Assembled => "assembled",
            Self::Persisted => "persisted",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        }
    }
}

impl fmt::Display for WriteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteMode {
    Create,
    Update,
}

impl WriteMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Recipe operations exposed to transport layers
///
/// Input is expected to be validated already. Every error carries the typed
/// kind from [`DatabaseError`] underneath its context layers.
#[derive(Clone)]
pub struct RecipeService {
    db: Database,
}

impl RecipeService {
    /// Create a service over `db`
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Underlying database
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// List all recipes without their ingredient lines
    ///
    /// # Errors
    ///
    /// Returns an error if the listing query fails
    pub async fn get_all(&self) -> DatabaseResult<Vec<Recipe>> {
        self.db
            .recipes()
            .get_all(ExecutionScope::Pool)
            .await
            .context("get all recipes")
    }

    /// Create a recipe with a fresh id
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` (`recipes_slug_key`) when the title's slug is taken
    /// - `Unexpected` for engine failures, wrapped with the failing step
    pub async fn create(&self, input: &RecipeInput) -> DatabaseResult<Recipe> {
        self.write(Uuid::new_v4(), input, WriteMode::Create).await
    }

    /// Load a recipe by id, or by slug when `id_or_slug` is not a UUID
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no recipe matches
    pub async fn get(&self, id_or_slug: &str) -> DatabaseResult<Recipe> {
        let recipes = self.db.recipes();
        match Uuid::parse_str(id_or_slug) {
            Ok(id) => recipes
                .get_by_id(ExecutionScope::Pool, id)
                .await
                .context("get recipe by id"),
            Err(_) => recipes
                .get_by_slug(ExecutionScope::Pool, id_or_slug)
                .await
                .context("get recipe by slug"),
        }
    }

    /// Replace a recipe's fields and ingredient lines
    ///
    /// # Errors
    ///
    /// - `NotFound` when no recipe has `id`
    /// - `DuplicateKey` when the new title's slug belongs to another recipe
    /// - `Constraint` when a line references a missing ingredient
    pub async fn update(&self, id: Uuid, input: &RecipeInput) -> DatabaseResult<Recipe> {
        self.write(id, input, WriteMode::Update).await
    }

    /// Delete a recipe; deleting an unknown id is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the delete statement fails
    pub async fn delete(&self, id: Uuid) -> DatabaseResult<u64> {
        let deleted = self
            .db
            .recipes()
            .delete(ExecutionScope::Pool, id)
            .await
            .context("delete recipe")?;
        info!(recipe_id = %id, deleted, "Recipe deleted");
        Ok(deleted)
    }

    /// Look up a dictionary entry by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_ingredient(&self, name: &str) -> DatabaseResult<Option<Ingredient>> {
        self.db
            .ingredients()
            .find_by_name(ExecutionScope::Pool, name)
            .await
            .context("find ingredient")
    }

    async fn write(
        &self,
        id: Uuid,
        input: &RecipeInput,
        mode: WriteMode,
    ) -> DatabaseResult<Recipe> {
        let mut tx = self.db.transactions().begin().await?;
        let mut stage = WriteStage::Started;
        debug!(recipe_id = %id, operation = mode.as_str(), stage = %stage, "Recipe write");

        match self.write_in(&mut tx, id, input, mode, &mut stage).await {
            Ok(recipe) => {
                if let Err(e) = tx.commit().await {
                    error!(
                        recipe_id = %id,
                        operation = mode.as_str(),
                        stage = %stage,
                        error = %e,
                        "Failed to commit recipe transaction"
                    );
                    return Err(e.context("commit transaction"));
                }
                info!(
                    recipe_id = %id,
                    operation = mode.as_str(),
                    stage = %WriteStage::Committed,
                    lines = recipe.ingredients.len(),
                    "Recipe saved"
                );
                Ok(recipe)
            }
            Err(primary) => {
                warn!(
                    recipe_id = %id,
                    operation = mode.as_str(),
                    stage = %stage,
                    error = %primary,
                    "Recipe write failed, rolling back"
                );
                match tx.rollback().await {
                    Ok(()) => debug!(recipe_id = %id, stage = %WriteStage::RolledBack, "Recipe write"),
                    Err(rollback_error) => error!(
                        recipe_id = %id,
                        error = %rollback_error,
                        "Failed to roll back recipe transaction"
                    ),
                }
                Err(primary)
            }
        }
    }

    async fn write_in(
        &self,
        tx: &mut SqliteTransactionGuard<'static>,
        id: Uuid,
        input: &RecipeInput,
        mode: WriteMode,
        stage: &mut WriteStage,
    ) -> DatabaseResult<Recipe> {
        let names = input.ingredient_names();
        let resolved = self
            .db
            .ingredients()
            .upsert_many(ExecutionScope::from(&mut *tx), &names)
            .await
            .context("upsert ingredients")?;
        *stage = WriteStage::IngredientsResolved;

        let draft = assemble(id, input, &resolved)?;
        *stage = WriteStage::Assembled;

        let recipes = self.db.recipes();
        let stored = match mode {
            WriteMode::Create => recipes.create(ExecutionScope::from(&mut *tx), draft).await,
            WriteMode::Update => recipes.update(ExecutionScope::from(&mut *tx), draft).await,
        }
        .context("store recipe")?;
        *stage = WriteStage::Persisted;

        Ok(stored)
    }
}

/// Build the aggregate, attaching each input line to its resolved identity by name
fn assemble(
    id: Uuid,
    input: &RecipeInput,
    resolved: &ResolvedIngredients,
) -> DatabaseResult<RecipeDraft> {
    if resolved.len() != input.ingredients.len() {
        return Err(DatabaseError::unexpected(format!(
            "resolved {} ingredients for {} lines",
            resolved.len(),
            input.ingredients.len()
        ))
        .context("assemble recipe"));
    }

    let ingredients = input
        .ingredients
        .iter()
        .map(|line| {
            resolved
                .get(&line.name)
                .map(|ingredient| {
                    RecipeIngredient::from_ingredient(ingredient, line.unit, line.quantity)
                })
                .ok_or_else(|| {
                    DatabaseError::unexpected(format!(
                        "ingredient '{}' was not resolved",
                        line.name
                    ))
                    .context("assemble recipe")
                })
        })
        .collect::<DatabaseResult<Vec<_>>>()?;

    Ok(RecipeDraft {
        id,
        title: input.title.clone(),
        headline: input.headline.clone(),
        description: input.description.clone(),
        steps: input.steps.clone(),
        servings: input.servings,
        url: input.url.clone(),
        tags: input.tags.clone(),
        ingredients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookbook_core::models::{IngredientLineInput, Unit};

    fn ingredient(name: &str) -> Ingredient {
        Ingredient {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            kind: None,
        }
    }

    fn spicy_tofu() -> RecipeInput {
        RecipeInput {
            ingredients: vec![
                IngredientLineInput::new("tofu", 200.0, Unit::Gram),
                IngredientLineInput::new("chili", 2.0, Unit::Countable),
            ],
            ..RecipeInput::titled("Spicy Tofu")
        }
    }

    #[test]
    fn test_assemble_attaches_quantities_by_name() {
        let tofu = ingredient("tofu");
        let chili = ingredient("chili");
        let mut resolved = ResolvedIngredients::with_capacity(2);
        resolved.push(tofu.clone());
        resolved.push(chili.clone());

        let draft = assemble(Uuid::nil(), &spicy_tofu(), &resolved).unwrap();

        assert_eq!(draft.slug(), "spicy-tofu");
        assert_eq!(draft.ingredients[0].id, tofu.id);
        assert_eq!(draft.ingredients[0].unit, Unit::Gram);
        assert!((draft.ingredients[0].quantity - 200.0).abs() < f64::EPSILON);
        assert_eq!(draft.ingredients[1].id, chili.id);
        assert_eq!(draft.ingredients[1].unit, Unit::Countable);
    }

    #[test]
    fn test_assemble_fails_fast_on_unresolved_name() {
        let mut resolved = ResolvedIngredients::with_capacity(2);
        resolved.push(ingredient("tofu"));
        resolved.push(ingredient("garlic"));

        let err = assemble(Uuid::nil(), &spicy_tofu(), &resolved).unwrap_err();
        assert!(matches!(err.kind(), DatabaseError::Unexpected { .. }));
        assert!(err.to_string().contains("chili"));
    }

    #[test]
    fn test_assemble_rejects_length_mismatch() {
        let mut resolved = ResolvedIngredients::with_capacity(1);
        resolved.push(ingredient("tofu"));

        let err = assemble(Uuid::nil(), &spicy_tofu(), &resolved).unwrap_err();
        assert_eq!(err.contexts(), vec!["assemble recipe"]);
    }

    #[test]
    fn test_write_stage_labels() {
        assert_eq!(WriteStage::IngredientsResolved.to_string(), "ingredients_resolved");
        assert_eq!(WriteStage::RolledBack.as_str(), "rolled_back");
    }
}
