// ABOUTME: Shared ingredient dictionary storage with name-keyed upserts
// ABOUTME: Resolves requested names to canonical identities, creating unseen names on the way
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cookbook_core::models::{Ingredient, ResolvedIngredients};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::errors::{translate, DatabaseError, DatabaseResult};
use super::transactions::ExecutionScope;

/// Resolves ingredient names against the `ingredients` table
#[derive(Clone)]
pub struct IngredientResolver {
    pool: SqlitePool,
}

impl IngredientResolver {
    /// Create a resolver whose pool is the fallback for [`ExecutionScope::Pool`]
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve every name to its canonical dictionary entry
    ///
    /// Names are upserted one at a time, in input order. A name that already
    /// exists keeps its id and kind; an unseen name is inserted with a fresh
    /// id. When two transactions race on the same unseen name the unique
    /// constraint on `name` lets exactly one row survive and both observe it.
    ///
    /// The result holds one entry per requested name (duplicates included)
    /// in the requested order, plus a name index.
    ///
    /// # Errors
    ///
    /// The first failing upsert aborts the call; nothing partial is returned
    pub async fn upsert_many(
        &self,
        scope: ExecutionScope<'_>,
        names: &[&str],
    ) -> DatabaseResult<ResolvedIngredients> {
        let mut conn = scope.resolve(&self.pool).await?;
        let mut resolved = ResolvedIngredients::with_capacity(names.len());

        for name in names {
            let row = sqlx::query(
                r"
                INSERT INTO ingredients (id, name)
                VALUES ($1, $2)
                ON CONFLICT (name) DO UPDATE SET name = excluded.name
                RETURNING id, name, kind
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(*name)
            .fetch_one(&mut *conn)
            .await
            .map_err(translate)?;

            resolved.push(row_to_ingredient(&row)?);
        }

        debug!(count = resolved.len(), "Resolved ingredient names");
        Ok(resolved)
    }

    /// Look up a dictionary entry by its natural key
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_by_name(
        &self,
        scope: ExecutionScope<'_>,
        name: &str,
    ) -> DatabaseResult<Option<Ingredient>> {
        let mut conn = scope.resolve(&self.pool).await?;

        let row = sqlx::query("SELECT id, name, kind FROM ingredients WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(translate)?;

        row.as_ref().map(row_to_ingredient).transpose()
    }

    /// Every dictionary entry, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_all(&self, scope: ExecutionScope<'_>) -> DatabaseResult<Vec<Ingredient>> {
        let mut conn = scope.resolve(&self.pool).await?;

        let rows = sqlx::query("SELECT id, name, kind FROM ingredients ORDER BY name ASC")
            .fetch_all(&mut *conn)
            .await
            .map_err(translate)?;

        rows.iter().map(row_to_ingredient).collect()
    }

    /// Number of dictionary entries
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count(&self, scope: ExecutionScope<'_>) -> DatabaseResult<u64> {
        let mut conn = scope.resolve(&self.pool).await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&mut *conn)
            .await
            .map_err(translate)?;

        u64::try_from(count).map_err(DatabaseError::unexpected)
    }
}

/// Convert a database row to an `Ingredient`
fn row_to_ingredient(row: &SqliteRow) -> DatabaseResult<Ingredient> {
    let id: String = row.try_get("id").map_err(translate)?;

    Ok(Ingredient {
        id: Uuid::parse_str(&id).map_err(DatabaseError::unexpected)?,
        name: row.try_get("name").map_err(translate)?,
        kind: row.try_get("kind").map_err(translate)?,
    })
}
