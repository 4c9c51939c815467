// ABOUTME: Recipe aggregate storage: header rows plus ordered ingredient join rows
// ABOUTME: Handles CRUD with full-replace updates and batched join-row inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use cookbook_core::constants::{constraints, limits};
use cookbook_core::models::{Recipe, RecipeDraft, RecipeIngredient, Unit};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::errors::{
    single_row, translate, translate_with_constraint_hint, DatabaseError, DatabaseResult,
};
use super::transactions::ExecutionScope;

/// Header columns selected by every read
const RECIPE_COLUMNS: &str = "id, title, slug, headline, description, steps, servings, url, tags, \
                              created_at, updated_at";

/// Stores recipes and their ingredient lines
///
/// Mutations are not atomic on their own; run them through an
/// [`ExecutionScope::Transaction`] when the header and join rows must land
/// together.
#[derive(Clone)]
pub struct RecipeStore {
    pool: SqlitePool,
}

impl RecipeStore {
    /// Create a store whose pool is the fallback for [`ExecutionScope::Pool`]
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every recipe, oldest first, without ingredient lines
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn get_all(&self, scope: ExecutionScope<'_>) -> DatabaseResult<Vec<Recipe>> {
        let mut conn = scope.resolve(&self.pool).await?;

        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY created_at, rowid"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(translate)?;

        rows.iter()
            .map(|row| row_to_recipe(row, Vec::new()))
            .collect()
    }

    /// Distinct tags used across all recipes, in ascending order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn distinct_tags(&self, scope: ExecutionScope<'_>) -> DatabaseResult<Vec<String>> {
        let mut conn = scope.resolve(&self.pool).await?;

        // tags is a JSON array column; json_each expands it into one row per tag
        let tags: Vec<String> = sqlx::query_scalar(
            r"
            SELECT DISTINCT tag.value
            FROM recipes, json_each(recipes.tags) AS tag
            ORDER BY tag.value ASC
            ",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(translate)?;

        debug!(count = tags.len(), "Listed recipe tags");
        Ok(tags)
    }

    /// Load a recipe with its ingredient lines by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no recipe has this id
    pub async fn get_by_id(&self, scope: ExecutionScope<'_>, id: Uuid) -> DatabaseResult<Recipe> {
        let mut conn = scope.resolve(&self.pool).await?;

        let rows = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"))
            .bind(id.to_string())
            .fetch_all(&mut *conn)
            .await
            .map_err(translate)?;
        let header = single_row(rows)?;

        let lines = load_lines(&mut conn, id).await?;
        row_to_recipe(&header, lines)
    }

    /// Load a recipe with its ingredient lines by slug
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no recipe has this slug
    pub async fn get_by_slug(
        &self,
        scope: ExecutionScope<'_>,
        slug: &str,
    ) -> DatabaseResult<Recipe> {
        let mut conn = scope.resolve(&self.pool).await?;

        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_all(&mut *conn)
        .await
        .map_err(translate)?;
        let header = single_row(rows)?;

        let id = parse_uuid(&header.try_get::<String, _>("id").map_err(translate)?)?;
        let lines = load_lines(&mut conn, id).await?;
        row_to_recipe(&header, lines)
    }

    /// Insert the header row and one join row per ingredient line
    ///
    /// The returned recipe carries the engine-assigned timestamps and the
    /// draft's ingredient lines exactly as given.
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` when the slug or id is taken
    /// - `Constraint` when a line references an unknown ingredient
    pub async fn create(
        &self,
        scope: ExecutionScope<'_>,
        draft: RecipeDraft,
    ) -> DatabaseResult<Recipe> {
        let mut conn = scope.resolve(&self.pool).await?;
        let slug = draft.slug();
        let tags_json = serde_json::to_string(&draft.tags).map_err(DatabaseError::unexpected)?;

        let row = sqlx::query(
            r"
            INSERT INTO recipes (
                id, title, slug, headline, description, steps, servings, url, tags
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING created_at, updated_at
            ",
        )
        .bind(draft.id.to_string())
        .bind(&draft.title)
        .bind(&slug)
        .bind(&draft.headline)
        .bind(&draft.description)
        .bind(&draft.steps)
        .bind(draft.servings.map(i64::from))
        .bind(&draft.url)
        .bind(&tags_json)
        .fetch_one(&mut *conn)
        .await
        .map_err(translate)?;

        let (created_at, updated_at) = row_timestamps(&row)?;
        insert_lines(&mut conn, draft.id, &draft.ingredients).await?;

        debug!(
            recipe_id = %draft.id,
            slug = %slug,
            lines = draft.ingredients.len(),
            "Recipe stored"
        );
        Ok(into_recipe(draft, slug, created_at, updated_at))
    }

    /// Replace the header fields and the whole ingredient set of a recipe
    ///
    /// # Errors
    ///
    /// - `NotFound` when no recipe has the draft's id
    /// - `DuplicateKey` when the new slug belongs to another recipe
    /// - `Constraint` when a line references an unknown ingredient
    pub async fn update(
        &self,
        scope: ExecutionScope<'_>,
        draft: RecipeDraft,
    ) -> DatabaseResult<Recipe> {
        let mut conn = scope.resolve(&self.pool).await?;
        let slug = draft.slug();
        let tags_json = serde_json::to_string(&draft.tags).map_err(DatabaseError::unexpected)?;

        let rows = sqlx::query(
            r"
            UPDATE recipes SET
                title = $1, slug = $2, headline = $3, description = $4, steps = $5,
                servings = $6, url = $7, tags = $8,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE id = $9
            RETURNING created_at, updated_at
            ",
        )
        .bind(&draft.title)
        .bind(&slug)
        .bind(&draft.headline)
        .bind(&draft.description)
        .bind(&draft.steps)
        .bind(draft.servings.map(i64::from))
        .bind(&draft.url)
        .bind(&tags_json)
        .bind(draft.id.to_string())
        .fetch_all(&mut *conn)
        .await
        .map_err(translate)?;
        let (created_at, updated_at) = row_timestamps(&single_row(rows)?)?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(draft.id.to_string())
            .execute(&mut *conn)
            .await
            .map_err(translate)?;
        insert_lines(&mut conn, draft.id, &draft.ingredients).await?;

        debug!(
            recipe_id = %draft.id,
            lines = draft.ingredients.len(),
            "Recipe replaced"
        );
        Ok(into_recipe(draft, slug, created_at, updated_at))
    }

    /// Delete a recipe; its join rows go with it
    ///
    /// Returns the number of deleted recipes. An unknown id deletes nothing
    /// and is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete(&self, scope: ExecutionScope<'_>, id: Uuid) -> DatabaseResult<u64> {
        let mut conn = scope.resolve(&self.pool).await?;

        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.to_string())
            .execute(&mut *conn)
            .await
            .map_err(translate)?;

        debug!(recipe_id = %id, deleted = result.rows_affected(), "Recipe delete");
        Ok(result.rows_affected())
    }
}

/// Write join rows in caller order, a bounded number of rows per statement
async fn insert_lines(
    conn: &mut SqliteConnection,
    recipe_id: Uuid,
    lines: &[RecipeIngredient],
) -> DatabaseResult<()> {
    let recipe_id = recipe_id.to_string();
    let numbered: Vec<(i64, &RecipeIngredient)> = (0_i64..).zip(lines).collect();

    for chunk in numbered.chunks(limits::MAX_JOIN_ROWS_PER_STATEMENT) {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, position, unit, quantity) ",
        );
        builder.push_values(chunk, |mut row, &(position, line)| {
            row.push_bind(recipe_id.clone())
                .push_bind(line.id.to_string())
                .push_bind(position)
                .push_bind(line.unit.as_str())
                .push_bind(line.quantity);
        });

        builder
            .build()
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                translate_with_constraint_hint(e, constraints::RECIPE_INGREDIENTS_INGREDIENT_FK)
            })?;
    }

    Ok(())
}

/// Ingredient lines of one recipe in written order
async fn load_lines(
    conn: &mut SqliteConnection,
    recipe_id: Uuid,
) -> DatabaseResult<Vec<RecipeIngredient>> {
    let rows = sqlx::query(
        r"
        SELECT i.id, i.name, i.kind, ri.unit, ri.quantity
        FROM recipe_ingredients ri
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = $1
        ORDER BY ri.position
        ",
    )
    .bind(recipe_id.to_string())
    .fetch_all(conn)
    .await
    .map_err(translate)?;

    rows.iter().map(row_to_line).collect()
}

fn into_recipe(
    draft: RecipeDraft,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Recipe {
    Recipe {
        id: draft.id,
        title: draft.title,
        slug,
        headline: draft.headline,
        description: draft.description,
        steps: draft.steps,
        servings: draft.servings,
        url: draft.url,
        tags: draft.tags,
        ingredients: draft.ingredients,
        created_at,
        updated_at,
    }
}

/// Convert a joined row to a `RecipeIngredient`
fn row_to_line(row: &SqliteRow) -> DatabaseResult<RecipeIngredient> {
    let id: String = row.try_get("id").map_err(translate)?;
    let unit: String = row.try_get("unit").map_err(translate)?;

    Ok(RecipeIngredient {
        id: parse_uuid(&id)?,
        name: row.try_get("name").map_err(translate)?,
        kind: row.try_get("kind").map_err(translate)?,
        unit: unit.parse::<Unit>().map_err(DatabaseError::unexpected)?,
        quantity: row.try_get("quantity").map_err(translate)?,
    })
}

/// Convert a header row to a `Recipe` with the given lines
fn row_to_recipe(row: &SqliteRow, ingredients: Vec<RecipeIngredient>) -> DatabaseResult<Recipe> {
    let id: String = row.try_get("id").map_err(translate)?;
    let tags_json: String = row.try_get("tags").map_err(translate)?;
    let servings: Option<i64> = row.try_get("servings").map_err(translate)?;
    let (created_at, updated_at) = row_timestamps(row)?;

    Ok(Recipe {
        id: parse_uuid(&id)?,
        title: row.try_get("title").map_err(translate)?,
        slug: row.try_get("slug").map_err(translate)?,
        headline: row.try_get("headline").map_err(translate)?,
        description: row.try_get("description").map_err(translate)?,
        steps: row.try_get("steps").map_err(translate)?,
        servings: servings
            .map(u32::try_from)
            .transpose()
            .map_err(DatabaseError::unexpected)?,
        url: row.try_get("url").map_err(translate)?,
        tags: serde_json::from_str(&tags_json).map_err(DatabaseError::unexpected)?,
        ingredients,
        created_at,
        updated_at,
    })
}

fn row_timestamps(row: &SqliteRow) -> DatabaseResult<(DateTime<Utc>, DateTime<Utc>)> {
    let created_at: String = row.try_get("created_at").map_err(translate)?;
    let updated_at: String = row.try_get("updated_at").map_err(translate)?;
    Ok((parse_timestamp(&created_at)?, parse_timestamp(&updated_at)?))
}

fn parse_timestamp(value: &str) -> DatabaseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(DatabaseError::unexpected)
}

fn parse_uuid(value: &str) -> DatabaseResult<Uuid> {
    Uuid::parse_str(value).map_err(DatabaseError::unexpected)
}
