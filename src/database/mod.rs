// ABOUTME: SQLite-backed persistence for recipes and the shared ingredient dictionary
// ABOUTME: Owns the connection pool, schema migration, and hands out the repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! [`Database`] owns the `SQLite` pool. Repositories ([`IngredientResolver`],
//! [`RecipeStore`]) take an [`ExecutionScope`] on every call, so the same
//! method runs either in autocommit mode or inside a transaction opened by
//! [`TransactionManager`].

/// Error translation from sqlx into the storage taxonomy
pub mod errors;
/// Ingredient dictionary
pub mod ingredients;
/// Recipe aggregate storage
pub mod recipes;
/// Transaction guard and execution scopes
pub mod transactions;

pub use errors::{DatabaseError, DatabaseResult, ResultExt};
pub use ingredients::IngredientResolver;
pub use recipes::RecipeStore;
pub use transactions::{
    ExecutionHandle, ExecutionScope, SqliteTransactionGuard, TransactionGuard, TransactionManager,
};

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::database::{DatabaseConfig, DatabaseUrl};
use errors::translate;

/// Database manager for recipe storage
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `config`, migrating when `auto_migrate` is set
    ///
    /// # Errors
    ///
    /// Returns `Unexpected` if the database cannot be opened or migrated
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let pool = open_pool(config)
            .await
            .map_err(|e| e.context("connect database"))?;
        let db = Self { pool };

        if config.auto_migrate {
            db.migrate().await?;
        }

        info!(database = %config.url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Transaction entry point
    #[must_use]
    pub fn transactions(&self) -> TransactionManager {
        TransactionManager::new(self.pool.clone())
    }

    /// Ingredient dictionary repository
    #[must_use]
    pub fn ingredients(&self) -> IngredientResolver {
        IngredientResolver::new(self.pool.clone())
    }

    /// Recipe repository
    #[must_use]
    pub fn recipes(&self) -> RecipeStore {
        RecipeStore::new(self.pool.clone())
    }

    /// Round-trip a trivial query
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can run it
    pub async fn ping(&self) -> DatabaseResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(translate)?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create the schema if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> DatabaseResult<()> {
        self.migrate_ingredients().await?;
        self.migrate_recipes().await?;
        self.migrate_recipe_ingredients().await?;
        debug!("Database schema up to date");
        Ok(())
    }

    async fn migrate_ingredients(&self) -> DatabaseResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT NOT NULL,
                name TEXT NOT NULL,
                kind TEXT,
                CONSTRAINT ingredients_pkey PRIMARY KEY (id),
                CONSTRAINT ingredients_name_key UNIQUE (name)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| translate(e).context("migrate ingredients"))?;
        Ok(())
    }

    async fn migrate_recipes(&self) -> DatabaseResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT NOT NULL,
                title TEXT NOT NULL,
                slug TEXT NOT NULL,
                headline TEXT,
                description TEXT,
                steps TEXT,
                servings INTEGER CHECK (servings IS NULL OR servings > 0),
                url TEXT,
                tags TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                CONSTRAINT recipes_pkey PRIMARY KEY (id),
                CONSTRAINT recipes_slug_key UNIQUE (slug)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| translate(e).context("migrate recipes"))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at)")
            .execute(&self.pool)
            .await
            .map_err(|e| translate(e).context("migrate recipes"))?;
        Ok(())
    }

    async fn migrate_recipe_ingredients(&self) -> DatabaseResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id TEXT NOT NULL,
                ingredient_id TEXT NOT NULL,
                position INTEGER NOT NULL,
                unit TEXT NOT NULL,
                quantity REAL NOT NULL,
                CONSTRAINT recipe_ingredients_recipe_id_fkey
                    FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
                CONSTRAINT recipe_ingredients_ingredient_id_fkey
                    FOREIGN KEY (ingredient_id) REFERENCES ingredients(id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| translate(e).context("migrate recipe_ingredients"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe \
             ON recipe_ingredients(recipe_id, position)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| translate(e).context("migrate recipe_ingredients"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient \
             ON recipe_ingredients(ingredient_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| translate(e).context("migrate recipe_ingredients"))?;
        Ok(())
    }
}

async fn open_pool(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let busy_timeout = Duration::from_millis(config.pool.busy_timeout_ms);

    let options = match &config.url {
        DatabaseUrl::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(translate)?
            .foreign_keys(true)
            .busy_timeout(busy_timeout),
        DatabaseUrl::SQLite { path } => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(DatabaseError::unexpected)?;
            }
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .foreign_keys(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(busy_timeout)
        }
        DatabaseUrl::PostgreSQL { .. } => {
            return Err(DatabaseError::unexpected(
                "PostgreSQL is not supported by this build",
            ));
        }
    };

    let pool_options = if config.url.is_memory() {
        // The in-memory database lives only as long as its connection
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.pool.max_connections)
            .min_connections(config.pool.min_connections)
    };

    pool_options
        .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(DatabaseError::unexpected)
}
