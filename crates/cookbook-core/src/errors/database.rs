// ABOUTME: Closed error taxonomy for storage operations on recipes and ingredients
// ABOUTME: Typed kinds survive any number of call-site context layers for pattern matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Error Types
//!
//! Every failure leaving the persistence layer is one of five kinds:
//! `NotFound`, `TooManyRows`, `DuplicateKey`, `Constraint`, or `Unexpected`.
//! Call sites add context ("upsert ingredients", "store recipe", ...) with
//! [`DatabaseError::context`]; [`DatabaseError::kind`] always recovers the
//! root kind underneath.

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error used as the diagnostic cause of `Unexpected`
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type alias for storage operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Storage failure with a typed kind
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The engine reported zero matching rows where one was expected
    #[error("record not found")]
    NotFound,

    /// More than one row matched where exactly one was expected
    #[error("query returned more than one row")]
    TooManyRows,

    /// A uniqueness constraint was violated
    #[error("duplicate key violates unique constraint '{key}'")]
    DuplicateKey {
        /// Natural-key constraint name (e.g. `recipes_slug_key`)
        key: String,
    },

    /// A referential-integrity constraint was violated
    #[error("operation violates constraint '{name}'")]
    Constraint {
        /// Relationship that failed (e.g. `recipe_ingredients_ingredient_id_fkey`)
        name: String,
    },

    /// Anything else, kept for diagnostics
    #[error("unexpected database error: {cause}")]
    Unexpected {
        /// Original failure
        #[source]
        cause: BoxError,
    },

    /// A failure wrapped with the operation that was running
    #[error("{context}: {source}")]
    Context {
        /// Which operation failed
        context: String,
        /// Underlying failure
        #[source]
        source: Box<DatabaseError>,
    },
}

impl DatabaseError {
    /// Create a duplicate key error
    #[must_use]
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Create a constraint violation error
    #[must_use]
    pub fn constraint(name: impl Into<String>) -> Self {
        Self::Constraint { name: name.into() }
    }

    /// Wrap any error as `Unexpected`
    #[must_use]
    pub fn unexpected(cause: impl Into<BoxError>) -> Self {
        Self::Unexpected {
            cause: cause.into(),
        }
    }

    /// Add call-site context while keeping the typed kind reachable
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Root kind underneath any context layers
    #[must_use]
    pub fn kind(&self) -> &Self {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// Check whether the root kind is `NotFound`
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), Self::NotFound)
    }

    /// Constraint key when the root kind is `DuplicateKey`
    #[must_use]
    pub fn duplicate_key_name(&self) -> Option<&str> {
        match self.kind() {
            Self::DuplicateKey { key } => Some(key),
            _ => None,
        }
    }

    /// Constraint name when the root kind is `Constraint`
    #[must_use]
    pub fn constraint_name(&self) -> Option<&str> {
        match self.kind() {
            Self::Constraint { name } => Some(name),
            _ => None,
        }
    }

    /// Chain of context labels, outermost first
    #[must_use]
    pub fn contexts(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut current = self;
        while let Self::Context { context, source } = current {
            labels.push(context.as_str());
            current = source;
        }
        labels
    }
}

/// Adds `.context(...)` to storage results
pub trait ResultExt<T> {
    /// Wrap the error, if any, with the operation that was running
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in `DatabaseError::Context`
    fn context(self, context: &str) -> DatabaseResult<T>;
}

impl<T> ResultExt<T> for DatabaseResult<T> {
    fn context(self, context: &str) -> DatabaseResult<T> {
        self.map_err(|e| e.context(context))
    }
}
