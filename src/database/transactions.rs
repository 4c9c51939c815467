// ABOUTME: RAII transaction guard and the explicit execution scope shared by every repository
// ABOUTME: A scope runs statements on the bound transaction or falls back to a pooled connection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management
//!
//! - `TransactionGuard`: RAII wrapper whose `commit` and `rollback` both
//!   consume the guard, so a transaction ends exactly once
//! - `ExecutionScope`: capability passed into repository methods; it either
//!   borrows a live guard or asks for a connection from the pool
//!
//! ## Example Usage
//!
//! ```text
//! let mut tx = db.transactions().begin().await?;
//! let resolved = db
//!     .ingredients()
//!     .upsert_many(ExecutionScope::Transaction(&mut tx), &names)
//!     .await?;
//! db.recipes().create(ExecutionScope::Transaction(&mut tx), draft).await?;
//! tx.commit().await?;
//! ```
//!
//! Dropping the guard before `commit()` rolls the transaction back.

use std::ops::{Deref, DerefMut};

use sqlx::pool::PoolConnection;
use sqlx::{Database, Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, warn};

use super::errors::{translate, DatabaseError, DatabaseResult};

/// RAII guard for database transactions ensuring automatic rollback on drop
///
/// # Type Parameters
///
/// * `DB` - The database type (e.g., `Sqlite`)
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Wrap a transaction obtained from `pool.begin()`
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created - transaction will auto-rollback if not committed");
        Self {
            transaction: Some(transaction),
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns the translated engine error if the commit fails. The failed
    /// transaction is dropped, which rolls it back.
    pub async fn commit(mut self) -> DatabaseResult<()> {
        let tx = self.take()?;
        tx.commit().await.map_err(translate)?;
        debug!("TransactionGuard committed successfully");
        Ok(())
    }

    /// Roll the transaction back and consume the guard
    ///
    /// # Errors
    ///
    /// Returns the translated engine error if the rollback fails
    pub async fn rollback(mut self) -> DatabaseResult<()> {
        let tx = self.take()?;
        tx.rollback().await.map_err(translate)?;
        debug!("TransactionGuard rolled back explicitly");
        Ok(())
    }

    /// Connection of the open transaction
    ///
    /// # Errors
    ///
    /// Returns `Unexpected` if the transaction has already ended
    pub fn executor(&mut self) -> DatabaseResult<&mut <DB as Database>::Connection> {
        self.transaction
            .as_deref_mut()
            .ok_or_else(|| DatabaseError::unexpected("transaction already consumed"))
    }

    fn take(&mut self) -> DatabaseResult<Transaction<'c, DB>> {
        self.transaction
            .take()
            .ok_or_else(|| DatabaseError::unexpected("transaction already consumed"))
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            // sqlx rolls back when the inner Transaction drops
            warn!(
                "TransactionGuard dropped without commit - transaction will be rolled back automatically"
            );
        }
    }
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, Sqlite>;

/// Opens transactions against the shared pool
#[derive(Clone)]
pub struct TransactionManager {
    pool: SqlitePool,
}

impl TransactionManager {
    /// Create a manager over `pool`
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a new transaction
    ///
    /// # Errors
    ///
    /// Returns `Unexpected` (context "begin transaction") if the engine cannot
    /// start one
    pub async fn begin(&self) -> DatabaseResult<SqliteTransactionGuard<'static>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::unexpected(e).context("begin transaction"))?;
        debug!("Transaction started");
        Ok(TransactionGuard::new(tx))
    }
}

/// Where a repository call runs its statements
///
/// Repository methods behave the same with either variant; the caller
/// decides whether a group of calls shares one transaction.
pub enum ExecutionScope<'s> {
    /// Autocommit on a connection acquired from the pool
    Pool,
    /// Inside the borrowed open transaction
    Transaction(&'s mut SqliteTransactionGuard<'static>),
}

impl<'s> ExecutionScope<'s> {
    /// Pick the connection for this scope
    ///
    /// The bound transaction's connection when there is one, otherwise a
    /// connection acquired from `fallback`.
    ///
    /// # Errors
    ///
    /// Returns `Unexpected` if the pool cannot hand out a connection or the
    /// bound transaction has already ended
    pub async fn resolve(self, fallback: &SqlitePool) -> DatabaseResult<ExecutionHandle<'s>> {
        match self {
            Self::Pool => fallback
                .acquire()
                .await
                .map(ExecutionHandle::Pooled)
                .map_err(|e| DatabaseError::unexpected(e).context("acquire connection")),
            Self::Transaction(guard) => guard.executor().map(ExecutionHandle::Transaction),
        }
    }
}

impl<'s> From<&'s mut SqliteTransactionGuard<'static>> for ExecutionScope<'s> {
    fn from(guard: &'s mut SqliteTransactionGuard<'static>) -> Self {
        Self::Transaction(guard)
    }
}

/// Connection chosen by [`ExecutionScope::resolve`]
pub enum ExecutionHandle<'s> {
    /// Pooled connection, returned to the pool on drop
    Pooled(PoolConnection<Sqlite>),
    /// Connection owned by an open transaction
    Transaction(&'s mut SqliteConnection),
}

impl Deref for ExecutionHandle<'_> {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        match self {
            Self::Pooled(conn) => &**conn,
            Self::Transaction(conn) => &**conn,
        }
    }
}

impl DerefMut for ExecutionHandle<'_> {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        match self {
            Self::Pooled(conn) => &mut **conn,
            Self::Transaction(conn) => &mut **conn,
        }
    }
}
