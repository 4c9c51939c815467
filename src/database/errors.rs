// ABOUTME: Translates sqlx failures into the closed storage error taxonomy from cookbook-core
// ABOUTME: Every repository call routes its sqlx errors through here before returning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use cookbook_core::errors::database::*;

use cookbook_core::constants::constraints;
use sqlx::error::ErrorKind;

/// Prefix `SQLite` puts in front of the offending `table.column` list
const SQLITE_UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

/// Map a sqlx failure onto a typed storage error
///
/// Pure and total: unknown failures become `Unexpected` with the original
/// error kept as the cause.
#[must_use]
pub fn translate(error: sqlx::Error) -> DatabaseError {
    classify(error, None)
}

/// Same as [`translate`], but an unnamed foreign key violation is reported
/// under `hint`
///
/// `SQLite` never says which relationship failed, so statements that can only
/// violate one foreign key pass its canonical name here.
#[must_use]
pub fn translate_with_constraint_hint(error: sqlx::Error, hint: &str) -> DatabaseError {
    classify(error, Some(hint))
}

fn classify(error: sqlx::Error, foreign_key_hint: Option<&str>) -> DatabaseError {
    match error {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        sqlx::Error::Database(db_error) => match db_error.kind() {
            ErrorKind::UniqueViolation => {
                let key = db_error
                    .constraint()
                    .map(str::to_owned)
                    .or_else(|| unique_key_from_message(db_error.message()))
                    .unwrap_or_else(|| db_error.message().to_owned());
                DatabaseError::duplicate_key(key)
            }
            ErrorKind::ForeignKeyViolation => {
                let name = db_error
                    .constraint()
                    .or(foreign_key_hint)
                    .unwrap_or(constraints::UNNAMED_FOREIGN_KEY);
                DatabaseError::constraint(name)
            }
            _ => DatabaseError::unexpected(sqlx::Error::Database(db_error)),
        },
        other => DatabaseError::unexpected(other),
    }
}

/// Derive the constraint name from `SQLite`'s "UNIQUE constraint failed: t.c" message
fn unique_key_from_message(message: &str) -> Option<String> {
    let targets = message.strip_prefix(SQLITE_UNIQUE_PREFIX)?;
    let first = targets.split(',').next()?.trim();
    if first.is_empty() {
        return None;
    }

    Some(constraints::unique_constraint_for(first).map_or_else(
        || format!("{}_key", first.replace('.', "_")),
        str::to_owned,
    ))
}

/// Expect exactly one row
///
/// # Errors
///
/// Returns `NotFound` for zero rows and `TooManyRows` for more than one
pub fn single_row<T>(rows: Vec<T>) -> DatabaseResult<T> {
    let mut rows = rows.into_iter();
    match (rows.next(), rows.next()) {
        (Some(row), None) => Ok(row),
        (None, _) => Err(DatabaseError::NotFound),
        (Some(_), Some(_)) => Err(DatabaseError::TooManyRows),
    }
}
