// ABOUTME: Unified error handling with standard error codes and HTTP response formatting
// ABOUTME: Maps the storage taxonomy onto transport-level status codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! `AppError` is what HTTP handlers return. Storage failures arrive as
//! [`database::DatabaseError`] and are converted with `From`, which decides
//! the status code: `NotFound` is 404, `DuplicateKey` and `Constraint` are
//! 409, everything else is 500.

/// Storage error taxonomy
pub mod database;

pub use database::{BoxError, DatabaseError, DatabaseResult, ResultExt};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Request payload failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Request payload could not be parsed
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,

    // Resource Management (4000-4999)
    /// Resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Unique natural key already taken
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,
    /// Referential integrity violation
    #[serde(rename = "RESOURCE_CONFLICT")]
    ResourceConflict = 4004,

    // Configuration (6000-6999)
    /// Configuration could not be loaded
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Configuration value is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unclassified server failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Storage failure without a more specific kind
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    /// Serialization failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput | Self::InvalidFormat => 400,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 409 Conflict
            Self::ResourceAlreadyExists | Self::ResourceConflict => 409,

            // 500 Internal Server Error
            Self::ConfigError
            | Self::ConfigInvalid
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidFormat => "The data format is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ResourceConflict => "The request conflicts with related resources",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Request ID for tracing, when known
    pub request_id: Option<String>,
    /// Additional structured details
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<BoxError>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: None,
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Add a request ID
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Add details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Invalid configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let message = error.to_string();
        let app_error = match error.kind() {
            DatabaseError::NotFound => Self::new(ErrorCode::ResourceNotFound, message),
            DatabaseError::DuplicateKey { key } => {
                let details = serde_json::json!({ "key": key });
                Self::new(ErrorCode::ResourceAlreadyExists, message).with_details(details)
            }
            DatabaseError::Constraint { name } => {
                let details = serde_json::json!({ "constraint": name });
                Self::new(ErrorCode::ResourceConflict, message).with_details(details)
            }
            DatabaseError::TooManyRows
            | DatabaseError::Unexpected { .. }
            | DatabaseError::Context { .. } => Self::new(ErrorCode::DatabaseError, message),
        };
        app_error.with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an HTTP error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Request ID, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Structured details
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message.clone(),
                request_id: error.request_id.clone(),
                details: error.details.clone(),
            },
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = ?self.code, error = %self.message, "Request failed");
        } else {
            tracing::debug!(code = ?self.code, error = %self.message, "Request rejected");
        }

        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ResourceAlreadyExists.http_status(), 409);
        assert_eq!(ErrorCode::ResourceConflict.http_status(), 409);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_database_errors_map_to_transport_codes() {
        let not_found: AppError = DatabaseError::NotFound.context("get recipe").into();
        assert_eq!(not_found.code, ErrorCode::ResourceNotFound);

        let duplicate: AppError = DatabaseError::duplicate_key("recipes_slug_key")
            .context("store recipe")
            .into();
        assert_eq!(duplicate.code, ErrorCode::ResourceAlreadyExists);
        assert_eq!(duplicate.details["key"], "recipes_slug_key");

        let constraint: AppError =
            DatabaseError::constraint("recipe_ingredients_ingredient_id_fkey").into();
        assert_eq!(constraint.http_status(), 409);

        let too_many: AppError = DatabaseError::TooManyRows.into();
        assert_eq!(too_many.http_status(), 500);

        let unexpected: AppError = DatabaseError::unexpected("disk I/O error").into();
        assert_eq!(unexpected.code, ErrorCode::DatabaseError);
        assert!(unexpected.source.is_some());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::invalid_input("title must not be blank").with_request_id("req-123");
        let json = serde_json::to_string(&ErrorResponse::from(&error)).unwrap();
        assert!(json.contains("INVALID_INPUT"));
        assert!(json.contains("req-123"));
        assert!(!json.contains("details"));
    }
}
