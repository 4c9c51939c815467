// ABOUTME: HTTP middleware for request tracing, request IDs, and CORS
// ABOUTME: Builds the tower-http layers wrapped around the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request IDs and per-request tracing spans
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and context management
pub use self::tracing::{create_request_span, record_response, request_id, REQUEST_ID_HEADER};
