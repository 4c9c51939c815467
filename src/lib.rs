// ABOUTME: Main library entry point for the Cookbook API
// ABOUTME: Recipe catalog over SQLite with a shared, deduplicated ingredient dictionary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cookbook Server
//!
//! Stores recipes together with their ingredient lines. Ingredients live in
//! a shared dictionary keyed by name, so two recipes mentioning "tofu" point
//! at the same row.
//!
//! ## Architecture
//!
//! - **database**: `SQLite` pool, schema, transactions, and the two repositories
//! - **services**: the atomic recipe write (resolve ingredients, then store the aggregate)
//! - **routes**: the REST surface, thin handlers over the service
//! - **config** / **logging**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cookbook_server::config::ServerConfig;
//! use cookbook_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Cookbook API configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// `SQLite` storage: pool, schema, transactions, repositories
pub mod database;

/// Error types shared with `cookbook-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// Server lifecycle
pub mod server;

/// Business operations over the repositories
pub mod services;

/// Request payload validation
pub mod validation;
