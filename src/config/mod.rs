// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven server, CORS, and database configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Cookbook server
//!
//! Everything is read from environment variables; the binary may override
//! the port and database URL from the command line.

/// Database location and pool configuration
pub mod database;
/// Environment and server configuration
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl, PoolConfig};
pub use environment::{CorsConfig, ServerConfig};
