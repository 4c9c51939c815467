// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: HTTP binding, request timeout, CORS origins, and the database section
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::database::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};
use cookbook_core::constants::defaults;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
        }
    }
}

impl CorsConfig {
    /// Load CORS configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", defaults::CORS_ALLOWED_ORIGINS),
        }
    }

    /// Whether any origin is accepted
    #[must_use]
    pub fn allows_any(&self) -> bool {
        let trimmed = self.allowed_origins.trim();
        trimmed.is_empty() || trimmed == "*"
    }

    /// Explicit origins, trimmed, empty entries dropped
    #[must_use]
    pub fn origins(&self) -> Vec<&str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty() && *origin != "*")
            .collect()
    }
}

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub http_host: IpAddr,
    /// HTTP API port
    pub http_port: u16,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// CORS settings
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: IpAddr::from([0, 0, 0, 0]),
            http_port: defaults::HTTP_PORT,
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            cors: CorsConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an invalid value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_host: parse_var("HTTP_HOST", defaults::HTTP_HOST)?,
            http_port: parse_var("HTTP_PORT", &defaults::HTTP_PORT.to_string())?,
            request_timeout_secs: parse_var(
                "REQUEST_TIMEOUT_SECS",
                &defaults::REQUEST_TIMEOUT_SECS.to_string(),
            )?,
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the overriding database URL is invalid
    pub fn with_overrides(
        mut self,
        http_port: Option<u16>,
        database_url: Option<&str>,
    ) -> AppResult<Self> {
        if let Some(port) = http_port {
            self.http_port = port;
        }
        if let Some(url) = database_url {
            self.database = DatabaseConfig::with_url(
                DatabaseUrl::parse_url(url)?,
                self.database.auto_migrate,
                self.database.pool,
            )?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the request timeout is zero
    pub fn validate(&self) -> AppResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(AppError::config_invalid(
                "REQUEST_TIMEOUT_SECS must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }

    /// Per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Cookbook Server Configuration:\n\
             - HTTP Address: {}\n\
             - Request Timeout: {}s\n\
             - CORS Origins: {}\n\
             - Database: {}\n\
             - Auto Migrate: {}\n\
             - Pool: {}..{} connections",
            self.socket_addr(),
            self.request_timeout_secs,
            if self.cors.allows_any() {
                "any"
            } else {
                self.cors.allowed_origins.as_str()
            },
            self.database.url,
            if self.database.auto_migrate {
                "Enabled"
            } else {
                "Disabled"
            },
            self.database.pool.min_connections,
            self.database.pool.max_connections,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to the `default` text
fn parse_var<T>(key: &str, default: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    env_var_or(key, default)
        .trim()
        .parse()
        .map_err(|e| AppError::config_invalid(format!("Invalid {key} value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_origin_list() {
        let cors = CorsConfig {
            allowed_origins: "https://a.example, ,https://b.example".to_owned(),
        };
        assert!(!cors.allows_any());
        assert_eq!(cors.origins(), vec!["https://a.example", "https://b.example"]);
        assert!(CorsConfig::default().allows_any());
    }

    #[test]
    fn test_overrides_replace_port_and_database() {
        let config = ServerConfig::default()
            .with_overrides(Some(9090), Some("sqlite::memory:"))
            .unwrap();
        assert_eq!(config.http_port, 9090);
        assert!(config.database.url.is_memory());
        assert!(config.summary().contains("0.0.0.0:9090"));
    }

    #[test]
    fn test_overrides_reject_postgres() {
        let result = ServerConfig::default()
            .with_overrides(None, Some("postgresql://localhost/cookbook"));
        assert!(result.is_err());
    }
}
