// ABOUTME: Cookbook API server binary
// ABOUTME: Parses command-line overrides, initializes logging, and runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Cookbook Server Binary
//!
//! Serves the recipe catalog over HTTP. Configuration comes from the
//! environment; `--http-port` and `--database-url` override it.

use anyhow::Result;
use clap::Parser;
use cookbook_server::{config::ServerConfig, logging, server};
use tracing::info;

#[derive(Parser)]
#[command(name = "cookbook-server")]
#[command(about = "Cookbook API - recipe catalog with a shared ingredient dictionary")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/cookbook.db`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let config = ServerConfig::from_env()?
        .with_overrides(args.http_port, args.database_url.as_deref())?;

    info!("Starting Cookbook API");
    info!("{}", config.summary());

    server::run(config).await
}
