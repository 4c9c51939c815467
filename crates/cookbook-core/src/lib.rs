// ABOUTME: Core types and constants for the Cookbook recipe catalog
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cookbook Core
//!
//! Foundation crate providing shared types and constants for the Cookbook
//! recipe catalog. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: the storage error taxonomy (`DatabaseError`) and the HTTP-facing `AppError`
//! - **constants**: constraint names, defaults, and limits
//! - **models**: recipes, ingredients, units, and the input DTOs

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Recipe, Ingredient, Unit, input DTOs)
pub mod models;
