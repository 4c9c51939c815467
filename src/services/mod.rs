// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Provides protocol-agnostic recipe and suggestion use cases over the database layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they validate input, call a service, and shape
//! the response.

/// Recipe use cases and the transactional write workflow
pub mod recipes;
/// Form suggestion listings
pub mod suggestions;

pub use recipes::{RecipeService, WriteStage};
pub use suggestions::SuggestionService;
