// ABOUTME: Re-exports the shared error types from cookbook-core
// ABOUTME: Keeps crate::errors paths stable for handlers and services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use cookbook_core::errors::*;
