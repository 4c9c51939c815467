// ABOUTME: Label/value pairs offered to clients when filling in recipe forms
// ABOUTME: Built from units, dictionary ingredient names, and catalog tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Unit;
use serde::{Deserialize, Serialize};

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionOption {
    /// Text shown to the user
    pub label: String,
    /// Value sent back in recipe payloads
    pub value: String,
}

impl SuggestionOption {
    /// Option whose label is its value
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

impl From<Unit> for SuggestionOption {
    fn from(unit: Unit) -> Self {
        Self {
            label: unit.display_name().to_owned(),
            value: unit.as_str().to_owned(),
        }
    }
}
