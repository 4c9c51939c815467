// ABOUTME: Fixed enumeration of measurement units for recipe ingredient lines
// ABOUTME: Stored and serialized as short lowercase codes with human display names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Measurement unit of a recipe ingredient line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Kilograms
    #[serde(rename = "kilo")]
    Kilo,
    /// Grams
    #[serde(rename = "g")]
    Gram,
    /// Milligrams
    #[serde(rename = "mg")]
    Milligram,
    /// Liters
    #[serde(rename = "l")]
    Liter,
    /// Milliliters
    #[serde(rename = "ml")]
    Milliliter,
    /// Teaspoons
    #[serde(rename = "tsp")]
    Teaspoon,
    /// Tablespoons
    #[serde(rename = "tbsp")]
    Tablespoon,
    /// Cups
    #[serde(rename = "cup")]
    Cup,
    /// Quarts
    #[serde(rename = "qt")]
    Quart,
    /// Whole items (2 chilies)
    #[serde(rename = "countable")]
    Countable,
    /// No measurable amount (salt to taste)
    #[serde(rename = "uncountable")]
    Uncountable,
}

/// Physical dimension a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Weight units
    Mass,
    /// Volume units
    Volume,
    /// Item counts
    Count,
    /// Amounts that are not measured
    Uncountable,
}

/// Error returned when parsing an unknown unit code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid unit")]
pub struct InvalidUnit(pub String);

impl Unit {
    /// All units, in display order
    pub const ALL: [Self; 11] = [
        Self::Kilo,
        Self::Gram,
        Self::Milligram,
        Self::Liter,
        Self::Milliliter,
        Self::Teaspoon,
        Self::Tablespoon,
        Self::Cup,
        Self::Quart,
        Self::Countable,
        Self::Uncountable,
    ];

    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kilo => "kilo",
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Liter => "l",
            Self::Milliliter => "ml",
            Self::Teaspoon => "tsp",
            Self::Tablespoon => "tbsp",
            Self::Cup => "cup",
            Self::Quart => "qt",
            Self::Countable => "countable",
            Self::Uncountable => "uncountable",
        }
    }

    /// Label shown next to a quantity
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Kilo => "kg",
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Liter => "L",
            Self::Milliliter => "ml",
            Self::Teaspoon => "tsp",
            Self::Tablespoon => "tbsp",
            Self::Cup => "cup",
            Self::Quart => "qt",
            Self::Countable => "unit(s)",
            Self::Uncountable => "some",
        }
    }

    /// Dimension this unit measures
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        match self {
            Self::Kilo | Self::Gram | Self::Milligram => UnitKind::Mass,
            Self::Liter
            | Self::Milliliter
            | Self::Teaspoon
            | Self::Tablespoon
            | Self::Cup
            | Self::Quart => UnitKind::Volume,
            Self::Countable => UnitKind::Count,
            Self::Uncountable => UnitKind::Uncountable,
        }
    }
}

impl FromStr for Unit {
    type Err = InvalidUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| InvalidUnit(s.to_owned()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
