//! Weather category label sets
//!
//! The image classifier and the tabular classifier were trained on different
//! datasets and do not share a vocabulary. Both sets are kept as the models
//! emit them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Placeholder returned when the image model emits an index with no label
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Categories emitted by the image classifier, in output-index order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CnnClass {
    Shine,
    Cloudy,
    Foggy,
    Lightning,
    Rainbow,
    Rainy,
    Rime,
    Sandstorm,
    Sunrise,
}

impl CnnClass {
    pub const ALL: [CnnClass; 9] = [
        CnnClass::Shine,
        CnnClass::Cloudy,
        CnnClass::Foggy,
        CnnClass::Lightning,
        CnnClass::Rainbow,
        CnnClass::Rainy,
        CnnClass::Rime,
        CnnClass::Sandstorm,
        CnnClass::Sunrise,
    ];

    /// Map a model output index to its category
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CnnClass::Shine => "Shine",
            CnnClass::Cloudy => "Cloudy",
            CnnClass::Foggy => "Foggy",
            CnnClass::Lightning => "Lightning",
            CnnClass::Rainbow => "Rainbow",
            CnnClass::Rainy => "Rainy",
            CnnClass::Rime => "Rime",
            CnnClass::Sandstorm => "Sandstorm",
            CnnClass::Sunrise => "Sunrise",
        }
    }
}

impl std::fmt::Display for CnnClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CnnClass {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Label for an image-model output index, `"Unknown"` when out of table
pub fn cnn_label(index: usize) -> &'static str {
    CnnClass::from_index(index)
        .map(|c| c.as_str())
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// Categories emitted by the tabular classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TabularClass {
    Cloudy,
    Rainy,
    Snowy,
    Sunny,
}

impl TabularClass {
    pub const ALL: [TabularClass; 4] = [
        TabularClass::Cloudy,
        TabularClass::Rainy,
        TabularClass::Snowy,
        TabularClass::Sunny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TabularClass::Cloudy => "Cloudy",
            TabularClass::Rainy => "Rainy",
            TabularClass::Snowy => "Snowy",
            TabularClass::Sunny => "Sunny",
        }
    }
}

impl std::fmt::Display for TabularClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabularClass {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A label outside of the known vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weather category: {0}")]
pub struct UnknownCategory(pub String);
