// src/spec/keywords.rs
//
// Tolerant keyword enums. Unknown strings fall back to a documented default
// instead of failing deserialization.

use log::debug;
use serde::{Deserialize, Serialize};

/// Nominal zone size. Maps to a side length in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeClass {
    pub fn cells(self) -> i32 {
        match self {
            SizeClass::Small => 4,
            SizeClass::Medium => 6,
            SizeClass::Large => 9,
        }
    }
}

impl From<String> for SizeClass {
    fn from(value: String) -> Self {
        match value.as_str() {
            "small" => SizeClass::Small,
            "medium" => SizeClass::Medium,
            "large" => SizeClass::Large,
            other => {
                debug!("Unknown size class '{}', using medium", other);
                SizeClass::Medium
            }
        }
    }
}

/// Where a zone would like to sit relative to the map border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum PlacementPreference {
    Edge,
    Center,
    #[default]
    Any,
}

impl PlacementPreference {
    pub(crate) fn edge() -> Self {
        PlacementPreference::Edge
    }
}

impl From<String> for PlacementPreference {
    fn from(value: String) -> Self {
        match value.as_str() {
            "edge" => PlacementPreference::Edge,
            "center" => PlacementPreference::Center,
            "any" => PlacementPreference::Any,
            other => {
                debug!("Unknown placement preference '{}', using any", other);
                PlacementPreference::Any
            }
        }
    }
}

/// Cover density tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    /// Per-corridor-cell probability of attempting a cover drop.
    pub fn chance(self) -> f64 {
        match self {
            Density::Low => 0.08,
            Density::Medium => 0.12,
            Density::High => 0.18,
        }
    }
}

impl From<String> for Density {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Density::Low,
            "medium" => Density::Medium,
            "high" => Density::High,
            other => {
                debug!("Unknown cover density '{}', using medium", other);
                Density::Medium
            }
        }
    }
}

/// Parses the lane count out of a style keyword such as `"3-lane"`.
///
/// Only styles mentioning `lane` are parsed; the count is the text before the
/// first `-`. Anything else yields the default of 3.
pub fn parse_lane_count(style: &str) -> i32 {
    const DEFAULT_LANES: i32 = 3;
    if !style.to_lowercase().contains("lane") {
        return DEFAULT_LANES;
    }
    style
        .split('-')
        .next()
        .and_then(|head| head.trim().parse::<i32>().ok())
        .unwrap_or(DEFAULT_LANES)
}
