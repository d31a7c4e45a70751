// src/spec/mod.rs
//! # Level Specification
//!
//! The normalized input record a layout is generated from. It is accepted in
//! the JSON shape produced by upstream authoring tools and validated once,
//! here, before any generation starts. Missing optional fields take their
//! documented defaults; only values that make generation impossible are
//! rejected.

mod keywords;
mod location;

pub use keywords::{parse_lane_count, Density, PlacementPreference, SizeClass};
pub use location::{resolve_or_center, Location};

use crate::generator::GenerationError;
pub use crate::map::{ShapeKind, Team};
use log::debug;
use serde::{Deserialize, Serialize};

/// Largest width or height accepted for a layout grid.
pub const MAX_GRID_DIMENSION: i32 = 1024;

/// Segment limit used when sightline control is disabled.
pub const UNBOUNDED_SEGMENT: i32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSize {
    pub width: i32,
    pub height: i32,
}

impl Default for MapSize {
    fn default() -> Self {
        MapSize { width: 40, height: 40 }
    }
}

fn shape_hint(shape: &Option<String>) -> Option<ShapeKind> {
    let keyword = shape.as_deref()?;
    let kind = ShapeKind::from_keyword(keyword);
    if kind.is_none() {
        debug!("Unknown shape '{}', a random shape will be used", keyword);
    }
    kind
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub team: Team,
    #[serde(default)]
    pub size: SizeClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default = "PlacementPreference::edge")]
    pub position_preference: PlacementPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl SpawnRequest {
    pub fn shape_hint(&self) -> Option<ShapeKind> {
        shape_hint(&self.shape)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRequest {
    pub id: String,
    #[serde(default)]
    pub size: SizeClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub position_preference: PlacementPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl SiteRequest {
    pub fn shape_hint(&self) -> Option<ShapeKind> {
        shape_hint(&self.shape)
    }
}

fn mid_type() -> String {
    "mid".to_string()
}

/// A generic area request. Only `type: "mid"` areas are generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRequest {
    #[serde(rename = "type", default = "mid_type")]
    pub kind: String,
    #[serde(default)]
    pub size: SizeClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl AreaRequest {
    pub fn mid(size: SizeClass, location: Location) -> Self {
        AreaRequest {
            kind: mid_type(),
            size,
            location: Some(location),
            shape: None,
        }
    }

    pub fn is_mid(&self) -> bool {
        self.kind == "mid"
    }

    pub fn shape_hint(&self) -> Option<ShapeKind> {
        shape_hint(&self.shape)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connectivity {
    pub style: String,
    pub max_chokepoint_width: i32,
}

impl Default for Connectivity {
    fn default() -> Self {
        Connectivity {
            style: "3-lane".to_string(),
            max_chokepoint_width: 2,
        }
    }
}

impl Connectivity {
    pub fn lane_count(&self) -> i32 {
        parse_lane_count(&self.style)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SightlineControl {
    pub enabled: bool,
    pub max_consecutive_open: i32,
}

impl Default for SightlineControl {
    fn default() -> Self {
        SightlineControl {
            enabled: false,
            max_consecutive_open: 8,
        }
    }
}

impl SightlineControl {
    /// Longest straight corridor segment the router may draw.
    pub fn segment_limit(&self) -> i32 {
        if self.enabled {
            self.max_consecutive_open
        } else {
            UNBOUNDED_SEGMENT
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverSettings {
    pub enabled: bool,
    pub density: Density,
}

/// Full input record for one layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSpec {
    pub map_size: MapSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub spawn_zones: Vec<SpawnRequest>,
    pub bomb_sites: Vec<SiteRequest>,
    pub areas: Vec<AreaRequest>,
    pub connectivity: Connectivity,
    pub sightline_control: SightlineControl,
    pub cover_objects: CoverSettings,
}

impl LevelSpec {
    /// Parses and validates a JSON specification.
    pub fn from_json(json: &str) -> Result<LevelSpec, GenerationError> {
        let spec: LevelSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Rejects values that make generation impossible.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let MapSize { width, height } = self.map_size;
        if width < 1 || height < 1 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(GenerationError::InvalidDimensions { width, height });
        }
        if self.connectivity.max_chokepoint_width < 1 {
            return Err(GenerationError::InvalidCorridorWidth(
                self.connectivity.max_chokepoint_width,
            ));
        }
        if self.sightline_control.enabled && self.sightline_control.max_consecutive_open < 1 {
            return Err(GenerationError::InvalidSightlineLimit(
                self.sightline_control.max_consecutive_open,
            ));
        }
        Ok(())
    }

    /// Mid-area requests, in declaration order.
    pub fn mid_requests(&self) -> impl Iterator<Item = &AreaRequest> {
        self.areas.iter().filter(|a| a.is_mid())
    }

    /// A classic three-lane map: spawns in opposite corners, two sites,
    /// three mid areas, sightlines capped at six cells and medium cover.
    pub fn example() -> LevelSpec {
        LevelSpec {
            map_size: MapSize::default(),
            description: Some("Map using numeric x,y coordinates (0-1 range)".to_string()),
            spawn_zones: vec![
                SpawnRequest {
                    team: Team::T,
                    size: SizeClass::Medium,
                    location: Some(Location::point(0.15, 0.85)),
                    position_preference: PlacementPreference::Edge,
                    shape: Some("L_shape".to_string()),
                },
                SpawnRequest {
                    team: Team::CT,
                    size: SizeClass::Medium,
                    location: Some(Location::point(0.85, 0.15)),
                    position_preference: PlacementPreference::Edge,
                    shape: Some("T_shape".to_string()),
                },
            ],
            bomb_sites: vec![
                SiteRequest {
                    id: "A".to_string(),
                    size: SizeClass::Large,
                    location: Some(Location::point(0.2, 0.2)),
                    position_preference: PlacementPreference::Any,
                    shape: Some("organic".to_string()),
                },
                SiteRequest {
                    id: "B".to_string(),
                    size: SizeClass::Medium,
                    location: Some(Location::point(0.8, 0.8)),
                    position_preference: PlacementPreference::Any,
                    shape: Some("plus".to_string()),
                },
            ],
            areas: vec![
                AreaRequest::mid(SizeClass::Medium, Location::point(0.5, 0.5)),
                AreaRequest::mid(SizeClass::Small, Location::point(0.25, 0.5)),
                AreaRequest::mid(SizeClass::Small, Location::point(0.75, 0.5)),
            ],
            connectivity: Connectivity::default(),
            sightline_control: SightlineControl {
                enabled: true,
                max_consecutive_open: 6,
            },
            cover_objects: CoverSettings {
                enabled: true,
                density: Density::Medium,
            },
        }
    }
}
