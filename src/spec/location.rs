// src/spec/location.rs

use crate::utils::util::{clamp, to_grid_axis};
use crate::utils::Cell;
use log::debug;
use serde::{Deserialize, Serialize};

fn half() -> f64 {
    0.5
}

/// A requested zone position in normalized map space.
///
/// Accepted forms, tried in order: a `[x, y]` array, an `{x, y}` object
/// (missing coordinates default to 0.5), or a named anchor such as
/// `"top-left"`. Anything else is kept verbatim and resolves to the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Pair(Vec<f64>),
    Point {
        #[serde(default = "half")]
        x: f64,
        #[serde(default = "half")]
        y: f64,
    },
    Named(String),
    Invalid(serde_json::Value),
}

impl Location {
    pub fn point(x: f64, y: f64) -> Self {
        Location::Point { x, y }
    }

    /// Normalized coordinates, clamped to `[0, 1]`. `None` when the value is
    /// structurally unusable.
    pub fn normalized(&self) -> Option<(f64, f64)> {
        match self {
            Location::Point { x, y } => Some((clamp(*x, 0.0, 1.0), clamp(*y, 0.0, 1.0))),
            Location::Pair(v) if v.len() >= 2 => Some((clamp(v[0], 0.0, 1.0), clamp(v[1], 0.0, 1.0))),
            Location::Named(name) => Some(named_anchor(name)),
            _ => None,
        }
    }

    /// Converts to a grid coordinate on a `width` x `height` grid.
    pub fn resolve(&self, width: i32, height: i32) -> Cell {
        match self.normalized() {
            Some((fx, fy)) => Cell::new(to_grid_axis(fx, width), to_grid_axis(fy, height)),
            None => {
                debug!("Unusable location {:?}, defaulting to center", self);
                grid_center(width, height)
            }
        }
    }
}

/// Resolves an optional location, defaulting to the grid center.
pub fn resolve_or_center(location: Option<&Location>, width: i32, height: i32) -> Cell {
    location.map_or_else(|| grid_center(width, height), |l| l.resolve(width, height))
}

fn grid_center(width: i32, height: i32) -> Cell {
    Cell::new(width / 2, height / 2)
}

fn named_anchor(name: &str) -> (f64, f64) {
    match name {
        "top-left" => (0.2, 0.2),
        "top-right" => (0.8, 0.2),
        "bottom-left" => (0.2, 0.8),
        "bottom-right" => (0.8, 0.8),
        "center" => (0.5, 0.5),
        "top" => (0.5, 0.2),
        "bottom" => (0.5, 0.8),
        "left" => (0.2, 0.5),
        "right" => (0.8, 0.5),
        other => {
            debug!("Unknown named location '{}', using center", other);
            (0.5, 0.5)
        }
    }
}
