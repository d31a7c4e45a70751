// src/generator/placer.rs
//! Zone placement: randomized anchoring with collision avoidance.
//!
//! Each request is converted to a grid target, optionally pushed toward the
//! nearest border, and then tried at up to [`MAX_PLACEMENT_ATTEMPTS`] jittered
//! anchors. A candidate is accepted only if every cell's 3x3 neighbourhood is
//! still empty, which leaves a one-cell halo between zones.

use crate::generator::shapes::rasterize;
use crate::map::{Grid, ShapeKind, Zone, ZoneRole};
use crate::spec::{resolve_or_center, Location, PlacementPreference};
use crate::utils::util::clamp_i32;
use crate::utils::{Cell, Rect};
use log::{debug, warn};
use rand::Rng;

/// Placement attempts per zone before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 50;

/// Cells kept clear between a zone's footprint and the grid border.
const EDGE_MARGIN: i32 = 2;

/// Fraction of the map, measured from a border, in which an edge-preferring
/// zone is snapped to that border.
const EDGE_THRESHOLD: f64 = 0.3;

/// Smallest nominal size after jitter.
const MIN_ZONE_SIZE: i32 = 3;

/// One logical zone to place.
#[derive(Debug, Clone)]
pub struct ZoneRequest<'a> {
    pub role: ZoneRole,
    pub size: i32,
    pub location: Option<&'a Location>,
    pub preference: PlacementPreference,
    pub shape_hint: Option<ShapeKind>,
}

/// Snaps one axis of an edge-preferring target to the border it is already near.
fn bias_toward_edge(target: i32, extent: i32, size: i32) -> i32 {
    let ratio = target as f64 / extent as f64;
    if ratio < EDGE_THRESHOLD {
        size / 2 + EDGE_MARGIN
    } else if ratio > 1.0 - EDGE_THRESHOLD {
        extent - size / 2 - EDGE_MARGIN
    } else {
        target
    }
}

/// Chooses the top-left offset along one axis for a shape spanning relative
/// offsets `min_d..=max_d`. Honours the border margin when the grid allows it,
/// otherwise only keeps the shape on the grid. `None` if it cannot fit at all.
fn fit_axis(base: i32, min_d: i32, max_d: i32, extent: i32) -> Option<i32> {
    let pos = clamp_i32(base, EDGE_MARGIN - min_d, extent - 1 - EDGE_MARGIN - max_d);
    if pos + min_d >= 0 && pos + max_d < extent {
        return Some(pos);
    }
    let (lo, hi) = (-min_d, extent - 1 - max_d);
    if lo > hi {
        None
    } else {
        Some(clamp_i32(pos, lo, hi))
    }
}

/// True when every candidate cell and its 8 neighbours are empty. Neighbours
/// outside the grid are ignored.
pub fn can_place(grid: &Grid, cells: &[Cell]) -> bool {
    cells.iter().all(|c| {
        (-1..=1).all(|dy| {
            (-1..=1).all(|dx| {
                let (nx, ny) = (c.x + dx, c.y + dy);
                !grid.in_bounds(nx, ny) || grid.is_empty_at(nx, ny)
            })
        })
    })
}

/// Attempts to place a zone, stamping its cells into `grid` on success.
///
/// Returns `None` when no attempt succeeds; the grid is then unchanged and
/// the caller should treat the zone as absent.
pub fn place_zone<R: Rng>(grid: &mut Grid, request: &ZoneRequest, rng: &mut R) -> Option<Zone> {
    let (width, height) = (grid.width(), grid.height());
    let name = request.role.zone_name();

    let mut target = resolve_or_center(request.location, width, height);
    let size = (request.size + rng.random_range(-1..=1)).max(MIN_ZONE_SIZE);
    debug!("Placing '{}': target ({}, {}), size {}", name, target.x, target.y, size);

    if request.preference == PlacementPreference::Edge {
        let before = target;
        target = Cell::new(
            bias_toward_edge(target.x, width, size),
            bias_toward_edge(target.y, height, size),
        );
        debug!(
            "Edge preference moved '{}' from ({}, {}) to ({}, {})",
            name, before.x, before.y, target.x, target.y
        );
    }

    let shape = match request.shape_hint {
        Some(shape) => shape,
        None => ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())],
    };

    for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
        let spread = if attempt == 0 { 2 } else { 5 };
        let offset_x = rng.random_range(-spread..=spread);
        let offset_y = rng.random_range(-spread..=spread);

        let footprint = rasterize(Cell::new(0, 0), size, shape, rng);
        let Some(extent) = Rect::bounding(footprint.iter()) else {
            debug!("Attempt {}: '{}' rasterized to no cells", attempt + 1, name);
            continue;
        };

        let base_x = target.x + offset_x - size / 2;
        let base_y = target.y + offset_y - size / 2;
        let (Some(x), Some(y)) = (
            fit_axis(base_x, extent.x, extent.max_x(), width),
            fit_axis(base_y, extent.y, extent.max_y(), height),
        ) else {
            debug!("Attempt {}: {} '{}' does not fit the grid", attempt + 1, shape, name);
            continue;
        };

        let cells: Vec<Cell> = footprint.iter().map(|c| c.offset(x, y)).collect();
        if !can_place(grid, &cells) {
            continue;
        }

        let cell_type = request.role.cell_type();
        for c in &cells {
            grid.set(c.x, c.y, cell_type);
        }
        let zone = Zone::from_cells(request.role.clone(), shape, cells)?;
        debug!(
            "Placed '{}' on attempt {} at ({}, {}) {}x{} shape={}",
            name,
            attempt + 1,
            zone.bounds.x,
            zone.bounds.y,
            zone.bounds.w,
            zone.bounds.h,
            shape
        );
        return Some(zone);
    }

    warn!("Could not place '{}' after {} attempts", name, MAX_PLACEMENT_ATTEMPTS);
    None
}
