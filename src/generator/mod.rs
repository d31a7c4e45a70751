// src/generator/mod.rs
//! # Layout Generation
//!
//! Turns a [`LevelSpec`] into a finished grid. Phases run strictly in order
//! against one grid and one random stream:
//!
//! 1. place spawns, then bomb sites, then mid areas ([`placer`])
//! 2. decide the lane topology and carve corridors ([`connector`], [`router`])
//! 3. scatter cover over the corridors ([`cover`])
//! 4. measure the longest sightlines ([`sightline`])
//!
//! With the same spec and the same seed the output is identical.

pub mod connector;
pub mod cover;
pub mod error;
pub mod placer;
pub mod router;
pub mod shapes;
pub mod sightline;

pub use connector::Connection;
pub use error::GenerationError;
pub use placer::ZoneRequest;
pub use sightline::SightlineStats;

use crate::map::{CellType, Grid, ZoneRole, ZoneTable};
use crate::spec::{LevelSpec, PlacementPreference};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Instant;

/// Bookkeeping gathered while generating; not part of the exported layout.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation_time: f64,
    pub requested_zones: usize,
    pub placed_zones: usize,
    pub connections: usize,
    pub corridor_cells: usize,
    pub cover_cells: usize,
}

/// A finished layout: the grid, the zones placed on it and its sightlines.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLevel {
    pub grid: Grid,
    pub zones: ZoneTable,
    pub width: i32,
    pub height: i32,
    pub sightline_stats: SightlineStats,
    #[serde(skip)]
    pub stats: GenerationStats,
}

impl GeneratedLevel {
    /// Cell code to cell name, e.g. `"0" -> "EMPTY"`.
    pub fn cell_type_legend() -> BTreeMap<String, &'static str> {
        CellType::ALL
            .iter()
            .map(|c| (c.code().to_string(), c.name()))
            .collect()
    }

    /// The hand-off document for geometry exporters: grid codes, zone
    /// metadata, sightline stats, and the spec the layout came from.
    pub fn to_export_json(&self, spec: &LevelSpec) -> Result<Value, GenerationError> {
        Ok(json!({
            "grid": serde_json::to_value(&self.grid)?,
            "areas": serde_json::to_value(&self.zones)?,
            "width": self.width,
            "height": self.height,
            "sightline_stats": serde_json::to_value(self.sightline_stats)?,
            "metadata": {
                "specification": serde_json::to_value(spec)?,
                "cell_types": serde_json::to_value(Self::cell_type_legend())?,
            },
        }))
    }

    /// The grid as glyph lines, one per row.
    pub fn render_ascii(&self) -> String {
        self.grid.to_string()
    }
}

/// Generates layouts for a single specification.
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    spec: LevelSpec,
}

impl LevelGenerator {
    pub fn new(spec: LevelSpec) -> Self {
        LevelGenerator { spec }
    }

    pub fn spec(&self) -> &LevelSpec {
        &self.spec
    }

    /// Generates with a ChaCha stream seeded from `seed`.
    pub fn generate_seeded(&self, seed: u64) -> Result<GeneratedLevel, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    /// Generates one layout, drawing every random decision from `rng`.
    ///
    /// Fails only when the spec itself is unusable. Zones that cannot be
    /// placed are left out of the result.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<GeneratedLevel, GenerationError> {
        self.spec.validate()?;
        let started = Instant::now();
        let spec = &self.spec;
        let (width, height) = (spec.map_size.width, spec.map_size.height);
        info!("Generating {}x{} layout", width, height);

        let mut grid = Grid::new(width, height);
        let mut zones = ZoneTable::new();
        let mut stats = GenerationStats::default();

        for spawn in &spec.spawn_zones {
            let request = ZoneRequest {
                role: ZoneRole::Spawn(spawn.team),
                size: spawn.size.cells(),
                location: spawn.location.as_ref(),
                preference: spawn.position_preference,
                shape_hint: spawn.shape_hint(),
            };
            stats.requested_zones += 1;
            if let Some(zone) = placer::place_zone(&mut grid, &request, rng) {
                zones.insert(zone);
            }
        }

        for site in &spec.bomb_sites {
            let request = ZoneRequest {
                role: ZoneRole::Site(site.id.clone()),
                size: site.size.cells(),
                location: site.location.as_ref(),
                preference: site.position_preference,
                shape_hint: site.shape_hint(),
            };
            stats.requested_zones += 1;
            if let Some(zone) = placer::place_zone(&mut grid, &request, rng) {
                zones.insert(zone);
            }
        }

        let mut mid_index = 0;
        for area in spec.mid_requests() {
            let request = ZoneRequest {
                role: ZoneRole::Mid(mid_index),
                size: area.size.cells(),
                location: area.location.as_ref(),
                preference: PlacementPreference::Any,
                shape_hint: area.shape_hint(),
            };
            stats.requested_zones += 1;
            if let Some(zone) = placer::place_zone(&mut grid, &request, rng) {
                zones.insert(zone);
                mid_index += 1;
            }
        }
        stats.placed_zones = zones.len();
        info!(
            "Placed {} of {} zones: {:?}",
            stats.placed_zones,
            stats.requested_zones,
            zones.names()
        );

        let connections = connector::connect_zones(
            &mut grid,
            &zones,
            &spec.connectivity,
            &spec.sightline_control,
            rng,
        );
        stats.connections = connections.len();

        if spec.cover_objects.enabled {
            stats.cover_cells = cover::place_cover(&mut grid, spec.cover_objects.density, rng);
        } else {
            debug!("Cover disabled");
        }
        stats.corridor_cells = grid.count(CellType::Corridor);

        let sightline_stats = sightline::analyze(&grid);
        stats.generation_time = started.elapsed().as_secs_f64();
        info!(
            "Layout done in {:.3}s: {} corridor cells, {} cover, sightlines h={} v={} d~{}",
            stats.generation_time,
            stats.corridor_cells,
            stats.cover_cells,
            sightline_stats.max_horizontal_sightline,
            sightline_stats.max_vertical_sightline,
            sightline_stats.estimated_max_diagonal
        );

        Ok(GeneratedLevel {
            grid,
            zones,
            width,
            height,
            sightline_stats,
            stats,
        })
    }
}

/// Generates one layout per seed in parallel. Each job owns its own grid and
/// random stream. Results come back in seed order.
pub fn generate_batch(spec: &LevelSpec, seeds: &[u64]) -> Vec<Result<GeneratedLevel, GenerationError>> {
    let generator = LevelGenerator::new(spec.clone());
    info!("Generating batch of {} layouts", seeds.len());
    seeds
        .par_iter()
        .map(|&seed| generator.generate_seeded(seed))
        .collect()
}
