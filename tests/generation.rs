// tests/generation.rs
use assert_approx_eq::assert_approx_eq;
use sightgrid::generator::cover::is_isolated;
use sightgrid::map::{CellType, Grid};
use sightgrid::spec::Density;
use sightgrid::{generate_batch, GeneratedLevel, LevelGenerator, LevelSpec};
use std::collections::VecDeque;

const TWO_LANE: &str = r#"{
    "map_size": {"width": 40, "height": 40},
    "spawn_zones": [
        {"team": "T", "size": "medium", "location": {"x": 0.15, "y": 0.85}, "position_preference": "edge"},
        {"team": "CT", "size": "medium", "location": {"x": 0.85, "y": 0.15}, "position_preference": "edge"}
    ],
    "bomb_sites": [
        {"id": "A", "size": "large", "location": {"x": 0.2, "y": 0.2}},
        {"id": "B", "size": "medium", "location": {"x": 0.8, "y": 0.8}}
    ],
    "areas": [],
    "connectivity": {"style": "2-lane", "max_chokepoint_width": 2},
    "sightline_control": {"enabled": false},
    "cover_objects": {"enabled": false}
}"#;

fn two_lane_spec() -> LevelSpec {
    LevelSpec::from_json(TWO_LANE).unwrap()
}

fn generate(spec: &LevelSpec, seed: u64) -> GeneratedLevel {
    LevelGenerator::new(spec.clone()).generate_seeded(seed).unwrap()
}

/// Open cells reachable from `from` through 4-connected open cells.
fn reachable(grid: &Grid, from: (i32, i32)) -> Vec<Vec<bool>> {
    let mut seen = vec![vec![false; grid.width() as usize]; grid.height() as usize];
    let mut queue = VecDeque::from([from]);
    seen[from.1 as usize][from.0 as usize] = true;
    while let Some((x, y)) = queue.pop_front() {
        for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if grid.is_open_at(nx, ny) && !seen[ny as usize][nx as usize] {
                seen[ny as usize][nx as usize] = true;
                queue.push_back((nx, ny));
            }
        }
    }
    seen
}

#[test]
fn test_every_cell_is_a_known_type() {
    for seed in 0..5 {
        let level = generate(&LevelSpec::example(), seed);
        for row in level.grid.to_codes() {
            assert!(row.iter().all(|&code| CellType::from_code(code).is_some()));
        }
    }
}

#[test]
fn test_zones_stay_inside_the_grid() {
    for seed in 0..10 {
        let level = generate(&LevelSpec::example(), seed);
        for zone in level.zones.iter() {
            assert!(zone.bounds.fits_within(level.width, level.height), "{:?}", zone.bounds);
            assert!(zone.bounds.x >= 0 && zone.bounds.y >= 0);
            assert!(zone.cells.iter().all(|c| zone.bounds.contains(c)), "{}", zone.name);
        }
    }
}

#[test]
fn test_zones_never_touch_each_other() {
    for seed in 0..10 {
        let level = generate(&LevelSpec::example(), seed);
        let zones: Vec<_> = level.zones.iter().collect();
        for (i, a) in zones.iter().enumerate() {
            for b in zones.iter().skip(i + 1) {
                for ca in &a.cells {
                    assert!(
                        b.cells.iter().all(|cb| ca != cb && !ca.is_adjacent8(cb)),
                        "seed {}: {} touches {}",
                        seed,
                        a.name,
                        b.name
                    );
                }
            }
        }
    }
}

#[test]
fn test_zone_cells_survive_corridors_and_cover() {
    for seed in 0..5 {
        let level = generate(&LevelSpec::example(), seed);
        for zone in level.zones.iter() {
            assert!(zone.cells.iter().all(|c| level.grid.get(c.x, c.y) == Some(zone.cell_type)));
        }
    }
}

#[test]
fn test_same_seed_same_layout() {
    let spec = LevelSpec::example();
    let a = generate(&spec, 1234);
    let b = generate(&spec, 1234);
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.zones, b.zones);
    assert_eq!(a.sightline_stats, b.sightline_stats);

    let others: Vec<Grid> = (0..4).map(|s| generate(&spec, s).grid).collect();
    assert!(others.iter().any(|g| *g != a.grid));
}

#[test]
fn test_two_lane_scenario() {
    let spec = two_lane_spec();
    for seed in 0..5 {
        let level = generate(&spec, seed);
        let mut names = level.zones.names();
        names.sort();
        assert_eq!(names, vec!["CT_spawn", "T_spawn", "site_A", "site_B"], "seed {}", seed);
        assert!(level.grid.count(CellType::Corridor) > 0);
        assert_eq!(level.grid.count(CellType::Cover), 0);
        assert_eq!(level.grid.count(CellType::MidArea), 0);
    }
}

#[test]
fn test_two_lane_corridors_join_the_zones() {
    let mut spec = two_lane_spec();
    for spawn in &mut spec.spawn_zones {
        spawn.shape = Some("square".to_string());
    }
    for site in &mut spec.bomb_sites {
        site.shape = Some("square".to_string());
    }
    for seed in 0..5 {
        let level = generate(&spec, seed);
        let t = level.zones.get("T_spawn").unwrap();
        let seen = reachable(&level.grid, (t.cells[0].x, t.cells[0].y));
        for name in ["site_A", "site_B", "CT_spawn"] {
            let zone = level.zones.get(name).unwrap();
            let c = zone.cells[0];
            assert!(seen[c.y as usize][c.x as usize], "seed {}: {} unreachable", seed, name);
        }
    }
}

#[test]
fn test_high_cover_density() {
    let mut spec = two_lane_spec();
    spec.cover_objects.enabled = true;
    spec.cover_objects.density = Density::High;

    let (mut cover, mut floor) = (0usize, 0usize);
    for seed in 0..8 {
        let level = generate(&spec, seed);
        let placed = level.grid.count(CellType::Cover);
        cover += placed;
        floor += placed + level.grid.count(CellType::Corridor);
        assert_eq!(level.stats.cover_cells, placed);
    }
    let ratio = cover as f64 / floor as f64;
    // Rolls hit 18% of corridor cells; isolation rejects some of the hits.
    assert!(ratio <= 0.22, "ratio {}", ratio);
    assert_approx_eq!(ratio, 0.13, 0.08);
}

#[test]
fn test_cover_respects_isolation_when_placed() {
    let mut spec = LevelSpec::example();
    spec.cover_objects.density = Density::High;
    for seed in 0..4 {
        let level = generate(&spec, seed);
        let covers = level.grid.positions_of(CellType::Cover);
        // Replay the row-major pass: cover later in the pass did not exist yet.
        for (i, c) in covers.iter().enumerate() {
            let mut at_placement = level.grid.clone();
            for later in &covers[i..] {
                at_placement.set(later.x, later.y, CellType::Corridor);
            }
            assert!(is_isolated(&at_placement, c.x, c.y), "seed {} cover at {:?}", seed, c);
        }
    }
}

#[test]
fn test_large_corner_zone_on_tiny_grid() {
    let spec = LevelSpec::from_json(
        r#"{
            "map_size": {"width": 10, "height": 10},
            "bomb_sites": [{"id": "A", "size": "large", "location": {"x": 0, "y": 0}}]
        }"#,
    )
    .unwrap();
    let mut placed = 0;
    for seed in 0..20 {
        let level = generate(&spec, seed);
        if let Some(zone) = level.zones.get("site_A") {
            placed += 1;
            assert!(zone.cells.iter().all(|c| c.x >= 0 && c.y >= 0 && c.x < 10 && c.y < 10));
            assert!(zone.bounds.fits_within(10, 10), "seed {}: {:?}", seed, zone.bounds);
        }
    }
    assert!(placed > 0, "no seed placed the corner site");
}

#[test]
fn test_sightline_control_shortens_runs() {
    let mut open = LevelSpec::example();
    open.cover_objects.enabled = false;
    open.sightline_control.enabled = false;
    let mut bounded = open.clone();
    bounded.sightline_control.enabled = true;
    bounded.sightline_control.max_consecutive_open = 5;

    let longest = |spec: &LevelSpec| -> i32 {
        (0..8)
            .map(|seed| {
                let s = generate(spec, seed).sightline_stats;
                s.max_horizontal_sightline.max(s.max_vertical_sightline)
            })
            .sum()
    };
    let (open_total, bounded_total) = (longest(&open), longest(&bounded));
    assert!(bounded_total < open_total, "bounded {} open {}", bounded_total, open_total);
}

#[test]
fn test_batch_matches_single_runs_in_order() {
    let spec = LevelSpec::example();
    let seeds = [7, 3, 11];
    let batch = generate_batch(&spec, &seeds);
    assert_eq!(batch.len(), 3);
    for (seed, result) in seeds.iter().zip(batch) {
        let level = result.unwrap();
        assert_eq!(level.grid, generate(&spec, *seed).grid);
    }
}

#[test]
fn test_batch_propagates_invalid_spec() {
    let mut spec = LevelSpec::example();
    spec.connectivity.max_chokepoint_width = 0;
    let batch = generate_batch(&spec, &[1, 2]);
    assert!(batch.iter().all(|r| r.is_err()));
}

#[test]
fn test_tolerant_json_input() {
    let spec = LevelSpec::from_json(
        r#"{
            "description": "named anchors and odd values",
            "spawn_zones": [
                {"team": "T", "size": "gigantic", "location": "bottom-left", "shape": "hexagon"},
                {"team": "CT", "location": [0.85, 0.15]}
            ],
            "bomb_sites": [{"id": "A", "location": "nowhere", "position_preference": "center"}],
            "areas": [
                {"type": "mid", "size": "small", "location": {"x": 0.5}},
                {"type": "connector", "size": "small"}
            ],
            "connectivity": {"style": "open"},
            "cover_objects": {"enabled": true, "density": "extreme"}
        }"#,
    )
    .unwrap();
    assert_eq!(spec.map_size.width, 40);
    assert_eq!(spec.connectivity.lane_count(), 3);
    assert_eq!(spec.mid_requests().count(), 1);
    assert_eq!(spec.cover_objects.density, Density::Medium);

    let level = generate(&spec, 2);
    assert!(level.zones.contains("T_spawn"));
    assert!(level.zones.contains("CT_spawn"));
    let t = level.zones.get("T_spawn").unwrap();
    assert!(t.bounds.x < 20 && t.bounds.y > 20, "{:?}", t.bounds);
}

#[test]
fn test_export_document_round_trips_grid() {
    let spec = LevelSpec::example();
    let level = generate(&spec, 21);
    let doc = level.to_export_json(&spec).unwrap();
    let grid: Grid = serde_json::from_value(doc["grid"].clone()).unwrap();
    assert_eq!(grid, level.grid);
    let names: Vec<&str> = doc["areas"].as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(names, level.zones.names());
}
