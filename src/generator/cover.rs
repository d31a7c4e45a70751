// src/generator/cover.rs
//! Cover placement: scatters single cover cells along corridors.
//!
//! Every corridor cell gets one roll against the density's chance, in
//! row-major order. A hit is kept only where the cell's wall neighbours form
//! at most one connected cluster, so cover never plugs a dead end or a
//! one-cell pinch.

use crate::map::{CellType, Grid};
use crate::spec::Density;
use crate::utils::Cell;
use log::{debug, info};
use rand::Rng;
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

/// Relative offsets of the 8-neighbourhood, row-major.
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// In-bounds 8-neighbours of `(x, y)` that are not open floor. Cover counts
/// as wall.
fn wall_neighbours(grid: &Grid, x: i32, y: i32) -> Vec<Cell> {
    NEIGHBOURS
        .iter()
        .map(|&(dx, dy)| Cell::new(x + dx, y + dy))
        .filter(|c| grid.in_bounds(c.x, c.y) && !grid.is_open_at(c.x, c.y))
        .collect()
}

/// True when a cover cell at `(x, y)` would not split or seal anything: at
/// most one wall neighbour, or all wall neighbours 8-connected to each other.
pub fn is_isolated(grid: &Grid, x: i32, y: i32) -> bool {
    let walls = wall_neighbours(grid, x, y);
    if walls.len() <= 1 {
        return true;
    }

    let mut clusters = QuickUnionUf::<UnionBySize>::new(walls.len());
    for i in 0..walls.len() {
        for j in i + 1..walls.len() {
            if walls[i].is_adjacent8(&walls[j]) {
                clusters.union(i, j);
            }
        }
    }
    let root = clusters.find(0);
    (1..walls.len()).all(|i| clusters.find(i) == root)
}

/// Rolls for cover on every corridor cell and retags the accepted ones.
/// Returns the number of cover cells placed.
pub fn place_cover<R: Rng>(grid: &mut Grid, density: Density, rng: &mut R) -> usize {
    let chance = density.chance();
    let corridors = grid.positions_of(CellType::Corridor);
    info!(
        "Placing cover over {} corridor cells ({:?}, chance {})",
        corridors.len(),
        density,
        chance
    );

    let mut placed = 0;
    let mut rejected = 0;
    for c in corridors {
        if rng.random::<f64>() >= chance {
            continue;
        }
        if is_isolated(grid, c.x, c.y) {
            grid.set(c.x, c.y, CellType::Cover);
            placed += 1;
        } else {
            rejected += 1;
        }
    }
    debug!("Cover: {} placed, {} rejected by isolation", placed, rejected);
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// A horizontal corridor `width` rows tall across an otherwise empty grid.
    fn corridor_grid(width: i32) -> Grid {
        let mut grid = Grid::new(30, 9);
        for y in 4 - width / 2..4 - width / 2 + width {
            for x in 0..30 {
                grid.set(x, y, CellType::Corridor);
            }
        }
        grid
    }

    #[test]
    fn test_single_wall_side_is_isolated() {
        // Open everywhere except one wall row directly above.
        let mut grid = Grid::new(5, 5);
        for y in 0..5 {
            for x in 0..5 {
                grid.set(x, y, CellType::MidArea);
            }
        }
        for x in 0..5 {
            grid.set(x, 1, CellType::Empty);
        }
        assert!(is_isolated(&grid, 2, 2));
    }

    #[test]
    fn test_pinch_point_is_not_isolated() {
        // A one-wide corridor has walls above and below: two clusters.
        let grid = corridor_grid(1);
        assert!(!is_isolated(&grid, 10, 4));
    }

    #[test]
    fn test_dead_end_is_isolated() {
        // The tip of a dead end is wrapped by one U-shaped wall cluster.
        let mut grid = Grid::new(9, 9);
        for x in 0..5 {
            grid.set(x, 4, CellType::Corridor);
        }
        assert!(is_isolated(&grid, 4, 4));
    }

    #[test]
    fn test_open_surroundings_are_isolated() {
        let mut grid = Grid::new(5, 5);
        for y in 0..5 {
            for x in 0..5 {
                grid.set(x, y, CellType::Corridor);
            }
        }
        assert!(is_isolated(&grid, 2, 2));
        grid.set(1, 1, CellType::Cover);
        assert!(is_isolated(&grid, 2, 2));
        grid.set(3, 3, CellType::Cover);
        assert!(!is_isolated(&grid, 2, 2));
    }

    #[test]
    fn test_border_neighbours_are_ignored() {
        // Corner cell of an all-corridor grid has only 3 in-bounds neighbours.
        let mut grid = Grid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, CellType::Corridor);
            }
        }
        assert!(wall_neighbours(&grid, 0, 0).is_empty());
    }

    #[test]
    fn test_narrow_corridor_gets_no_cover() {
        let mut grid = corridor_grid(1);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(place_cover(&mut grid, Density::High, &mut rng), 0);
        assert_eq!(grid.count(CellType::Cover), 0);
    }

    #[test]
    fn test_wide_corridor_gets_cover_on_its_edges() {
        let mut grid = corridor_grid(3);
        let before = grid.count(CellType::Corridor);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let placed = place_cover(&mut grid, Density::High, &mut rng);
        assert!(placed > 0);
        assert_eq!(grid.count(CellType::Cover), placed);
        assert_eq!(grid.count(CellType::Corridor) + placed, before);
    }

    #[test]
    fn test_only_corridors_are_retagged() {
        let mut grid = corridor_grid(3);
        for x in 0..30 {
            grid.set(x, 8, CellType::Bombsite);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        place_cover(&mut grid, Density::High, &mut rng);
        assert_eq!(grid.count(CellType::Bombsite), 30);
    }
}
