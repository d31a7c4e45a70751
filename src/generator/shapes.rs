// src/generator/shapes.rs
//! Shape rasterization: turns a shape keyword, an anchor and a nominal size
//! into the concrete set of grid cells a zone occupies.
//!
//! All shapes grow right and down from the anchor, except `organic`, whose
//! edits may reach up to two cells above or left of it. Results are
//! deduplicated and returned in sorted order so that callers iterating them
//! stay deterministic.

use crate::map::ShapeKind;
use crate::utils::Cell;
use rand::Rng;
use std::collections::BTreeSet;

/// How far outside the base block an organic edit may start.
const ORGANIC_MARGIN: i32 = 2;

fn fill_block(cells: &mut BTreeSet<Cell>, anchor: Cell, dx0: i32, dy0: i32, w: i32, h: i32) {
    for dy in dy0..dy0 + h {
        for dx in dx0..dx0 + w {
            cells.insert(anchor.offset(dx, dy));
        }
    }
}

/// Rasterizes `shape` at `anchor`. Consumes randomness only for
/// `rectangle` (orientation, stretch) and `organic` (edit blocks).
pub fn rasterize<R: Rng>(anchor: Cell, size: i32, shape: ShapeKind, rng: &mut R) -> Vec<Cell> {
    let mut cells = BTreeSet::new();
    match shape {
        ShapeKind::Square => fill_block(&mut cells, anchor, 0, 0, size, size),
        ShapeKind::Rectangle => {
            let (w, h) = if rng.random_bool(0.5) {
                (size + rng.random_range(1..=3), (size - 1).max(3))
            } else {
                ((size - 1).max(3), size + rng.random_range(1..=3))
            };
            fill_block(&mut cells, anchor, 0, 0, w, h);
        }
        ShapeKind::LShape => {
            let arm = size / 2 + 1;
            fill_block(&mut cells, anchor, 0, 0, arm, size);
            fill_block(&mut cells, anchor, 0, 0, size, arm);
        }
        ShapeKind::TShape => {
            let third = size / 3;
            fill_block(&mut cells, anchor, 0, 0, size, third + 1);
            fill_block(&mut cells, anchor, third, third, size / 2 + 1, size - third);
        }
        ShapeKind::Plus => {
            let mid = size / 2;
            fill_block(&mut cells, anchor, 0, mid - 1, size, 3);
            fill_block(&mut cells, anchor, mid - 1, 0, 3, size);
        }
        ShapeKind::Organic => {
            fill_block(&mut cells, anchor, 0, 0, size, size);
            let edits = rng.random_range(2..=5);
            for _ in 0..edits {
                let ex = rng.random_range(-ORGANIC_MARGIN..=size);
                let ey = rng.random_range(-ORGANIC_MARGIN..=size);
                // Two-in-three chance of a 2x2 block, otherwise 3x3.
                let block = if rng.random_range(0..3) < 2 { 2 } else { 3 };
                let add = rng.random_bool(0.5);
                for dy in ey..ey + block {
                    for dx in ex..ex + block {
                        let cell = anchor.offset(dx, dy);
                        if add {
                            cells.insert(cell);
                        } else {
                            cells.remove(&cell);
                        }
                    }
                }
            }
        }
    }
    cells.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Rect;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn shape_at_origin(shape: ShapeKind, size: i32, seed: u64) -> Vec<Cell> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rasterize(Cell::new(0, 0), size, shape, &mut rng)
    }

    #[test]
    fn test_square() {
        let cells = shape_at_origin(ShapeKind::Square, 4, 0);
        assert_eq!(cells.len(), 16);
        assert_eq!(Rect::bounding(cells.iter()), Some(Rect::new(0, 0, 4, 4)));
    }

    #[test]
    fn test_rectangle_is_stretched_on_one_axis() {
        for seed in 0..20 {
            let cells = shape_at_origin(ShapeKind::Rectangle, 6, seed);
            let rect = Rect::bounding(cells.iter()).unwrap();
            assert_eq!(cells.len() as i32, rect.w * rect.h);
            let (long, short) = if rect.w > rect.h { (rect.w, rect.h) } else { (rect.h, rect.w) };
            assert_eq!(short, 5);
            assert!((7..=9).contains(&long));
        }
    }

    #[test]
    fn test_rectangle_short_side_floor() {
        let cells = shape_at_origin(ShapeKind::Rectangle, 3, 1);
        let rect = Rect::bounding(cells.iter()).unwrap();
        assert_eq!(rect.w.min(rect.h), 3);
    }

    #[test]
    fn test_l_shape() {
        let cells = shape_at_origin(ShapeKind::LShape, 6, 0);
        // Vertical arm 4x6 plus horizontal arm 6x4, overlapping in a 4x4 block.
        assert_eq!(cells.len(), 24 + 24 - 16);
        assert!(cells.contains(&Cell::new(0, 5)));
        assert!(cells.contains(&Cell::new(5, 0)));
        assert!(!cells.contains(&Cell::new(5, 5)));
    }

    #[test]
    fn test_t_shape() {
        let cells = shape_at_origin(ShapeKind::TShape, 6, 0);
        // Bar: 6 wide, 3 tall. Stem: columns 2..6, rows 2..6.
        assert!(cells.contains(&Cell::new(0, 0)));
        assert!(cells.contains(&Cell::new(5, 2)));
        assert!(cells.contains(&Cell::new(2, 5)));
        assert!(cells.contains(&Cell::new(5, 5)));
        assert!(!cells.contains(&Cell::new(0, 5)));
        assert!(!cells.contains(&Cell::new(1, 3)));
        assert_eq!(cells.len(), 18 + 16 - 4);
    }

    #[test]
    fn test_plus() {
        let cells = shape_at_origin(ShapeKind::Plus, 7, 0);
        assert_eq!(cells.len(), 21 + 21 - 9);
        assert!(cells.contains(&Cell::new(0, 3)));
        assert!(cells.contains(&Cell::new(3, 0)));
        assert!(!cells.contains(&Cell::new(0, 0)));
        assert!(!cells.contains(&Cell::new(6, 6)));
    }

    #[test]
    fn test_organic_stays_near_base_block() {
        for seed in 0..50 {
            let cells = shape_at_origin(ShapeKind::Organic, 6, seed);
            for c in &cells {
                assert!(c.x >= -2 && c.y >= -2, "{:?}", c);
                assert!(c.x <= 6 + 2 && c.y <= 6 + 2, "{:?}", c);
            }
        }
    }

    #[test]
    fn test_same_draws_give_same_cells() {
        for shape in ShapeKind::ALL {
            let a = shape_at_origin(shape, 6, 99);
            let b = shape_at_origin(shape, 6, 99);
            assert_eq!(a, b, "{}", shape);
        }
    }

    #[test]
    fn test_results_are_deduplicated() {
        for shape in ShapeKind::ALL {
            let cells = shape_at_origin(shape, 9, 3);
            let unique: BTreeSet<Cell> = cells.iter().copied().collect();
            assert_eq!(unique.len(), cells.len());
        }
    }

    #[test]
    fn test_anchor_translation() {
        let cells = shape_at_origin(ShapeKind::Square, 3, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let moved = rasterize(Cell::new(5, 7), 3, ShapeKind::Square, &mut rng);
        let expected: Vec<Cell> = cells.iter().map(|c| c.offset(5, 7)).collect();
        assert_eq!(moved, expected);
    }
}
