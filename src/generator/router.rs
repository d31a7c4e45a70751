// src/generator/router.rs
//! Corridor routing between two zones.
//!
//! Corridors are orthogonal strokes stamped onto empty cells only, so zones
//! and earlier corridors are never overwritten. With an unbounded segment
//! limit a corridor is a single horizontal-then-vertical elbow. With a bound,
//! the router walks toward the target in runs of roughly `max_segment` cells
//! and sidesteps between runs, closing the off-axis gap as it goes. As long
//! as the iteration cap covers the route, no straight run along the corridor
//! exceeds `max_segment + width + 2` cells.

use crate::map::{CellType, Grid};
use crate::spec::UNBOUNDED_SEGMENT;
use crate::utils::util::clamp_i32;
use crate::utils::{Cell, Rect};
use log::debug;
use rand::Rng;

/// Upper bound on run-and-detour iterations per corridor.
pub const MAX_ROUTE_ITERATIONS: usize = 20;

/// Half-length of the cross-section sampled when narrowing a corridor.
const CROSS_SECTION_REACH: i32 = 3;

/// Probability that the detour side flips after each sidestep.
const DETOUR_FLIP_CHANCE: f64 = 0.8;

/// Shortest run drawn for a bounded walk.
const MIN_RUN: i32 = 3;

/// Direction of travel for a single step. The corridor band is laid
/// perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Travel {
    Horizontal,
    Vertical,
}

/// Stamps corridors into a grid, drawing randomness from a shared stream.
pub struct CorridorRouter<'a, R: Rng> {
    grid: &'a mut Grid,
    rng: &'a mut R,
}

impl<'a, R: Rng> CorridorRouter<'a, R> {
    pub fn new(grid: &'a mut Grid, rng: &'a mut R) -> Self {
        CorridorRouter { grid, rng }
    }

    /// Connects the centers of two zone rectangles. Returns the number of
    /// cells newly turned into corridor.
    pub fn route(&mut self, from: &Rect, to: &Rect, base_width: i32, max_segment: i32) -> usize {
        let start = self.endpoint(from);
        let end = self.endpoint(to);
        let length = start.manhattan_to(&end);
        let width = self.corridor_width(length, base_width);
        debug!(
            "Route ({}, {}) -> ({}, {}), length {}, width {} (base {})",
            start.x, start.y, end.x, end.y, length, width, base_width
        );

        if max_segment >= UNBOUNDED_SEGMENT {
            self.draw_elbow(start, end, width)
        } else {
            self.draw_with_turns(start, end, width, max_segment)
        }
    }

    /// Draws one uniform roll from the shared stream.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    /// Zone center jittered by one cell, kept one cell inside the grid.
    fn endpoint(&mut self, rect: &Rect) -> Cell {
        let center = rect.center();
        let x = clamp_i32(center.x + self.rng.random_range(-1..=1), 1, self.grid.width() - 2);
        let y = clamp_i32(center.y + self.rng.random_range(-1..=1), 1, self.grid.height() - 2);
        Cell::new(x, y)
    }

    /// Jitters the base width by one. Long corridors are at least 2 wide;
    /// medium ones too unless the base width is 1.
    fn corridor_width(&mut self, length: i32, base_width: i32) -> i32 {
        let jittered = base_width + self.rng.random_range(-1..=1);
        let floor = if length > 15 {
            2
        } else if length > 8 {
            if base_width == 1 {
                1
            } else {
                2
            }
        } else {
            1
        };
        jittered.max(floor)
    }

    /// Narrows `desired` when the cross-section through `(x, y)`, perpendicular
    /// to the direction of travel, already has open cells.
    fn safe_width(&self, x: i32, y: i32, desired: i32, travel: Travel) -> i32 {
        let open = (-CROSS_SECTION_REACH..=CROSS_SECTION_REACH)
            .filter(|d| match travel {
                Travel::Horizontal => self.grid.is_open_at(x, y + d),
                Travel::Vertical => self.grid.is_open_at(x + d, y),
            })
            .count();
        if open > 4 {
            1
        } else if open > 2 {
            (desired - 1).max(1)
        } else {
            desired
        }
    }

    /// Lays a band of `width` cells through `(x, y)`, perpendicular to travel.
    fn stamp_band(&mut self, x: i32, y: i32, width: i32, travel: Travel) -> usize {
        let mut stamped = 0;
        for w in 0..width {
            let d = w - width / 2;
            let (cx, cy) = match travel {
                Travel::Horizontal => (x, y + d),
                Travel::Vertical => (x + d, y),
            };
            if self.grid.stamp_if_empty(cx, cy, CellType::Corridor) {
                stamped += 1;
            }
        }
        stamped
    }

    /// Steps once toward `target` along `travel`, narrowing as needed.
    fn step(&mut self, pos: &mut Cell, target: i32, width: i32, travel: Travel) -> usize {
        match travel {
            Travel::Horizontal => pos.x += (target - pos.x).signum(),
            Travel::Vertical => pos.y += (target - pos.y).signum(),
        }
        let w = self.safe_width(pos.x, pos.y, width, travel);
        self.stamp_band(pos.x, pos.y, w, travel)
    }

    /// Horizontal run along the start row, then vertical run along the end column.
    fn draw_elbow(&mut self, start: Cell, end: Cell, width: i32) -> usize {
        let mut stamped = 0;
        for x in start.x.min(end.x)..=start.x.max(end.x) {
            stamped += self.stamp_band(x, start.y, width, Travel::Horizontal);
        }
        for y in start.y.min(end.y)..=start.y.max(end.y) {
            stamped += self.stamp_band(end.x, y, width, Travel::Vertical);
        }
        stamped
    }

    /// Walks toward `end` in runs of about `max_segment` cells along the
    /// dominant axis. Between runs the off-axis gap is closed in proportion to
    /// the main-axis progress; once the off-axis is aligned the walk sidesteps
    /// to a random side instead. Sidesteps move at least `width` cells and
    /// runs never leave a stub shorter than the band, so two runs never line
    /// up into one.
    fn draw_with_turns(&mut self, start: Cell, end: Cell, width: i32, max_segment: i32) -> usize {
        let mut pos = start;
        let mut stamped = 0;
        let mainly_horizontal = (end.x - pos.x).abs() > (end.y - pos.y).abs();
        let (main, side) = if mainly_horizontal {
            (Travel::Horizontal, Travel::Vertical)
        } else {
            (Travel::Vertical, Travel::Horizontal)
        };
        let (main_target, side_target) = (axis(end, main), axis(end, side));
        let side_limit = match side {
            Travel::Horizontal => self.grid.width(),
            Travel::Vertical => self.grid.height(),
        };
        let detour = (max_segment / 3 + self.rng.random_range(-1..=2)).max(2);
        let min_shift = width.max(2);
        let min_stub = width + 1;
        let mut positive_side = self.rng.random_bool(0.5);

        for _ in 0..MAX_ROUTE_ITERATIONS {
            let main_left = (main_target - axis(pos, main)).abs();
            let side_left = (side_target - axis(pos, side)).abs();
            if main_left == 0 && side_left <= 1 {
                break;
            }
            let segment = (max_segment + self.rng.random_range(-2..=2)).max(MIN_RUN);

            let mut run = segment.min(main_left);
            let stub = main_left - run;
            if stub > 0 && stub < min_stub {
                run = if main_left - min_stub >= min_stub {
                    main_left - min_stub
                } else {
                    main_left
                };
            }
            for _ in 0..run {
                stamped += self.step(&mut pos, main_target, width, main);
            }

            let here = axis(pos, side);
            let shift_to = if side_left >= min_shift {
                let share = if main_left > 0 {
                    (side_left * run + main_left - 1) / main_left
                } else {
                    side_left
                };
                let mut shift = share.max(min_shift).min(side_left);
                if side_left - shift == 1 {
                    shift = if shift > min_shift { shift - 1 } else { shift + 1 };
                }
                Some(here + shift * (side_target - here).signum())
            } else if axis(pos, main) != main_target {
                let magnitude = (detour + self.rng.random_range(-1..=1)).max(min_shift);
                let signed = if positive_side { magnitude } else { -magnitude };
                let mut to = clamp_i32(here + signed, 1, side_limit - 2);
                if (to - here).abs() < min_shift {
                    // Pinned against the border: go the other way.
                    to = clamp_i32(here - signed, 1, side_limit - 2);
                }
                if self.chance(DETOUR_FLIP_CHANCE) {
                    positive_side = !positive_side;
                }
                Some(to)
            } else {
                None
            };

            if let Some(to) = shift_to {
                while axis(pos, side) != to {
                    stamped += self.step(&mut pos, to, width, side);
                }
            }
        }

        while pos.x != end.x {
            stamped += self.step(&mut pos, end.x, width, Travel::Horizontal);
        }
        while pos.y != end.y {
            stamped += self.step(&mut pos, end.y, width, Travel::Vertical);
        }
        stamped
    }
}

fn axis(cell: Cell, travel: Travel) -> i32 {
    match travel {
        Travel::Horizontal => cell.x,
        Travel::Vertical => cell.y,
    }
}
