// src/generator/sightline.rs
use crate::map::{CellType, Grid};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Multiplier turning the longest axis run into a diagonal estimate.
const DIAGONAL_FACTOR: f64 = 1.4;

/// Longest unobstructed straight runs in a finished layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SightlineStats {
    pub max_horizontal_sightline: i32,
    pub max_vertical_sightline: i32,
    pub estimated_max_diagonal: i32,
}

/// Longest run of consecutive open cells in a line.
fn longest_open_run<I: IntoIterator<Item = CellType>>(line: I) -> i32 {
    let mut best = 0;
    let mut run = 0;
    for cell in line {
        if cell.is_open() {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// Scans every row and column for its longest open run. Rows and columns
/// are independent, so both scans run in parallel.
pub fn analyze(grid: &Grid) -> SightlineStats {
    let max_horizontal = (0..grid.height())
        .into_par_iter()
        .filter_map(|y| grid.row(y))
        .map(|row| longest_open_run(row.iter().copied()))
        .max()
        .unwrap_or(0);
    let max_vertical = (0..grid.width())
        .into_par_iter()
        .map(|x| longest_open_run(grid.column(x)))
        .max()
        .unwrap_or(0);
    let longest = max_horizontal.max(max_vertical);

    SightlineStats {
        max_horizontal_sightline: max_horizontal,
        max_vertical_sightline: max_vertical,
        estimated_max_diagonal: (longest as f64 * DIAGONAL_FACTOR).floor() as i32,
    }
}
