// src/map/grid.rs

use crate::map::CellType;
use crate::utils::Cell;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Fixed-size 2D layout grid, stored row-major.
///
/// Coordinates are signed so callers can look up neighbours past the border;
/// every accessor treats out-of-bounds cells as absent rather than panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<CellType>,
}

impl Grid {
    /// Allocates a grid filled with `CellType::Empty`. Non-positive
    /// dimensions produce a zero-area grid.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Grid {
            width,
            height,
            cells: vec![CellType::Empty; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y as usize) * (self.width as usize) + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<CellType> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrites a cell. Returns `false` when the coordinate is outside the grid.
    pub fn set(&mut self, x: i32, y: i32, cell: CellType) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(CellType::Empty)
    }

    pub fn is_open_at(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(false, CellType::is_open)
    }

    /// Writes `cell` only if the target is in bounds and currently empty.
    pub fn stamp_if_empty(&mut self, x: i32, y: i32, cell: CellType) -> bool {
        match self.index(x, y) {
            Some(i) if self.cells[i] == CellType::Empty => {
                self.cells[i] = cell;
                true
            }
            _ => false,
        }
    }

    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// All coordinates currently holding `cell`, in row-major order.
    pub fn positions_of(&self, cell: CellType) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == cell)
            .map(|(i, _)| {
                let w = self.width as usize;
                Cell::new((i % w) as i32, (i / w) as i32)
            })
            .collect()
    }

    pub fn row(&self, y: i32) -> Option<&[CellType]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.cells[start..start + w])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellType]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    pub fn column(&self, x: i32) -> impl Iterator<Item = CellType> + '_ {
        (0..self.height).filter_map(move |y| self.get(x, y))
    }

    /// Integer codes, rows first, as consumed by layout exporters.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.rows().map(|r| r.iter().map(|c| c.code()).collect()).collect()
    }

    /// Builds a grid from rows of cells. Returns `None` for ragged input.
    pub fn from_rows(rows: Vec<Vec<CellType>>) -> Option<Grid> {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.len()) as i32;
        if rows.iter().any(|r| r.len() as i32 != width) {
            return None;
        }
        Some(Grid {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.height as usize))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<CellType>>::deserialize(deserializer)?;
        Grid::from_rows(rows).ok_or_else(|| serde::de::Error::custom("grid rows have differing lengths"))
    }
}
