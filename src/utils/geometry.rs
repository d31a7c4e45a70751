// src/utils/geometry.rs
use serde::{Deserialize, Serialize};

/// An integer grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_to(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True when the two cells touch, diagonals included.
    pub fn is_adjacent8(&self, other: &Cell) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

/// Axis-aligned integer rectangle: top-left corner plus width and height.
///
/// Serialized with the short `x`/`y`/`w`/`h` keys that downstream consumers
/// of a layout expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Tight bounding box of a set of cells, or `None` for an empty set.
    pub fn bounding<'a, I>(cells: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let mut iter = cells.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for c in iter {
            min_x = min_x.min(c.x);
            min_y = min_y.min(c.y);
            max_x = max_x.max(c.x);
            max_y = max_y.max(c.y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    pub fn max_x(&self) -> i32 {
        self.x + self.w - 1
    }

    pub fn max_y(&self) -> i32 {
        self.y + self.h - 1
    }

    /// Center cell, rounding toward the top-left.
    pub fn center(&self) -> Cell {
        Cell::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.x >= self.x && cell.x <= self.max_x() && cell.y >= self.y && cell.y <= self.max_y()
    }

    /// True when the rectangle lies within `[0, width) x [0, height)`.
    pub fn fits_within(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.w > 0 && self.h > 0 && self.max_x() < width && self.max_y() < height
    }

    pub fn center_distance(&self, other: &Rect) -> i32 {
        self.center().manhattan_to(&other.center())
    }
}
