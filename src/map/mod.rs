// src/map/mod.rs
pub mod cell;
pub mod grid;
pub mod shape;
pub mod zone;

pub use cell::CellType;
pub use grid::Grid;
pub use shape::ShapeKind;
pub use zone::{Team, Zone, ZoneRole, ZoneTable};
