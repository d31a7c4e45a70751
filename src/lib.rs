// src/lib.rs

pub mod generator;
pub mod map;
pub mod spec;
pub mod utils;

pub use generator::{generate_batch, GeneratedLevel, GenerationError, LevelGenerator};
pub use spec::LevelSpec;
