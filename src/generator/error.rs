// src/generator/error.rs
use thiserror::Error;

/// Failures that prevent a layout from being produced at all.
///
/// Zone placement failures are not errors: an unplaceable zone is simply
/// absent from the resulting zone table.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("corridor width must be at least 1, got {0}")]
    InvalidCorridorWidth(i32),

    #[error("max consecutive open cells must be at least 1 when sightline control is enabled, got {0}")]
    InvalidSightlineLimit(i32),

    #[error("malformed level specification: {0}")]
    Json(#[from] serde_json::Error),
}
