//! Build error taxonomy.

use thiserror::Error;

/// Errors a build can report.
///
/// A failed search along one ray is not an error (the session retries
/// with a new direction); these are the conditions that end a build.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// The configured cell unit is not positive.
    #[error("cell unit must be positive, got {0}")]
    InvalidCellUnit(f64),

    /// The configured grid has a non-positive dimension.
    #[error("labyrinth dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// The room template's cell footprint cannot fit inside the grid.
    #[error("room footprint of {size_x}x{size_y} cells does not fit a {width}x{height} field")]
    FootprintTooLarge {
        size_x: i32,
        size_y: i32,
        width: i32,
        height: i32,
    },

    /// Every search direction in the attempt budget was exhausted without
    /// finding space for a room.
    #[error("unable to place room {room_index} after {attempts} search attempts")]
    PlacementExhausted { room_index: usize, attempts: u32 },

    /// The path connector found no strictly descending neighbor. The
    /// distance field was not propagated after its last mutation; this is
    /// an internal invariant violation, not a recoverable condition.
    #[error("distance field inconsistent: no descent from ({x}, {y})")]
    NoDescent { x: i32, y: i32 },
}
