//! World-unit / cell-coordinate conversion.

use serde::{Deserialize, Serialize};

/// Bidirectional mapping between continuous world coordinates and integer
/// grid cells, fixed to one cell size per build session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellUnitConverter {
    meters_per_cell: f64,
}

impl CellUnitConverter {
    /// Create a converter. The cell size must be positive; configuration
    /// validation enforces this before a converter is built.
    pub fn new(meters_per_cell: f64) -> Self {
        debug_assert!(meters_per_cell > 0.0);
        Self { meters_per_cell }
    }

    /// World units per cell.
    pub fn cell_size(&self) -> f64 {
        self.meters_per_cell
    }

    /// Nearest cell component, halves rounding away from zero.
    pub fn meters_to_cell_round(&self, meters: f64) -> i32 {
        (meters / self.meters_per_cell).round() as i32
    }

    /// Containing cell component (floor).
    pub fn meters_to_cell_floor(&self, meters: f64) -> i32 {
        (meters / self.meters_per_cell).floor() as i32
    }

    /// World coordinate of a cell component.
    pub fn cell_to_meters(&self, cell: i32) -> f64 {
        f64::from(cell) * self.meters_per_cell
    }
}
