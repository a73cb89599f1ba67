//! Room templates, doors and placed rooms.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellRect};
use crate::convert::CellUnitConverter;

/// A doorway on a room template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// World-space spawn position of the door prefab, local to the room's
    /// minimum corner.
    pub position: DVec2,
    /// Points out of the room.
    pub forward: DVec2,
}

impl Door {
    /// The grid cell just outside this door: the position nudged half a
    /// cell along `forward` (which also absorbs float imprecision), then
    /// floored into the grid relative to the room's cell.
    pub fn outside_cell(&self, room_cell: Cell, converter: &CellUnitConverter) -> Cell {
        let nudged = self.position + self.forward * (converter.cell_size() * 0.5);
        Cell::new(
            room_cell.x + converter.meters_to_cell_floor(nudged.x),
            room_cell.y + converter.meters_to_cell_floor(nudged.y),
        )
    }
}

/// A room template: world-unit footprint dimensions plus the ordered door
/// list. Provided by the caller, read-only during a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Footprint width in world units.
    pub size_x: f64,
    /// Footprint depth in world units.
    pub size_y: f64,
    /// Doors in caller order; ties in door selection keep the first.
    pub doors: Vec<Door>,
}

impl RoomSpec {
    /// Footprint size in cells (rounded).
    pub fn footprint(&self, converter: &CellUnitConverter) -> (i32, i32) {
        (
            converter.meters_to_cell_round(self.size_x),
            converter.meters_to_cell_round(self.size_y),
        )
    }
}

/// A successfully placed room: the template bound to its minimum-corner
/// cell. One per placed room, owned by the build session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRoom {
    /// Minimum-corner cell of the footprint.
    pub cell: Cell,
}

impl PlacedRoom {
    /// The cell rectangle this room occupies.
    pub fn footprint_rect(&self, spec: &RoomSpec, converter: &CellUnitConverter) -> CellRect {
        let (size_x, size_y) = spec.footprint(converter);
        CellRect::new(self.cell, size_x, size_y)
    }
}
