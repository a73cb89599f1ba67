//! The distance field: a grid of tagged cells plus the zero-distance seed
//! set, with multi-source breadth-first propagation.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellRect, Direction};

/// One distance-field cell.
///
/// A tagged replacement for the sentinel-integer encoding, so blocked and
/// carved cells cannot be confused with legitimate large distances. The
/// comparison key reproduces the sentinel order:
/// `Hall < Distance(d) < Uncalculated < Room`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldCell {
    /// Not yet reached by propagation.
    Uncalculated,
    /// Permanently impassable, covered by a room footprint.
    Room,
    /// Confirmed hallway. Treated as distance 0 when relaxing neighbors.
    Hall,
    /// A propagated path distance. `Distance(0)` is a potential-door seed.
    Distance(i32),
}

impl FieldCell {
    /// Comparison key matching the sentinel-integer encoding: hall is the
    /// minimum representable value, uncalculated one below the room
    /// maximum.
    pub(crate) const fn key(self) -> i64 {
        match self {
            FieldCell::Hall => i32::MIN as i64,
            FieldCell::Distance(d) => d as i64,
            FieldCell::Uncalculated => i32::MAX as i64 - 1,
            FieldCell::Room => i32::MAX as i64,
        }
    }

    /// Whether this cell is occupied by a room footprint.
    pub const fn is_room(self) -> bool {
        matches!(self, FieldCell::Room)
    }

    /// Whether this cell is confirmed hallway.
    pub const fn is_hall(self) -> bool {
        matches!(self, FieldCell::Hall)
    }

    /// Whether a room footprint may not occupy this cell: room cells, and
    /// anything at or below distance zero (carved halls and door seeds).
    pub(crate) const fn blocks_room(self) -> bool {
        self.is_room() || self.key() <= 0
    }

    /// Distance used when relaxing neighbors: carved and seeded cells
    /// count as zero, stored distances as themselves.
    const fn effective_distance(self) -> i32 {
        match self {
            FieldCell::Hall => 0,
            FieldCell::Distance(d) => {
                if d < 0 {
                    0
                } else {
                    d
                }
            }
            FieldCell::Uncalculated | FieldCell::Room => 0,
        }
    }
}

/// A `width × height` grid of [`FieldCell`]s (row-major) plus the
/// insertion-ordered set of zero-distance seed cells.
///
/// Owned by one build session; mutated throughout the build, read-only
/// once it completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceField {
    width: i32,
    height: i32,
    cells: Vec<FieldCell>,
    /// Cells propagation starts from: door seeds and carved halls.
    /// Insertion order is kept; the wall pass iterates it.
    seeds: Vec<Cell>,
}

impl DistanceField {
    /// Create a field with every cell uncalculated.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![FieldCell::Uncalculated; (width * height) as usize],
            seeds: Vec::new(),
        }
    }

    /// Field width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bounds check: `0 ≤ x < width` and `0 ≤ y < height`.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.y * self.width + cell.x) as usize
    }

    fn cell_at(&self, cell: Cell) -> FieldCell {
        self.cells[self.index(cell)]
    }

    /// The value at `cell`, or `None` out of bounds.
    pub fn get(&self, cell: Cell) -> Option<FieldCell> {
        self.contains(cell).then(|| self.cell_at(cell))
    }

    fn set(&mut self, cell: Cell, value: FieldCell) {
        let idx = self.index(cell);
        self.cells[idx] = value;
    }

    /// The seed set in insertion order.
    pub fn seed_cells(&self) -> &[Cell] {
        &self.seeds
    }

    /// Seed cells currently carved as hallway, in insertion order.
    pub fn hall_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.seeds
            .iter()
            .copied()
            .filter(|&c| self.cell_at(c).is_hall())
    }

    /// Mark a room footprint as permanently impassable. Overwrites any
    /// prior value; cells outside the field are ignored.
    pub fn mark_room(&mut self, region: CellRect) {
        for cell in region.cells() {
            if self.contains(cell) {
                self.set(cell, FieldCell::Room);
            }
        }
    }

    /// Seed a potential-door cell just outside a room: set to distance 0
    /// and remember it as a propagation source. A no-op for cells out of
    /// bounds, covered by a room, or already seeded (a carved hall keeps
    /// its value). Returns whether the cell was newly seeded.
    pub fn mark_potential_door(&mut self, cell: Cell) -> bool {
        if !self.contains(cell) || self.cell_at(cell).is_room() || self.seeds.contains(&cell) {
            return false;
        }
        self.set(cell, FieldCell::Distance(0));
        self.seeds.push(cell);
        true
    }

    /// Carve a hallway cell. Hall overrides a potential-door value; the
    /// cell joins the seed set if absent.
    pub fn mark_hallway(&mut self, cell: Cell) {
        debug_assert!(self.contains(cell));
        self.set(cell, FieldCell::Hall);
        if !self.seeds.contains(&cell) {
            self.seeds.push(cell);
        }
    }

    /// Multi-source breadth-first relaxation from the seed set.
    ///
    /// Dequeued cells relax each in-bounds, non-room neighbor whose value
    /// is strictly greater than their effective distance plus one. Room
    /// cells are never overwritten; non-room values only ever decrease, so
    /// a second call with an unchanged seed set leaves the field as is.
    pub fn propagate(&mut self) {
        let mut queue: VecDeque<Cell> = self.seeds.iter().copied().collect();

        while let Some(current) = queue.pop_front() {
            let distance = self.cell_at(current).effective_distance();

            for direction in Direction::TRAVERSAL {
                let neighbor = current.step(direction);
                if !self.contains(neighbor) {
                    continue;
                }
                let value = self.cell_at(neighbor);
                if value.is_room() {
                    continue;
                }
                if value.key() > i64::from(distance) + 1 {
                    self.set(neighbor, FieldCell::Distance(distance + 1));
                    queue.push_back(neighbor);
                }
            }
        }
    }
}

/// Textual dump of the field, one row per line with sentinel cells shown
/// as `room`, `....` and `hall`, grouped every five columns.
impl fmt::Display for DistanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distance field:")?;
        for y in 0..self.height {
            write!(f, "{y:02}")?;
            for x in 0..self.width {
                if x % 5 == 0 {
                    write!(f, " | ")?;
                }
                match self.cell_at(Cell::new(x, y)) {
                    FieldCell::Room => write!(f, "room  ")?,
                    FieldCell::Uncalculated => write!(f, "....  ")?,
                    FieldCell::Hall => write!(f, "hall  ")?,
                    FieldCell::Distance(d) => write!(f, " {d:02}   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
