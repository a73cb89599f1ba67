//! Grid cells, traversal directions and cell rectangles.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One discrete grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a cell coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step in `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The cell offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The four axis-aligned traversal directions.
///
/// [`Direction::TRAVERSAL`] order is significant: field propagation,
/// descent tie-breaking and the wall pass all visit neighbors in
/// west, east, north, south order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    /// −X
    West,
    /// +X
    East,
    /// −Y
    North,
    /// +Y
    South,
}

impl Direction {
    /// Fixed neighbor-visit order.
    pub const TRAVERSAL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Unit cell offset of this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }

    /// Offset, in whole cells, applied to a wall segment so it sits on the
    /// boundary between a hallway cell and the open neighbor it faces.
    /// A wall anchored at its +X edge needs no correction.
    pub const fn wall_offset_cells(self) -> (i32, i32) {
        match self {
            Direction::East => (0, 0),
            Direction::West => (-1, -1),
            Direction::North => (-1, 0),
            Direction::South => (0, -1),
        }
    }
}

/// An axis-aligned rectangle of cells, addressed by its minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    /// Minimum-corner cell.
    pub min: Cell,
    /// Width in cells.
    pub size_x: i32,
    /// Height in cells.
    pub size_y: i32,
}

impl CellRect {
    /// Create a rectangle from its minimum corner and cell dimensions.
    pub const fn new(min: Cell, size_x: i32, size_y: i32) -> Self {
        Self { min, size_x, size_y }
    }

    /// Maximum-corner cell (inclusive).
    pub const fn max(self) -> Cell {
        self.min.offset(self.size_x - 1, self.size_y - 1)
    }

    /// Whether `cell` lies inside the rectangle.
    pub const fn contains(self, cell: Cell) -> bool {
        cell.x >= self.min.x
            && cell.y >= self.min.y
            && cell.x <= self.max().x
            && cell.y <= self.max().y
    }

    /// Whether two rectangles share any cell.
    pub const fn intersects(self, other: CellRect) -> bool {
        !(self.max().x < other.min.x
            || self.min.x > other.max().x
            || self.max().y < other.min.y
            || self.min.y > other.max().y)
    }

    /// Iterate the rectangle's cells row-major (y outer, x inner).
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.size_y).flat_map(move |y| (0..self.size_x).map(move |x| self.min.offset(x, y)))
    }
}
