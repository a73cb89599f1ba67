//! Randomized room-placement search.
//!
//! The continuous ray-stepping math and the discrete footprint validity
//! scan are kept separate so each is testable on its own.

use glam::DVec2;
use tracing::trace;

use crate::cell::Cell;
use crate::convert::CellUnitConverter;
use crate::field::{DistanceField, FieldCell};

/// Advance a continuous search position to the next grid-line crossing
/// along `direction`.
///
/// Solves the line through `position` for the two candidate intercepts —
/// x advanced one cell boundary, y advanced one cell boundary — and takes
/// whichever lies closer. A zero direction component degenerates to a
/// pure step along the other axis, guarding the slope division.
pub fn next_search_position(position: DVec2, direction: DVec2, cell_size: f64) -> DVec2 {
    let next_x = if direction.x > 0.0 {
        position.x + cell_size
    } else {
        position.x - cell_size
    };
    let next_y = if direction.y > 0.0 {
        position.y + cell_size
    } else {
        position.y - cell_size
    };

    if direction.x == 0.0 {
        return DVec2::new(position.x, next_y);
    }
    if direction.y == 0.0 {
        return DVec2::new(next_x, position.y);
    }

    // y = mx + b through the current position
    let slope = direction.y / direction.x;
    let y_intercept = position.y - slope * position.x;
    let at_next_x = DVec2::new(next_x, slope * next_x + y_intercept);
    let at_next_y = DVec2::new((next_y - y_intercept) / slope, next_y);

    if position.distance_squared(at_next_x) < position.distance_squared(at_next_y) {
        at_next_x
    } else {
        at_next_y
    }
}

/// Whether a `size_x × size_y` footprint anchored at `cell` lies entirely
/// within the field.
pub fn footprint_in_field(field: &DistanceField, cell: Cell, size_x: i32, size_y: i32) -> bool {
    field.contains(cell) && field.contains(cell.offset(size_x - 1, size_y - 1))
}

/// Scan the footprint row-major for the first cell a room may not occupy
/// (a room cell, or anything at or below distance zero). The footprint is
/// assumed in bounds.
fn first_blocked_cell(
    field: &DistanceField,
    cell: Cell,
    size_x: i32,
    size_y: i32,
) -> Option<Cell> {
    for y in 0..size_y {
        for x in 0..size_x {
            let probe = cell.offset(x, y);
            if field.get(probe).is_some_and(FieldCell::blocks_room) {
                return Some(probe);
            }
        }
    }
    None
}

/// Walk a ray from `anchor` along `direction` looking for a free
/// footprint-sized region.
///
/// Each blocked candidate advances the position by exactly one grid-line
/// crossing. Returns the accepted minimum-corner cell, or `None` once the
/// footprint leaves the field — the search along this direction is
/// exhausted and the caller draws a new one.
pub fn find_placement(
    field: &DistanceField,
    converter: &CellUnitConverter,
    anchor: Cell,
    size_x: i32,
    size_y: i32,
    direction: DVec2,
) -> Option<Cell> {
    let mut position = DVec2::new(
        converter.cell_to_meters(anchor.x),
        converter.cell_to_meters(anchor.y),
    );
    let mut candidate = anchor;

    while footprint_in_field(field, candidate, size_x, size_y) {
        match first_blocked_cell(field, candidate, size_x, size_y) {
            None => return Some(candidate),
            Some(blocked) => {
                trace!(
                    x = blocked.x,
                    y = blocked.y,
                    "footprint blocked, advancing along ray"
                );
                position = next_search_position(position, direction, converter.cell_size());
                candidate = Cell::new(
                    converter.meters_to_cell_floor(position.x),
                    converter.meters_to_cell_floor(position.y),
                );
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellRect;

    #[test]
    fn test_step_pure_horizontal() {
        let next = next_search_position(DVec2::new(4.0, 4.0), DVec2::new(1.0, 0.0), 2.0);
        assert_eq!(next, DVec2::new(6.0, 4.0));
        let next = next_search_position(DVec2::new(4.0, 4.0), DVec2::new(-0.5, 0.0), 2.0);
        assert_eq!(next, DVec2::new(2.0, 4.0));
    }

    #[test]
    fn test_step_pure_vertical() {
        let next = next_search_position(DVec2::new(4.0, 4.0), DVec2::new(0.0, 1.0), 2.0);
        assert_eq!(next, DVec2::new(4.0, 6.0));
        let next = next_search_position(DVec2::new(4.0, 4.0), DVec2::new(0.0, -0.25), 2.0);
        assert_eq!(next, DVec2::new(4.0, 2.0));
    }

    #[test]
    fn test_step_diagonal_exact() {
        // Slope 1: both intercepts coincide, the y-advanced candidate wins
        // the tie and lands one cell diagonally.
        let next = next_search_position(DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0), 1.0);
        assert_eq!(next, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_step_shallow_ray_crosses_x_first() {
        // Mostly-horizontal ray: the next x grid line is closer than the
        // next y grid line.
        let next = next_search_position(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.25), 1.0);
        assert!((next.x - 1.0).abs() < 1e-9);
        assert!((next.y - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_step_always_advances() {
        let mut position = DVec2::new(10.0, 10.0);
        let direction = DVec2::new(-0.7, 0.3);
        for _ in 0..50 {
            let next = next_search_position(position, direction, 1.0);
            assert!(position.distance_squared(next) > 0.0);
            position = next;
        }
        // 50 boundary crossings move the position well away
        assert!(position.x < 10.0);
    }

    #[test]
    fn test_footprint_in_field() {
        let field = DistanceField::new(10, 10);
        assert!(footprint_in_field(&field, Cell::new(0, 0), 3, 3));
        assert!(footprint_in_field(&field, Cell::new(7, 7), 3, 3));
        assert!(!footprint_in_field(&field, Cell::new(8, 7), 3, 3));
        assert!(!footprint_in_field(&field, Cell::new(-1, 0), 3, 3));
    }

    #[test]
    fn test_find_placement_skips_occupied_center() {
        let converter = CellUnitConverter::new(1.0);
        let mut field = DistanceField::new(20, 20);
        field.mark_room(CellRect::new(Cell::new(8, 8), 4, 4));

        let anchor = Cell::new(10, 10);
        let placed = find_placement(&field, &converter, anchor, 3, 3, DVec2::new(1.0, 0.0))
            .expect("open space east of the room");
        // Free footprint, past the occupied block
        assert!(placed.x >= 12);
        for y in 0..3 {
            for x in 0..3 {
                let probe = placed.offset(x, y);
                assert_eq!(field.get(probe), Some(FieldCell::Uncalculated));
            }
        }
    }

    #[test]
    fn test_find_placement_exhausts_at_edge() {
        let converter = CellUnitConverter::new(1.0);
        let mut field = DistanceField::new(8, 8);
        // Everything east of the anchor is roomed
        field.mark_room(CellRect::new(Cell::new(4, 0), 4, 8));

        let placed = find_placement(
            &field,
            &converter,
            Cell::new(4, 4),
            3,
            3,
            DVec2::new(1.0, 0.0),
        );
        assert_eq!(placed, None);
    }
}
