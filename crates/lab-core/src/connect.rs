//! Path connector: ties a newly placed room into the existing structure
//! by descending the distance field from its nearest door.

use tracing::debug;

use crate::cell::{Cell, Direction};
use crate::convert::CellUnitConverter;
use crate::error::BuildError;
use crate::field::{DistanceField, FieldCell};
use crate::room::RoomSpec;

/// Pick the door whose outside cell currently holds the smallest field
/// value. Doors resolving out of bounds are skipped; ties keep the first
/// door in template order.
pub fn nearest_door_cell(
    field: &DistanceField,
    converter: &CellUnitConverter,
    room_cell: Cell,
    spec: &RoomSpec,
) -> Option<Cell> {
    let mut best: Option<(Cell, i64)> = None;
    for door in &spec.doors {
        let cell = door.outside_cell(room_cell, converter);
        let Some(value) = field.get(cell) else {
            continue;
        };
        if best.is_none_or(|(_, key)| value.key() < key) {
            best = Some((cell, value.key()));
        }
    }
    best.map(|(cell, _)| cell)
}

/// Greedily descend the field from `start` until a cell at or below
/// distance zero, recording every visited cell.
///
/// Each step must strictly decrease the field value (neighbor ties break
/// in traversal order). A step with no strictly smaller in-bounds
/// neighbor means the field was not propagated after its last mutation
/// and is reported as [`BuildError::NoDescent`].
pub fn descend_to_structure(field: &DistanceField, start: Cell) -> Result<Vec<Cell>, BuildError> {
    let mut current = start;
    let mut path = vec![current];

    loop {
        let value = field.get(current).ok_or(BuildError::NoDescent {
            x: current.x,
            y: current.y,
        })?;
        if value.key() <= 0 {
            break;
        }

        let mut best: Option<(Cell, i64)> = None;
        for direction in Direction::TRAVERSAL {
            let neighbor = current.step(direction);
            let Some(neighbor_value) = field.get(neighbor) else {
                continue;
            };
            if best.is_none_or(|(_, key)| neighbor_value.key() < key) {
                best = Some((neighbor, neighbor_value.key()));
            }
        }

        match best {
            Some((next, key)) if key < value.key() => {
                current = next;
                path.push(current);
            }
            _ => {
                return Err(BuildError::NoDescent {
                    x: current.x,
                    y: current.y,
                });
            }
        }
    }

    Ok(path)
}

/// Connect a room: choose its nearest door, descend to the structure and
/// carve every path cell not already hallway. Returns the newly carved
/// cells in path order (the caller emits floor directives for them).
/// A room with no in-bounds doors connects nothing.
pub fn connect_room(
    field: &mut DistanceField,
    converter: &CellUnitConverter,
    room_cell: Cell,
    spec: &RoomSpec,
) -> Result<Vec<Cell>, BuildError> {
    let Some(start) = nearest_door_cell(field, converter, room_cell, spec) else {
        debug!(
            x = room_cell.x,
            y = room_cell.y,
            "room has no door inside the field, skipping connection"
        );
        return Ok(Vec::new());
    };

    let path = descend_to_structure(field, start)?;

    let mut carved = Vec::new();
    for cell in path {
        if !matches!(field.get(cell), Some(FieldCell::Hall)) {
            field.mark_hallway(cell);
            carved.push(cell);
        }
    }
    Ok(carved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellRect;
    use crate::room::Door;
    use glam::DVec2;

    fn three_by_three_spec() -> RoomSpec {
        RoomSpec {
            size_x: 3.0,
            size_y: 3.0,
            doors: vec![
                Door {
                    position: DVec2::new(0.0, 1.5),
                    forward: DVec2::new(-1.0, 0.0),
                },
                Door {
                    position: DVec2::new(3.0, 1.5),
                    forward: DVec2::new(1.0, 0.0),
                },
            ],
        }
    }

    #[test]
    fn test_nearest_door_prefers_lower_distance() {
        let converter = CellUnitConverter::new(1.0);
        let mut field = DistanceField::new(20, 20);
        // Existing structure: a seed west of where the room will sit
        field.mark_potential_door(Cell::new(2, 11));
        field.propagate();

        let spec = three_by_three_spec();
        let room_cell = Cell::new(10, 10);
        // West door cell (9, 11) is closer to the seed than east (13, 11)
        assert_eq!(
            nearest_door_cell(&field, &converter, room_cell, &spec),
            Some(Cell::new(9, 11))
        );
    }

    #[test]
    fn test_no_doors_no_connection() {
        let converter = CellUnitConverter::new(1.0);
        let mut field = DistanceField::new(10, 10);
        let spec = RoomSpec {
            size_x: 3.0,
            size_y: 3.0,
            doors: Vec::new(),
        };
        let carved = connect_room(&mut field, &converter, Cell::new(3, 3), &spec).unwrap();
        assert!(carved.is_empty());
    }

    #[test]
    fn test_descend_reaches_seed() {
        let mut field = DistanceField::new(10, 1);
        field.mark_potential_door(Cell::new(0, 0));
        field.propagate();

        let path = descend_to_structure(&field, Cell::new(7, 0)).unwrap();
        assert_eq!(path.first(), Some(&Cell::new(7, 0)));
        assert_eq!(path.last(), Some(&Cell::new(0, 0)));
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn test_descent_on_unpropagated_field_is_error() {
        let field = DistanceField::new(10, 10);
        // Everything uncalculated: no strict descent exists anywhere
        let result = descend_to_structure(&field, Cell::new(5, 5));
        assert_eq!(result, Err(BuildError::NoDescent { x: 5, y: 5 }));
    }

    #[test]
    fn test_connect_carves_halls_and_skips_existing() {
        let converter = CellUnitConverter::new(1.0);
        let mut field = DistanceField::new(20, 20);

        // Existing structure seeded at (2, 11); room at (10, 10)
        field.mark_potential_door(Cell::new(2, 11));
        field.propagate();
        field.mark_room(CellRect::new(Cell::new(10, 10), 3, 3));

        let spec = three_by_three_spec();
        let carved = connect_room(&mut field, &converter, Cell::new(10, 10), &spec).unwrap();

        // Straight shot west along y = 11: cells (9,11) down to (2,11)
        assert_eq!(carved.len(), 8);
        for cell in &carved {
            assert_eq!(field.get(*cell), Some(FieldCell::Hall));
        }

        // Connecting again carves nothing new: the whole path is hall now
        let again = connect_room(&mut field, &converter, Cell::new(10, 10), &spec).unwrap();
        assert!(again.is_empty());
    }
}
