//! Post-passes over the finished field: doorway openness and hallway
//! wall derivation.

use glam::DVec2;
use tracing::debug;

use crate::cell::Direction;
use crate::convert::CellUnitConverter;
use crate::directive::{DoorDirective, SpawnKinds, WallDirective};
use crate::field::DistanceField;
use crate::room::{PlacedRoom, RoomSpec};

/// Emit a door-state directive for every door of every placed room: open
/// when the cell outside the door was carved as hallway, closed
/// otherwise. Doors resolving outside the field are skipped.
pub fn derive_door_states<K: Clone>(
    field: &DistanceField,
    converter: &CellUnitConverter,
    rooms: &[PlacedRoom],
    spec: &RoomSpec,
    kinds: &SpawnKinds<K>,
) -> Vec<DoorDirective<K>> {
    let mut directives = Vec::new();

    for room in rooms {
        let room_origin = DVec2::new(
            converter.cell_to_meters(room.cell.x),
            converter.cell_to_meters(room.cell.y),
        );

        for door in &spec.doors {
            let outside = door.outside_cell(room.cell, converter);
            let Some(value) = field.get(outside) else {
                debug!(
                    x = outside.x,
                    y = outside.y,
                    "door resolves outside the field, skipping"
                );
                continue;
            };

            let open = value.is_hall();
            directives.push(DoorDirective {
                kind: if open {
                    kinds.open_door.clone()
                } else {
                    kinds.closed_door.clone()
                },
                position: room_origin + door.position,
                forward: door.forward,
                open,
            });
        }
    }

    directives
}

/// For every hallway cell, every in-bounds neighbor that is neither hall
/// nor room gets a wall directive facing that neighbor, offset so the
/// wall sits on the shared cell boundary.
pub fn derive_walls<K: Clone>(
    field: &DistanceField,
    converter: &CellUnitConverter,
    kinds: &SpawnKinds<K>,
) -> Vec<WallDirective<K>> {
    let mut directives = Vec::new();

    for hall in field.hall_cells() {
        for direction in Direction::TRAVERSAL {
            let neighbor = hall.step(direction);
            let Some(value) = field.get(neighbor) else {
                continue;
            };
            if value.is_hall() || value.is_room() {
                continue;
            }

            let (dx, dy) = direction.wall_offset_cells();
            directives.push(WallDirective {
                kind: kinds.hall_wall.clone(),
                cell: hall,
                facing: direction,
                offset: DVec2::new(converter.cell_to_meters(dx), converter.cell_to_meters(dy)),
            });
        }
    }

    directives
}
