//! Placement directives handed to the host, and the opaque spawnable
//! handles they carry.
//!
//! The core never inspects a handle; it only clones the right one into
//! each directive. Turning directives into rendered or simulated content
//! is entirely the host's concern.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Direction};

/// The host-supplied spawnable handles, one per directive kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnKinds<K> {
    pub open_door: K,
    pub closed_door: K,
    pub hall_floor: K,
    pub hall_wall: K,
}

/// Place one instance of the room template with its minimum corner at
/// `cell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDirective {
    pub cell: Cell,
    /// Orientation of the placed template. Rooms are never rotated, so
    /// this is always [`Direction::East`].
    pub facing: Direction,
}

/// Spawn a door prefab at a world-space transform, open or closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorDirective<K> {
    pub kind: K,
    /// Absolute world-space spawn position.
    pub position: DVec2,
    /// The door's outward-facing direction.
    pub forward: DVec2,
    pub open: bool,
}

/// Spawn a hallway floor/ceiling segment at `cell`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorDirective<K> {
    pub kind: K,
    pub cell: Cell,
    /// Segment orientation; floor prefabs are axis-aligned and unrotated.
    pub facing: Direction,
}

/// Spawn a hallway wall on the boundary between `cell` and its `facing`
/// neighbor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallDirective<K> {
    pub kind: K,
    pub cell: Cell,
    /// Direction from the hallway cell toward the open neighbor.
    pub facing: Direction,
    /// World-space correction applied to the wall anchor for this facing.
    pub offset: DVec2,
}
