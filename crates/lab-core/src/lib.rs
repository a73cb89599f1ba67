//! lab-core: procedural grid labyrinth generation.
//!
//! Places a configured number of non-overlapping rectangular rooms in a
//! bounded cell grid, connects each new room to the already-built
//! structure along a multi-source distance field, and derives door
//! openness and hallway walls from local cell adjacency.
//!
//! Pure logic with no I/O: the build emits placement directives (rooms,
//! doors, hallway floors, hallway walls) carrying opaque host handles;
//! the host turns them into rendered or simulated content.

pub mod cell;
pub mod connect;
pub mod convert;
pub mod directive;
pub mod error;
pub mod field;
pub mod room;
pub mod search;
pub mod session;
pub mod walls;

mod rng;

pub use cell::{Cell, CellRect, Direction};
pub use convert::CellUnitConverter;
pub use directive::{DoorDirective, FloorDirective, RoomDirective, SpawnKinds, WallDirective};
pub use error::BuildError;
pub use field::{DistanceField, FieldCell};
pub use rng::BuildRng;
pub use room::{Door, PlacedRoom, RoomSpec};
pub use session::{BuildConfig, BuildPhase, BuildSession, Labyrinth};
