//! The build session: owns every piece of mutable state for one build
//! and sequences the phases.
//!
//! A build is one uninterrupted, single-threaded computation. Re-running
//! a build means constructing a fresh session; nothing is shared between
//! sessions.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cell::{Cell, CellRect, Direction};
use crate::connect::connect_room;
use crate::convert::CellUnitConverter;
use crate::directive::{DoorDirective, FloorDirective, RoomDirective, SpawnKinds, WallDirective};
use crate::error::BuildError;
use crate::field::DistanceField;
use crate::rng::BuildRng;
use crate::room::{PlacedRoom, RoomSpec};
use crate::search::find_placement;
use crate::walls::{derive_door_states, derive_walls};

/// Build configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Field width in cells.
    pub width: i32,
    /// Field height in cells.
    pub height: i32,
    /// Rooms to place. Below 1 the build is a recognized no-op.
    pub rooms: i32,
    /// World units per cell. Must be positive.
    pub cell_unit: f64,
    /// Explicit seed for a reproducible build; `None` draws a fresh one.
    pub seed: Option<u64>,
    /// Direction draws allowed per room before the build gives up.
    pub max_placement_attempts: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            rooms: 8,
            cell_unit: 2.0,
            seed: None,
            max_placement_attempts: 64,
        }
    }
}

impl BuildConfig {
    fn validate(&self) -> Result<(), BuildError> {
        if self.cell_unit <= 0.0 {
            return Err(BuildError::InvalidCellUnit(self.cell_unit));
        }
        if self.width < 1 || self.height < 1 {
            return Err(BuildError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Orchestrator phases. Strictly sequential; only `PlacingRooms` loops
/// internally (search, connect, reseed) until the quota is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    Idle,
    Seeding,
    PlacingFirstRoom,
    PlacingRooms { remaining: i32 },
    DerivingDoors,
    DerivingWalls,
    Done,
}

/// The finished structure: every placement directive plus the read-only
/// field it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Labyrinth<K> {
    pub rooms: Vec<RoomDirective>,
    pub doors: Vec<DoorDirective<K>>,
    pub floors: Vec<FloorDirective<K>>,
    pub walls: Vec<WallDirective<K>>,
    pub field: DistanceField,
    /// Seed the build ran with; replaying it reproduces the structure.
    pub seed: u64,
}

/// One build, from configuration to directives.
#[derive(Debug)]
pub struct BuildSession<K> {
    config: BuildConfig,
    spec: RoomSpec,
    kinds: SpawnKinds<K>,
    converter: CellUnitConverter,
    rng: BuildRng,
    field: DistanceField,
    placed: Vec<PlacedRoom>,
    phase: BuildPhase,
    rooms: Vec<RoomDirective>,
    floors: Vec<FloorDirective<K>>,
}

impl<K: Clone> BuildSession<K> {
    /// Validate the configuration and set up a fresh session.
    pub fn new(
        config: BuildConfig,
        spec: RoomSpec,
        kinds: SpawnKinds<K>,
    ) -> Result<Self, BuildError> {
        config.validate()?;
        let converter = CellUnitConverter::new(config.cell_unit);
        let field = DistanceField::new(config.width, config.height);
        let rng = match config.seed {
            Some(seed) => BuildRng::new(seed),
            None => BuildRng::from_entropy(),
        };
        Ok(Self {
            config,
            spec,
            kinds,
            converter,
            rng,
            field,
            placed: Vec::new(),
            phase: BuildPhase::Idle,
            rooms: Vec::new(),
            floors: Vec::new(),
        })
    }

    /// Current orchestrator phase.
    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// Run the build to completion.
    pub fn build(mut self) -> Result<Labyrinth<K>, BuildError> {
        if self.config.rooms < 1 {
            info!(rooms = self.config.rooms, "degenerate room count, nothing to build");
            self.phase = BuildPhase::Done;
            return Ok(self.finish(Vec::new(), Vec::new()));
        }

        self.phase = BuildPhase::Seeding;
        info!(
            seed = self.rng.seed(),
            explicit = self.config.seed.is_some(),
            "seeded build random stream"
        );

        self.phase = BuildPhase::PlacingFirstRoom;
        let (size_x, size_y) = self.spec.footprint(&self.converter);
        if size_x < 1 || size_y < 1 || size_x > self.config.width || size_y > self.config.height {
            return Err(BuildError::FootprintTooLarge {
                size_x,
                size_y,
                width: self.config.width,
                height: self.config.height,
            });
        }

        // First room sits centered on the grid; no connection to make.
        let first = Cell::new(
            (self.config.width - size_x) / 2,
            (self.config.height - size_y) / 2,
        );
        self.place_room(first, size_x, size_y);
        self.seed_room_doors(first);
        self.field.propagate();

        // Remaining rooms search outward from the grid center, connect to
        // the structure, then reseed and re-propagate the field.
        let anchor = Cell::new(self.config.width / 2, self.config.height / 2);
        let mut remaining = self.config.rooms - 1;
        while remaining > 0 {
            self.phase = BuildPhase::PlacingRooms { remaining };

            let cell = self.search_placement(anchor, size_x, size_y)?;
            self.place_room(cell, size_x, size_y);

            let carved = connect_room(&mut self.field, &self.converter, cell, &self.spec)?;
            for hall in carved {
                self.floors.push(FloorDirective {
                    kind: self.kinds.hall_floor.clone(),
                    cell: hall,
                    facing: Direction::East,
                });
            }

            self.seed_room_doors(cell);
            self.field.propagate();
            remaining -= 1;
        }

        self.phase = BuildPhase::DerivingDoors;
        let doors = derive_door_states(
            &self.field,
            &self.converter,
            &self.placed,
            &self.spec,
            &self.kinds,
        );

        self.phase = BuildPhase::DerivingWalls;
        let walls = derive_walls(&self.field, &self.converter, &self.kinds);

        self.phase = BuildPhase::Done;
        debug!("finished build\n{}", self.field);
        Ok(self.finish(doors, walls))
    }

    fn finish(
        self,
        doors: Vec<DoorDirective<K>>,
        walls: Vec<WallDirective<K>>,
    ) -> Labyrinth<K> {
        Labyrinth {
            rooms: self.rooms,
            doors,
            floors: self.floors,
            walls,
            field: self.field,
            seed: self.rng.seed(),
        }
    }

    fn place_room(&mut self, cell: Cell, size_x: i32, size_y: i32) {
        self.field.mark_room(CellRect::new(cell, size_x, size_y));
        self.placed.push(PlacedRoom { cell });
        self.rooms.push(RoomDirective {
            cell,
            facing: Direction::East,
        });
    }

    fn seed_room_doors(&mut self, cell: Cell) {
        let field = &mut self.field;
        let converter = &self.converter;
        for door in &self.spec.doors {
            field.mark_potential_door(door.outside_cell(cell, converter));
        }
    }

    /// Draw directions until one yields a valid footprint position, up to
    /// the configured attempt budget.
    fn search_placement(
        &mut self,
        anchor: Cell,
        size_x: i32,
        size_y: i32,
    ) -> Result<Cell, BuildError> {
        for _ in 0..self.config.max_placement_attempts {
            let direction = self.rng.random_direction();
            if let Some(cell) = find_placement(
                &self.field,
                &self.converter,
                anchor,
                size_x,
                size_y,
                direction,
            ) {
                return Ok(cell);
            }
            debug!(
                dx = direction.x,
                dy = direction.y,
                "no space along search path, drawing a new direction"
            );
        }
        Err(BuildError::PlacementExhausted {
            room_index: self.placed.len(),
            attempts: self.config.max_placement_attempts,
        })
    }
}
