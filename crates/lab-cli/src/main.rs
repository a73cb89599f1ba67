//! Command-line labyrinth generator.
//!
//! Runs one build session with a square four-door room template and
//! prints the resulting cell map plus a directive summary.

use clap::Parser;
use glam::DVec2;
use lab_core::{
    BuildConfig, BuildError, BuildSession, Cell, Door, FieldCell, Labyrinth, RoomSpec, SpawnKinds,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "labgen", about = "Generate a grid labyrinth and print it")]
struct Args {
    /// Field width in cells
    #[arg(long, default_value_t = 40)]
    width: i32,

    /// Field height in cells
    #[arg(long, default_value_t = 40)]
    height: i32,

    /// Number of rooms to place
    #[arg(long, default_value_t = 8)]
    rooms: i32,

    /// World units per cell
    #[arg(long, default_value_t = 2.0)]
    cell_unit: f64,

    /// Seed for a reproducible build (fresh entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Direction draws allowed per room before giving up
    #[arg(long, default_value_t = 64)]
    attempts: u32,

    /// Also dump the raw distance field
    #[arg(long)]
    field: bool,
}

/// Square room spanning three cells per side with a centered door on
/// each face.
fn demo_room(cell_unit: f64) -> RoomSpec {
    let side = cell_unit * 3.0;
    let mid = side / 2.0;
    RoomSpec {
        size_x: side,
        size_y: side,
        doors: vec![
            Door {
                position: DVec2::new(0.0, mid),
                forward: DVec2::new(-1.0, 0.0),
            },
            Door {
                position: DVec2::new(side, mid),
                forward: DVec2::new(1.0, 0.0),
            },
            Door {
                position: DVec2::new(mid, 0.0),
                forward: DVec2::new(0.0, -1.0),
            },
            Door {
                position: DVec2::new(mid, side),
                forward: DVec2::new(0.0, 1.0),
            },
        ],
    }
}

fn render_map(labyrinth: &Labyrinth<&'static str>) -> String {
    let field = &labyrinth.field;
    let mut out = String::with_capacity((field.width() as usize + 1) * field.height() as usize);
    for y in 0..field.height() {
        for x in 0..field.width() {
            let glyph = match field.get(Cell::new(x, y)) {
                Some(FieldCell::Room) => '.',
                Some(FieldCell::Hall) => '#',
                Some(FieldCell::Distance(0)) => '+',
                _ => ' ',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn run(args: Args) -> Result<(), BuildError> {
    let config = BuildConfig {
        width: args.width,
        height: args.height,
        rooms: args.rooms,
        cell_unit: args.cell_unit,
        seed: args.seed,
        max_placement_attempts: args.attempts,
    };
    let kinds = SpawnKinds {
        open_door: "door_open",
        closed_door: "door_closed",
        hall_floor: "hall_floor",
        hall_wall: "hall_wall",
    };

    let session = BuildSession::new(config, demo_room(args.cell_unit), kinds)?;
    let labyrinth = session.build()?;

    print!("{}", render_map(&labyrinth));
    if args.field {
        println!("{}", labyrinth.field);
    }
    println!(
        "seed {} | {} rooms, {} doors ({} open), {} hall floors, {} walls",
        labyrinth.seed,
        labyrinth.rooms.len(),
        labyrinth.doors.len(),
        labyrinth.doors.iter().filter(|d| d.open).count(),
        labyrinth.floors.len(),
        labyrinth.walls.len(),
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("build failed: {err}");
        std::process::exit(1);
    }
}
