#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked, procedurally generated voxel world with face-culled chunk meshing and
//! observer-driven chunk streaming.
//!
//! ## Key Modules
//!
//! * `config` - JSON world configuration
//! * `engine_state` - The world, its generators, chunk loaders, meshing and the tick driver
//! * `error` - Error types shared across the crate
//!
//! ## Architecture
//!
//! A [`World`] owns a sparse map of [`Chunk`]s. Chunks are created on first access, filled by
//! the generator assigned to their vertical layer, and meshed once their neighbours exist so
//! faces against opaque blocks can be culled. Editing a block marks its chunk dirty, and any
//! neighbour that shares the edited boundary, so the next build pass rebuilds exactly those
//! meshes.
//!
//! [`EngineState`] wraps a world and an observer: each tick either advances the world
//! generation sequence or feeds the periodic update that streams chunks around the observer.
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_world::run();
//! }
//! ```

use web_time::Duration;

use crate::config::WorldConfig;

pub mod config;
pub mod engine_state;
pub mod error;

pub use engine_state::voxels::block::block_side::BlockSide;
pub use engine_state::voxels::block::block_type::BlockKind;
pub use engine_state::voxels::block::BlockState;
pub use engine_state::voxels::chunk::Chunk;
pub use engine_state::voxels::coords::{BlockPosition, ChunkCoordinate};
pub use engine_state::voxels::dimensions::WorldDimensions;
pub use engine_state::voxels::world::World;
pub use engine_state::EngineState;
pub use error::{ConfigError, WorldError};

/// Number of simulation steps [`run`] performs once the world is generated.
const UPDATE_TICKS: u32 = 3;

/// Installs the stdout logger, filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless; later calls leave the first logger in place.
pub fn init_logger() {
    let _ = env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init();
}

/// Generates a world and runs a few periodic updates around the spawned observer.
///
/// The configuration is read from the JSON file named by the first command line argument,
/// falling back to the defaults when no argument is given.
pub fn run() {
    init_logger();
    log::info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => match WorldConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to load configuration from {}: {}", path, err);
                return;
            }
        },
        None => WorldConfig::default(),
    };

    let mut engine = match EngineState::new(&config) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("Failed to create world: {}", err);
            return;
        }
    };

    let step =
        Duration::try_from_secs_f64(config.update_interval_secs).unwrap_or(Duration::from_secs(1));
    while !engine.is_generated() {
        if let Err(err) = engine.tick(step) {
            log::error!("World generation failed: {}", err);
            return;
        }
    }

    for _ in 0..UPDATE_TICKS {
        if let Err(err) = engine.tick(step) {
            log::error!("Chunk update failed: {}", err);
            break;
        }
    }

    let faces: usize = engine
        .world
        .chunks()
        .filter(|chunk| chunk.is_loaded())
        .map(|chunk| chunk.mesh().face_count())
        .sum();
    log::info!(
        "{} chunks resident, {} faces in loaded meshes",
        engine.world.chunk_count(),
        faces
    );

    engine.stop();
}
