//! # Engine State Module
//!
//! The core engine module that owns the voxel world and drives it forward in time.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `observer` - The viewer the world streams chunks around
//! * `world_generation` - The staged sequence that builds a new world and spawns the observer
//! * `interaction` - Ray picking, digging and placing blocks
//! * `rendering` - Mesh data produced for a renderer or physics layer
//! * `voxels` - Handles voxel data, chunks, generators, loaders and the world
//!
//! ## Architecture
//!
//! Everything runs in a single simulation domain. [`EngineState::tick`] is called once per
//! simulation step with the time elapsed since the previous one: while the world is being
//! generated each tick advances one generation stage, afterwards each tick feeds the
//! periodic chunk update.

use web_time::Duration;

use observer::Observer;
use voxels::world::World;
use world_generation::{GenerationStage, WorldGeneration};

use crate::config::WorldConfig;
use crate::error::WorldError;

pub mod interaction;
pub mod observer;
pub mod rendering;
pub mod voxels;
pub mod world_generation;

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```no_run
/// use voxel_world::config::WorldConfig;
/// use voxel_world::engine_state::EngineState;
/// use web_time::Duration;
///
/// let mut engine = EngineState::new(&WorldConfig::default()).unwrap();
/// while !engine.is_generated() {
///     engine.tick(Duration::from_millis(16)).unwrap();
/// }
/// ```
pub struct EngineState {
    /// The voxel world containing all chunk data
    pub world: World,
    /// The viewer the world streams around
    pub observer: Observer,
    /// Progress of the world generation sequence
    generation: WorldGeneration,
}

impl EngineState {
    /// Creates a new engine for the given configuration.
    ///
    /// Nothing is generated until the first [`EngineState::tick`].
    ///
    /// # Errors
    /// Returns [`WorldError::Configuration`] when the world cannot be built from `config`.
    pub fn new(config: &WorldConfig) -> Result<Self, WorldError> {
        let world = World::from_config(config)?;
        let generation =
            WorldGeneration::new(WorldGeneration::spawn_column(&world, config.spawn_position));
        let observer = Observer::new(generation.spawn_point(0.0), config.loader.build());

        Ok(EngineState {
            world,
            observer,
            generation,
        })
    }

    /// Advances the simulation by one step.
    ///
    /// # Arguments
    /// * `elapsed` - Time since the previous tick
    ///
    /// # Returns
    /// The generation stage after this tick
    ///
    /// # Errors
    /// Any failure while generating, loading or meshing chunks.
    pub fn tick(&mut self, elapsed: Duration) -> Result<GenerationStage, WorldError> {
        if !self.generation.is_finished() {
            return self.generation.step(&mut self.world, &mut self.observer);
        }

        let desired = self.observer.desired_chunks(self.world.dimensions());
        self.world.update(elapsed, &desired)?;
        Ok(GenerationStage::Running)
    }

    /// Whether world generation has finished and the observer is placed.
    pub fn is_generated(&self) -> bool {
        self.generation.is_finished()
    }

    /// The current generation stage.
    pub fn stage(&self) -> GenerationStage {
        self.generation.stage()
    }

    /// Stops the periodic chunk update.
    pub fn stop(&mut self) {
        self.world.stop_updating();
    }
}
