//! # World Generation Sequence
//!
//! Brings a new world from nothing to a placed observer, one stage per simulation tick:
//!
//! 1. Configure the generators, then create and generate the observer's initial chunks
//! 2. Build meshes for every loaded chunk
//! 3. Find the ground at the spawn column, place and activate the observer, and start the
//!    periodic chunk update
//!
//! Each tick boundary is a barrier: a stage only reads state the previous stage finished.

use cgmath::Point3;
use web_time::Instant;

use crate::engine_state::observer::Observer;
use crate::engine_state::voxels::world::World;
use crate::error::WorldError;

/// Progress of the generation sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GenerationStage {
    /// Nothing has run yet.
    Pending,
    /// The initial chunks exist and are generated.
    ChunksGenerated,
    /// The initial chunks are meshed.
    MeshesBuilt,
    /// The observer is placed and the periodic update is running.
    Running,
}

/// Drives a world through its generation stages.
pub struct WorldGeneration {
    stage: GenerationStage,
    spawn_column: (i32, i32),
    started: Option<Instant>,
}

impl WorldGeneration {
    /// Creates a sequence that will spawn the observer in column `spawn_column`.
    pub fn new(spawn_column: (i32, i32)) -> Self {
        WorldGeneration {
            stage: GenerationStage::Pending,
            spawn_column,
            started: None,
        }
    }

    /// The world column for a spawn position given as a fraction of the world's X/Z extent.
    ///
    /// The column is offset by half a chunk so the observer starts inside the chunk rather
    /// than on its edge.
    pub fn spawn_column(world: &World, spawn_position: [f32; 2]) -> (i32, i32) {
        let dims = world.dimensions();
        let x = spawn_position[0] * (dims.chunks.x * dims.chunk_size.x) as f32
            + dims.chunk_size.x as f32 / 2.0;
        let z = spawn_position[1] * (dims.chunks.z * dims.chunk_size.z) as f32
            + dims.chunk_size.z as f32 / 2.0;
        (x.floor() as i32, z.floor() as i32)
    }

    /// The current stage.
    pub fn stage(&self) -> GenerationStage {
        self.stage
    }

    /// Whether the sequence has finished.
    pub fn is_finished(&self) -> bool {
        self.stage == GenerationStage::Running
    }

    /// The observer position at height `y` in the spawn column.
    pub fn spawn_point(&self, y: f32) -> Point3<f32> {
        let (x, z) = self.spawn_column;
        Point3::new(x as f32 + 0.5, y, z as f32 + 0.5)
    }

    /// Runs the next stage.
    ///
    /// # Returns
    /// The stage reached
    ///
    /// # Errors
    /// Any failure while creating, generating or meshing chunks.
    pub fn step(
        &mut self,
        world: &mut World,
        observer: &mut Observer,
    ) -> Result<GenerationStage, WorldError> {
        self.stage = match self.stage {
            GenerationStage::Pending => {
                self.started = Some(Instant::now());

                observer.position = self.spawn_point(0.0);
                world.setup_generators();

                let desired = observer.desired_chunks(world.dimensions());
                world.load_chunks(&desired)?;
                log::debug!("Generated {} initial chunks", desired.len());

                GenerationStage::ChunksGenerated
            }
            GenerationStage::ChunksGenerated => {
                let built = world.build_chunks(true)?;
                log::debug!("Built {} initial chunk meshes", built);

                GenerationStage::MeshesBuilt
            }
            GenerationStage::MeshesBuilt => {
                let (x, z) = self.spawn_column;
                let ground = world.get_ground_level(x, z)?;
                if ground.is_none() {
                    log::warn!(
                        "No ground found at spawn column ({}, {}), spawning at the top of the world",
                        x,
                        z
                    );
                }

                let y = spawn_height(world, ground);
                observer.position = self.spawn_point(y as f32);
                observer.activate();
                log::info!(
                    "Spawned observer at ({}, {}, {})",
                    observer.position.x,
                    observer.position.y,
                    observer.position.z
                );

                world.start_updating();

                if let Some(started) = self.started {
                    log::info!(
                        "Finished generating world in {}ms",
                        started.elapsed().as_millis()
                    );
                }

                GenerationStage::Running
            }
            GenerationStage::Running => GenerationStage::Running,
        };

        Ok(self.stage)
    }
}

/// The block layer the observer spawns in, two above `ground` and never above the top layer.
///
/// Columns without ground spawn on the top layer.
fn spawn_height(world: &World, ground: Option<i32>) -> i32 {
    let top = world.dimensions().world_size().y - 1;
    match ground {
        Some(level) => level.saturating_add(2).min(top),
        None => top,
    }
}
