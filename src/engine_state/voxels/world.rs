//! # World Module
//!
//! This module provides the `World` struct which manages the collection of chunks in the
//! voxel world. It serves as the central coordinator for chunk creation, eviction, meshing
//! and block access.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach: chunks are created lazily the first time they
//! are needed and kept in a hash map keyed by [`ChunkCoordinate`]. The world itself has a
//! fixed extent ([`WorldDimensions`]); every block position is validated against that extent
//! before any chunk lookup.
//!
//! ## Chunk Lifecycle
//!
//! 1. A chunk is created and generated by the generator assigned to its vertical layer
//! 2. Chunks in the observer's desired set are flagged loaded
//! 3. Loaded chunks that are dirty are re-meshed by [`World::build_chunks`]
//! 4. Chunks that are no longer loaded are evicted by [`World::cleanup_chunks`]
//!
//! Neighbouring chunks needed for face culling are created on demand but left unloaded, so
//! the next cleanup pass evicts them again.

use std::collections::{HashMap, HashSet};
use web_time::Duration;

use super::block::block_type::BlockKind;
use super::block::BlockState;
use super::chunk::{BlockLookup, Chunk};
use super::coords::{BlockPosition, ChunkCoordinate};
use super::dimensions::WorldDimensions;
use super::generation::WorldGenerator;
use crate::config::WorldConfig;
use crate::engine_state::rendering::meshing::ModelRegistry;
use crate::error::WorldError;

/// Default time between two passes of the periodic chunk update.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Represents a voxel world composed of multiple chunks.
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkCoordinate, Chunk>,
    /// One generator per vertical chunk layer, indexed by chunk Y.
    generators: Vec<Box<dyn WorldGenerator>>,
    /// Chunk and world extents.
    dimensions: WorldDimensions,
    /// Whether chunks cull hidden faces.
    optimise_mesh: bool,
    /// Models used to mesh every chunk of this world.
    models: ModelRegistry,
    /// Source of generator seeds.
    rng: fastrand::Rng,
    /// The periodic update is active.
    running: bool,
    /// Time between periodic update passes.
    update_interval: Duration,
    /// Time accumulated since the last periodic update pass.
    since_last_update: Duration,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `dimensions` - The chunk size and chunk count of the world
    /// * `generators` - One generator per vertical chunk layer
    ///
    /// # Errors
    /// Returns [`WorldError::Configuration`] when an extent is not positive or the number of
    /// generators differs from the number of vertical chunk layers.
    pub fn new(
        dimensions: WorldDimensions,
        generators: Vec<Box<dyn WorldGenerator>>,
    ) -> Result<Self, WorldError> {
        let extents = [dimensions.chunk_size, dimensions.chunks];
        if extents.iter().any(|e| e.x <= 0 || e.y <= 0 || e.z <= 0) {
            return Err(WorldError::Configuration(format!(
                "world extents must be positive, got chunk size {:?} and chunk count {:?}",
                dimensions.chunk_size, dimensions.chunks
            )));
        }

        if generators.len() != dimensions.chunks.y as usize {
            return Err(WorldError::Configuration(format!(
                "expected {} generators, one per chunk layer, found {}",
                dimensions.chunks.y,
                generators.len()
            )));
        }

        Ok(World {
            chunks: HashMap::new(),
            generators,
            dimensions,
            optimise_mesh: true,
            models: ModelRegistry::with_defaults(),
            rng: fastrand::Rng::new(),
            running: false,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            since_last_update: Duration::ZERO,
        })
    }

    /// Creates a world from a configuration.
    ///
    /// # Errors
    /// Returns [`WorldError::Configuration`] under the same conditions as [`World::new`].
    pub fn from_config(config: &WorldConfig) -> Result<Self, WorldError> {
        let generators = config.generators.iter().map(|g| g.build()).collect();
        let world = World::new(config.dimensions(), generators)?
            .with_optimise_mesh(config.optimise_mesh)
            .with_update_interval(
                Duration::try_from_secs_f64(config.update_interval_secs)
                    .unwrap_or(DEFAULT_UPDATE_INTERVAL),
            );

        Ok(match config.seed {
            Some(seed) => world.with_seed(seed),
            None => world,
        })
    }

    /// Enables or disables hidden face culling for chunks created from now on.
    pub fn with_optimise_mesh(mut self, optimise_mesh: bool) -> Self {
        self.optimise_mesh = optimise_mesh;
        self
    }

    /// Seeds the generator set-up so worlds can be reproduced.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Sets the time between periodic update passes.
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Replaces the model registry.
    pub fn with_models(mut self, models: ModelRegistry) -> Self {
        self.models = models;
        self
    }

    /// The extents of this world.
    pub fn dimensions(&self) -> &WorldDimensions {
        &self.dimensions
    }

    /// The model registry used for meshing.
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Configures every generator. Must run before any chunk is generated.
    pub fn setup_generators(&mut self) {
        for generator in self.generators.iter_mut() {
            generator.setup(&mut self.rng);
        }
    }

    /// Whether `pos` lies inside the world.
    pub fn is_valid(&self, pos: BlockPosition) -> bool {
        self.dimensions.is_valid(pos)
    }

    /// Whether `coord` names a chunk inside the world.
    pub fn is_valid_chunk(&self, coord: ChunkCoordinate) -> bool {
        self.dimensions.is_valid_chunk(coord)
    }

    /// The chunk that contains `pos`.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidBlockPosition`] when `pos` is outside the world.
    pub fn get_chunk_location(&self, pos: BlockPosition) -> Result<ChunkCoordinate, WorldError> {
        if !self.is_valid(pos) {
            return Err(WorldError::InvalidBlockPosition(pos));
        }
        Ok(self.dimensions.chunk_of(pos))
    }

    /// The chunk at `coord`, if it currently exists. Never creates a chunk.
    pub fn chunk(&self, coord: ChunkCoordinate) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Mutable access to the chunk at `coord`, if it currently exists.
    pub fn chunk_mut(&mut self, coord: ChunkCoordinate) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Every chunk currently held by the world.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Number of chunks currently held by the world.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The chunk at `coord`, creating and generating it if it does not exist yet.
    ///
    /// Newly created chunks are not loaded.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidChunkCoordinate`] when `coord` is outside the world.
    pub fn get_chunk(&mut self, coord: ChunkCoordinate) -> Result<&mut Chunk, WorldError> {
        if !self.is_valid_chunk(coord) {
            return Err(WorldError::InvalidChunkCoordinate(coord));
        }

        let dimensions = self.dimensions;
        let optimise_mesh = self.optimise_mesh;
        let generators = &self.generators;

        let chunk = self.chunks.entry(coord).or_insert_with(|| {
            log::debug!("Creating chunk {}", coord);
            let mut chunk = Chunk::new(coord, dimensions, optimise_mesh);
            chunk.generate_chunk(generators[coord.y as usize].as_ref());
            chunk.set_loaded(false);
            chunk
        });

        Ok(chunk)
    }

    /// The chunk containing `pos`, creating it if needed.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidBlockPosition`] when `pos` is outside the world.
    pub fn get_chunk_at(&mut self, pos: BlockPosition) -> Result<&mut Chunk, WorldError> {
        let coord = self.get_chunk_location(pos)?;
        self.get_chunk(coord)
    }

    /// Creates any missing chunks in `coords` and flags all of them loaded.
    ///
    /// # Errors
    /// Fails on the first coordinate outside the world.
    pub fn load_chunks(&mut self, coords: &[ChunkCoordinate]) -> Result<(), WorldError> {
        for coord in coords {
            self.get_chunk(*coord)?.set_loaded(true);
        }
        Ok(())
    }

    /// Makes `desired` the loaded set: other chunks are flagged not loaded, desired chunks are
    /// created if needed and flagged loaded.
    ///
    /// # Errors
    /// Fails on the first desired coordinate outside the world.
    pub fn update_loaded_chunks(&mut self, desired: &[ChunkCoordinate]) -> Result<(), WorldError> {
        let wanted: HashSet<ChunkCoordinate> = desired.iter().copied().collect();
        for (coord, chunk) in self.chunks.iter_mut() {
            chunk.set_loaded(wanted.contains(coord));
        }
        self.load_chunks(desired)
    }

    /// Evicts every chunk that is not loaded.
    ///
    /// # Returns
    /// The number of chunks evicted
    pub fn cleanup_chunks(&mut self) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|coord, chunk| {
            if !chunk.is_loaded() {
                log::debug!("Evicting chunk {}", coord);
            }
            chunk.is_loaded()
        });
        before - self.chunks.len()
    }

    /// Rebuilds the mesh of every loaded chunk that is dirty, or of every loaded chunk when
    /// `force` is set.
    ///
    /// # Returns
    /// The number of chunks rebuilt
    ///
    /// # Errors
    /// Stops at the first chunk that fails to mesh.
    pub fn build_chunks(&mut self, force: bool) -> Result<usize, WorldError> {
        let pending: Vec<ChunkCoordinate> = self
            .chunks
            .values()
            .filter(|chunk| chunk.is_loaded() && (force || chunk.is_dirty()))
            .map(|chunk| chunk.coordinate())
            .collect();

        for coord in &pending {
            self.build_chunk(*coord)?;
        }

        Ok(pending.len())
    }

    /// Rebuilds the mesh of one chunk.
    ///
    /// Face-adjacent chunks are created first so culling at the chunk boundary can see them.
    /// A chunk that fails to mesh stays dirty and is retried on the next build pass.
    ///
    /// # Errors
    /// * [`WorldError::ChunkNotPresent`] if the chunk does not exist
    /// * Any failure raised while meshing
    pub fn build_chunk(&mut self, coord: ChunkCoordinate) -> Result<(), WorldError> {
        let neighbours = self
            .chunks
            .get(&coord)
            .ok_or(WorldError::ChunkNotPresent(coord))?
            .neighbour_coordinates();
        for neighbour in neighbours {
            self.get_chunk(neighbour)?;
        }

        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.mark_clean();
        }

        let world: &World = self;
        let built = world
            .chunks
            .get(&coord)
            .ok_or(WorldError::ChunkNotPresent(coord))?
            .build_mesh(world, &world.models);

        if let Some(chunk) = self.chunks.get_mut(&coord) {
            match built {
                Ok(mesh) => chunk.set_mesh(mesh),
                Err(err) => {
                    chunk.mark_dirty();
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// The block at `pos` without creating chunks.
    ///
    /// # Errors
    /// * [`WorldError::InvalidBlockPosition`] when `pos` is outside the world
    /// * [`WorldError::ChunkNotPresent`] when the owning chunk does not exist
    pub fn block(&self, pos: BlockPosition) -> Result<&BlockState, WorldError> {
        let coord = self.get_chunk_location(pos)?;
        self.chunks
            .get(&coord)
            .ok_or(WorldError::ChunkNotPresent(coord))?
            .get_block(pos)
    }

    /// The block at `pos`, creating the owning chunk if needed.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidBlockPosition`] when `pos` is outside the world.
    pub fn get_block(&mut self, pos: BlockPosition) -> Result<&BlockState, WorldError> {
        let chunk = self.get_chunk_at(pos)?;
        chunk.get_block(pos)
    }

    /// Replaces the block at `pos` with a fresh state of `kind`.
    ///
    /// The owning chunk is marked dirty, as is every existing neighbour chunk that shares a
    /// face with the edited block. Dirty loaded chunks are rebuilt before returning.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidBlockPosition`] when `pos` is outside the world, or any
    /// failure from the rebuild pass.
    pub fn set_block(&mut self, pos: BlockPosition, kind: BlockKind) -> Result<(), WorldError> {
        let neighbours = self.get_chunk_at(pos)?.set_block(pos, kind)?;

        for coord in neighbours {
            if let Some(chunk) = self.chunks.get_mut(&coord) {
                chunk.mark_dirty();
            }
        }

        self.build_chunks(false)?;
        Ok(())
    }

    /// The highest opaque block in world column `(x, z)`, searching from the top layer down.
    ///
    /// Returns `Ok(None)` when the whole column is transparent.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidBlockPosition`] when the column is outside the world.
    pub fn get_ground_level(&mut self, x: i32, z: i32) -> Result<Option<i32>, WorldError> {
        let base = self.get_chunk_location(BlockPosition::new(x, 0, z))?;

        for y in (0..self.dimensions.chunks.y).rev() {
            let chunk = self.get_chunk(ChunkCoordinate::new(base.x, y, base.z))?;
            if let Some(level) = chunk.ground_level(x, z)? {
                return Ok(Some(level));
            }
        }

        Ok(None)
    }

    /// Starts the periodic update.
    pub fn start_updating(&mut self) {
        self.running = true;
        self.since_last_update = Duration::ZERO;
    }

    /// Stops the periodic update. Calls to [`World::update`] become no-ops.
    pub fn stop_updating(&mut self) {
        self.running = false;
    }

    /// Whether the periodic update is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the periodic update by `elapsed`.
    ///
    /// Once a full interval has passed, chunks outside `desired` are evicted and dirty loaded
    /// chunks are rebuilt.
    ///
    /// # Returns
    /// `true` when an update pass ran
    ///
    /// # Errors
    /// Any failure from loading or rebuilding chunks.
    pub fn update(
        &mut self,
        elapsed: Duration,
        desired: &[ChunkCoordinate],
    ) -> Result<bool, WorldError> {
        if !self.running {
            return Ok(false);
        }

        self.since_last_update += elapsed;
        if self.since_last_update < self.update_interval {
            return Ok(false);
        }
        self.since_last_update = Duration::ZERO;

        self.update_loaded_chunks(desired)?;
        let evicted = self.cleanup_chunks();
        let rebuilt = self.build_chunks(false)?;
        log::debug!(
            "Chunk update: {} evicted, {} rebuilt, {} resident",
            evicted,
            rebuilt,
            self.chunks.len()
        );

        Ok(true)
    }
}

impl BlockLookup for World {
    fn is_transparent(&self, pos: BlockPosition) -> Result<bool, WorldError> {
        Ok(self.block(pos)?.is_transparent())
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;

    struct Layered;

    impl WorldGenerator for Layered {
        fn setup(&mut self, _rng: &mut fastrand::Rng) {}

        fn block_kind(&self, pos: BlockPosition) -> BlockKind {
            if pos.y < 2 {
                BlockKind::STONE
            } else {
                BlockKind::AIR
            }
        }
    }

    fn world() -> World {
        let dims = WorldDimensions::new(Vector3::new(4, 4, 4), Vector3::new(3, 2, 3));
        World::new(dims, vec![Box::new(Layered), Box::new(Layered)]).unwrap()
    }

    #[test]
    fn generator_count_must_match_layers() {
        let dims = WorldDimensions::new(Vector3::new(4, 4, 4), Vector3::new(3, 2, 3));
        let result = World::new(dims, vec![Box::new(Layered)]);
        assert!(matches!(result, Err(WorldError::Configuration(_))));
    }

    #[test]
    fn get_chunk_creates_unloaded_generated_chunks() {
        let mut world = world();
        let chunk = world.get_chunk(ChunkCoordinate::new(1, 0, 2)).unwrap();
        assert!(chunk.is_generated());
        assert!(!chunk.is_loaded());
        assert_eq!(world.chunk_count(), 1);

        assert!(matches!(
            world.get_chunk(ChunkCoordinate::new(0, 2, 0)),
            Err(WorldError::InvalidChunkCoordinate(_))
        ));
    }

    #[test]
    fn chunk_location_is_floor_division() {
        let world = world();
        assert_eq!(
            world.get_chunk_location(BlockPosition::new(5, 7, 11)),
            Ok(ChunkCoordinate::new(1, 1, 2))
        );
        assert!(world.get_chunk_location(BlockPosition::new(-1, 0, 0)).is_err());
    }

    #[test]
    fn read_only_lookup_never_creates_chunks() {
        let world = world();
        assert!(matches!(
            world.block(BlockPosition::new(1, 1, 1)),
            Err(WorldError::ChunkNotPresent(_))
        ));
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn build_chunks_only_touches_loaded_chunks() {
        let mut world = world();
        world.load_chunks(&[ChunkCoordinate::new(1, 0, 1)]).unwrap();
        assert_eq!(world.build_chunks(false), Ok(1));
        assert_eq!(world.build_chunks(false), Ok(0));
        assert_eq!(world.build_chunks(true), Ok(1));

        // The loaded chunk pulled in its face neighbours.
        assert_eq!(world.chunk_count(), 6);
        assert_eq!(world.cleanup_chunks(), 5);
    }

    #[test]
    fn failed_builds_leave_the_chunk_dirty() {
        let mut world = world().with_models(ModelRegistry::new());
        let coord = ChunkCoordinate::new(1, 0, 1);
        world.load_chunks(&[coord]).unwrap();

        assert!(matches!(
            world.build_chunk(coord),
            Err(WorldError::MissingModel(_))
        ));
        assert!(world.chunk(coord).unwrap().is_dirty());
        assert!(world.build_chunks(false).is_err());
        assert!(world.chunk(coord).unwrap().is_dirty());
    }

    #[test]
    fn buried_chunk_faces_are_culled_across_boundaries() {
        let mut world = world();
        world.load_chunks(&[ChunkCoordinate::new(1, 0, 1)]).unwrap();
        world.build_chunks(true).unwrap();

        // The top of the stone slab and the floor of the world are exposed.
        let chunk = world.chunk(ChunkCoordinate::new(1, 0, 1)).unwrap();
        assert_eq!(chunk.mesh().face_count(), 2 * 16);
    }

    #[test]
    fn ground_level_scans_down_through_layers() {
        let mut world = world();
        assert_eq!(world.get_ground_level(5, 5), Ok(Some(1)));

        world.set_block(BlockPosition::new(5, 6, 5), BlockKind::WOOD).unwrap();
        assert_eq!(world.get_ground_level(5, 5), Ok(Some(6)));

        assert!(world.get_ground_level(-1, 5).is_err());
    }

    #[test]
    fn periodic_update_waits_for_the_interval() {
        let mut world = world().with_update_interval(Duration::from_millis(100));
        let desired = [ChunkCoordinate::new(0, 0, 0)];

        assert_eq!(world.update(Duration::from_millis(500), &desired), Ok(false));

        world.start_updating();
        assert_eq!(world.update(Duration::from_millis(60), &desired), Ok(false));
        assert_eq!(world.update(Duration::from_millis(60), &desired), Ok(true));
        assert!(world.chunk(ChunkCoordinate::new(0, 0, 0)).is_some());

        world.stop_updating();
        assert_eq!(world.update(Duration::from_secs(5), &[]), Ok(false));
        assert!(world.chunk(ChunkCoordinate::new(0, 0, 0)).is_some());
    }
}
