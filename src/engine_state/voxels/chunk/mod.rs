//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed-size box of blocks that is generated,
//! edited and meshed as a unit.
//!
//! ## Storage
//!
//! Chunks keep two views of their contents, both in storage order (x, then y, then z):
//! - `blocks`: one [`BlockState`] per cell, fully populated once the chunk is generated
//! - `solid_array`: a bit vector (1 bit per block) marking opaque blocks
//!
//! The bit vector answers the question face culling asks most often, "is my neighbour
//! opaque?", with a single bit test for every neighbour inside the chunk. Neighbours in other
//! chunks are resolved through a [`BlockLookup`], which the world implements.
//!
//! ## Lifecycle
//!
//! A chunk is created empty, populated exactly once by [`Chunk::generate_chunk`], meshed any
//! number of times, and dropped when the world evicts it.

use bitvec::prelude::BitVec;
use cgmath::{Point3, Vector3};
use chunk_creation::ChunkCreationIterator;
use chunk_iteration::ChunkBlockIterator;

use super::block::block_side::BlockSide;
use super::block::block_type::BlockKind;
use super::block::BlockState;
use super::coords::{BlockPosition, ChunkCoordinate};
use super::dimensions::WorldDimensions;
use super::generation::WorldGenerator;
use crate::engine_state::rendering::meshing::{ChunkMesh, ModelContext, ModelRegistry};
use crate::error::WorldError;

mod chunk_creation;
pub mod chunk_iteration;

/// Block queries that cross a chunk boundary.
///
/// Meshing asks this for the transparency of blocks that live in neighbouring chunks.
pub trait BlockLookup {
    /// Whether the block at world position `pos` is transparent.
    ///
    /// # Errors
    /// Returns an error when `pos` cannot be resolved to a generated block.
    fn is_transparent(&self, pos: BlockPosition) -> Result<bool, WorldError>;
}

/// Represents a fixed-size box of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    coordinate: ChunkCoordinate,

    /// Extents of the world this chunk belongs to.
    dimensions: WorldDimensions,

    /// Whether faces hidden by opaque neighbours are culled.
    optimise_mesh: bool,

    /// The block data for this chunk, `None` until generated.
    blocks: Option<Vec<BlockState>>,

    /// A bit vector where each bit represents whether the corresponding block is opaque (1)
    /// or transparent (0).
    solid_array: BitVec,

    /// The mesh is out of date.
    dirty: bool,

    /// The chunk is part of the observer's desired set.
    loaded: bool,

    /// The most recently built mesh.
    mesh: ChunkMesh,
}

impl Chunk {
    /// Creates a new, ungenerated chunk.
    ///
    /// # Arguments
    /// * `coordinate` - The chunk coordinates of the new chunk
    /// * `dimensions` - The extents of the owning world
    /// * `optimise_mesh` - Whether hidden faces are culled when meshing
    ///
    /// # Returns
    /// A new `Chunk` holding no blocks. It must be generated before use.
    pub fn new(coordinate: ChunkCoordinate, dimensions: WorldDimensions, optimise_mesh: bool) -> Self {
        Chunk {
            coordinate,
            dimensions,
            optimise_mesh,
            blocks: None,
            solid_array: BitVec::new(),
            dirty: false,
            loaded: false,
            mesh: ChunkMesh::new(),
        }
    }

    /// The coordinate of this chunk.
    pub fn coordinate(&self) -> ChunkCoordinate {
        self.coordinate
    }

    /// Size of this chunk, in blocks.
    pub fn size(&self) -> Vector3<i32> {
        self.dimensions.chunk_size
    }

    /// Whether [`Chunk::generate_chunk`] has populated this chunk.
    pub fn is_generated(&self) -> bool {
        self.blocks.is_some()
    }

    /// Flags the mesh as out of date.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the mesh is out of date.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether the chunk is in the observer's desired set.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Sets the loaded flag.
    pub fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    /// Converts a chunk-local position into world space.
    pub fn to_world_position(&self, local: BlockPosition) -> BlockPosition {
        local + self.dimensions.chunk_origin(self.coordinate)
    }

    /// Converts a world position into this chunk's local space.
    pub fn to_local_position(&self, pos: BlockPosition) -> BlockPosition {
        pos - self.dimensions.chunk_origin(self.coordinate)
    }

    /// Storage offset of a local position, or `None` if it lies outside the chunk.
    fn index(&self, local: BlockPosition) -> Option<usize> {
        let size = self.dimensions.chunk_size;
        let inside = (0..size.x).contains(&local.x)
            && (0..size.y).contains(&local.y)
            && (0..size.z).contains(&local.z);
        if !inside {
            return None;
        }
        Some((local.x + size.x * (local.y + size.y * local.z)) as usize)
    }

    fn generated_blocks(&self) -> Result<&Vec<BlockState>, WorldError> {
        self.blocks
            .as_ref()
            .ok_or(WorldError::ChunkNotGenerated(self.coordinate))
    }

    /// Populates every cell by asking `generator` for the kind at its world position.
    ///
    /// Generating again replaces the contents. The chunk is marked dirty.
    pub fn generate_chunk(&mut self, generator: &dyn WorldGenerator) {
        let mut cci = ChunkCreationIterator::new(self.dimensions.chunk_size);

        while let Some(local) = cci.next_position() {
            let kind = generator.block_kind(self.to_world_position(local));
            cci.push_block_kind(kind);
        }

        let (blocks, solid_array) = cci.finish();
        self.blocks = Some(blocks);
        self.solid_array = solid_array;
        self.mark_dirty();
    }

    /// Iterates over every block with its local position.
    ///
    /// # Errors
    /// Returns [`WorldError::ChunkNotGenerated`] before generation.
    pub fn blocks(&self) -> Result<ChunkBlockIterator<'_>, WorldError> {
        let blocks = self.generated_blocks()?;
        Ok(ChunkBlockIterator::new(blocks, self.dimensions.chunk_size))
    }

    /// The block at world position `pos`.
    ///
    /// # Errors
    /// * [`WorldError::ChunkNotGenerated`] before generation
    /// * [`WorldError::InvalidBlockPosition`] if `pos` lies in another chunk
    pub fn get_block(&self, pos: BlockPosition) -> Result<&BlockState, WorldError> {
        let blocks = self.generated_blocks()?;
        let index = self
            .index(self.to_local_position(pos))
            .ok_or(WorldError::InvalidBlockPosition(pos))?;
        Ok(&blocks[index])
    }

    /// Replaces the block at world position `pos` with a fresh state of `kind`.
    ///
    /// Marks this chunk dirty and returns the neighbouring chunks that share the edited
    /// block's faces. A neighbour is only returned when the block lies on the chunk face
    /// towards it and the neighbour is inside the world.
    ///
    /// # Errors
    /// * [`WorldError::ChunkNotGenerated`] before generation
    /// * [`WorldError::InvalidBlockPosition`] if `pos` lies in another chunk
    pub fn set_block(
        &mut self,
        pos: BlockPosition,
        kind: BlockKind,
    ) -> Result<Vec<ChunkCoordinate>, WorldError> {
        let local = self.to_local_position(pos);
        let index = self
            .index(local)
            .ok_or(WorldError::InvalidBlockPosition(pos))?;
        let coordinate = self.coordinate;
        let blocks = self
            .blocks
            .as_mut()
            .ok_or(WorldError::ChunkNotGenerated(coordinate))?;

        let state = kind.create_state();
        self.solid_array.set(index, !state.is_transparent());
        blocks[index] = state;

        let size = self.dimensions.chunk_size;
        let axes = [
            (local.x, size.x, ChunkCoordinate::new(1, 0, 0)),
            (local.y, size.y, ChunkCoordinate::new(0, 1, 0)),
            (local.z, size.z, ChunkCoordinate::new(0, 0, 1)),
        ];

        let mut neighbours = Vec::new();
        for (value, extent, step) in axes {
            if value == 0 && self.dimensions.is_valid_chunk(coordinate - step) {
                neighbours.push(coordinate - step);
            } else if value == extent - 1 && self.dimensions.is_valid_chunk(coordinate + step) {
                neighbours.push(coordinate + step);
            }
        }

        self.mark_dirty();
        Ok(neighbours)
    }

    /// The chunks sharing a face with this one that exist inside the world.
    pub fn neighbour_coordinates(&self) -> Vec<ChunkCoordinate> {
        BlockSide::all()
            .iter()
            .map(|side| {
                let offset = side.offset();
                self.coordinate + ChunkCoordinate::new(offset.x, offset.y, offset.z)
            })
            .filter(|coord| self.dimensions.is_valid_chunk(*coord))
            .collect()
    }

    /// Decides whether the face `side` of the block at `local` is emitted.
    ///
    /// Every face is visible when culling is disabled. Otherwise a face is visible when the
    /// block across it is transparent, or when it sits on the outer boundary of the world.
    ///
    /// # Errors
    /// Propagates lookup failures for neighbours in other chunks.
    pub fn is_face_visible(
        &self,
        local: BlockPosition,
        side: BlockSide,
        lookup: &dyn BlockLookup,
    ) -> Result<bool, WorldError> {
        self.generated_blocks()?;

        if !self.optimise_mesh {
            return Ok(true);
        }

        let neighbour = local + side.offset();
        if let Some(index) = self.index(neighbour) {
            return Ok(!self.solid_array[index]);
        }

        let pos = self.to_world_position(neighbour);
        if !self.dimensions.is_valid(pos) {
            return Ok(true);
        }

        lookup.is_transparent(pos)
    }

    /// Builds a mesh from the current blocks without storing it.
    ///
    /// # Arguments
    /// * `lookup` - Resolves blocks in neighbouring chunks
    /// * `models` - The registry holding each block's model
    ///
    /// # Errors
    /// * [`WorldError::ChunkNotGenerated`] before generation
    /// * Any failure from a model or a neighbour lookup
    pub fn build_mesh(
        &self,
        lookup: &dyn BlockLookup,
        models: &ModelRegistry,
    ) -> Result<ChunkMesh, WorldError> {
        let mut mesh = ChunkMesh::new();

        for (local, state) in self.blocks()? {
            if state.is_transparent() {
                continue;
            }

            let ctx = ModelContext {
                chunk: self,
                lookup,
                local,
                state,
            };
            state.model(models)?.build_mesh(&ctx, &mut mesh)?;
        }

        Ok(mesh)
    }

    /// Clears the dirty flag, then builds and stores a new mesh.
    ///
    /// A failed build leaves the old mesh in place and the chunk dirty.
    pub fn rebuild_mesh(
        &mut self,
        lookup: &dyn BlockLookup,
        models: &ModelRegistry,
    ) -> Result<(), WorldError> {
        self.generated_blocks()?;
        self.mark_clean();
        match self.build_mesh(lookup, models) {
            Ok(mesh) => {
                self.mesh = mesh;
                Ok(())
            }
            Err(err) => {
                self.mark_dirty();
                Err(err)
            }
        }
    }

    pub(crate) fn set_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = mesh;
    }

    /// The most recently built mesh.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// The collision surface, which is the render mesh itself.
    pub fn collision_mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// The highest opaque block in column `(x, z)`, in world Y.
    ///
    /// `x` and `z` are world coordinates inside this chunk. Returns `Ok(None)` when the whole
    /// column is transparent.
    ///
    /// # Errors
    /// * [`WorldError::ChunkNotGenerated`] before generation
    /// * [`WorldError::InvalidBlockPosition`] if the column lies in another chunk
    pub fn ground_level(&self, x: i32, z: i32) -> Result<Option<i32>, WorldError> {
        let blocks = self.generated_blocks()?;
        let origin = self.dimensions.chunk_origin(self.coordinate);
        let column = BlockPosition::new(x, origin.y, z);
        let local = self.to_local_position(column);

        if self.index(local).is_none() {
            return Err(WorldError::InvalidBlockPosition(column));
        }

        for y in (0..self.dimensions.chunk_size.y).rev() {
            let index = self
                .index(BlockPosition::new(local.x, y, local.z))
                .ok_or(WorldError::InvalidBlockPosition(column))?;
            if !blocks[index].is_transparent() {
                return Ok(Some(origin.y + y));
            }
        }

        Ok(None)
    }

    /// Minimum and maximum corners of this chunk in scene space.
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let origin = self.dimensions.chunk_origin(self.coordinate);
        let size = self.dimensions.chunk_size;
        let min = Point3::new(origin.x as f32, origin.y as f32, origin.z as f32);
        let max = Point3::new(
            (origin.x + size.x) as f32,
            (origin.y + size.y) as f32,
            (origin.z + size.z) as f32,
        );
        (min, max)
    }
}
