//! # Block Models
//!
//! A model turns one block into geometry. Every block type names the [`ModelKind`] it is drawn
//! with, and the world keeps one [`ModelRegistry`] that maps each kind to a single shared model
//! instance.

use std::collections::HashMap;

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::block::BlockState;
use crate::engine_state::voxels::chunk::{BlockLookup, Chunk};
use crate::engine_state::voxels::coords::BlockPosition;
use crate::error::WorldError;

use super::chunk_mesh::ChunkMesh;
use super::face::FaceTemplate;

/// Stable tag identifying a model implementation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// A unit cube with one quad per visible face.
    Cube,
}

/// Everything a model may look at while emitting one block.
pub struct ModelContext<'a> {
    /// The chunk being meshed
    pub chunk: &'a Chunk,
    /// Block lookups that cross the chunk boundary
    pub lookup: &'a dyn BlockLookup,
    /// The block's position inside `chunk`
    pub local: BlockPosition,
    /// The block being emitted
    pub state: &'a BlockState,
}

/// Emits the geometry for one block into a chunk mesh.
pub trait Model: Send + Sync {
    /// Appends this block's faces to `mesh`.
    ///
    /// # Errors
    /// Propagates failures from neighbour lookups across chunk boundaries.
    fn build_mesh(&self, ctx: &ModelContext, mesh: &mut ChunkMesh) -> Result<(), WorldError>;
}

/// The unit cube: one quad for each face that is not hidden by an opaque neighbour.
#[derive(Debug, Default)]
pub struct CubeModel;

impl Model for CubeModel {
    fn build_mesh(&self, ctx: &ModelContext, mesh: &mut ChunkMesh) -> Result<(), WorldError> {
        let block_type = ctx.state.block_type();

        for side in BlockSide::all() {
            if ctx.chunk.is_face_visible(ctx.local, side, ctx.lookup)? {
                mesh.push_face(FaceTemplate::for_side(side), ctx.local, block_type.uv(side));
            }
        }

        Ok(())
    }
}

/// Maps each [`ModelKind`] to its one shared model.
pub struct ModelRegistry {
    models: HashMap<ModelKind, Box<dyn Model>>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ModelRegistry {
            models: HashMap::new(),
        }
    }

    /// Creates a registry holding every built-in model.
    pub fn with_defaults() -> Self {
        let mut registry = ModelRegistry::new();
        registry.register(ModelKind::Cube, Box::new(CubeModel));
        registry
    }

    /// Registers `model` for `kind`, replacing any model already registered for it.
    pub fn register(&mut self, kind: ModelKind, model: Box<dyn Model>) {
        self.models.insert(kind, model);
    }

    /// The model registered for `kind`, if any.
    pub fn get(&self, kind: ModelKind) -> Option<&dyn Model> {
        self.models.get(&kind).map(|model| model.as_ref())
    }

    /// Whether a model is registered for `kind`.
    pub fn contains(&self, kind: ModelKind) -> bool {
        self.models.contains_key(&kind)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        ModelRegistry::with_defaults()
    }
}
