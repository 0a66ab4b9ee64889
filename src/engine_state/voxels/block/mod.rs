//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes the block catalog, block face handling, and the per-voxel [`BlockState`].

use block_type::{BlockKind, BlockType};

use crate::engine_state::rendering::meshing::{Model, ModelRegistry};
use crate::error::WorldError;

pub mod block_side;
pub mod block_type;

/// The per-voxel instance of a block.
///
/// A new state is created for every write, so two positions never share a state. The state
/// only records its kind; the descriptor and the model are resolved on demand from the
/// shared catalog and the world's [`ModelRegistry`].
#[derive(Debug, PartialEq, Eq)]
pub struct BlockState {
    kind: BlockKind,
}

impl BlockState {
    /// Creates a new block state of the specified kind.
    pub fn new(kind: BlockKind) -> Self {
        BlockState { kind }
    }

    /// The kind of this block.
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// The shared descriptor of this block's kind.
    pub fn block_type(&self) -> &'static BlockType {
        self.kind.block_type()
    }

    /// Shorthand for `self.block_type().transparent`.
    pub fn is_transparent(&self) -> bool {
        self.block_type().transparent
    }

    /// Resolves the model singleton for this block's model kind.
    ///
    /// # Errors
    /// Returns [`WorldError::MissingModel`] when the registry holds no model for the kind.
    pub fn model<'r>(&self, registry: &'r ModelRegistry) -> Result<&'r dyn Model, WorldError> {
        let model_kind = self.block_type().model;
        registry
            .get(model_kind)
            .ok_or(WorldError::MissingModel(model_kind))
    }
}

impl BlockKind {
    /// Creates a fresh [`BlockState`] of this kind.
    pub fn create_state(&self) -> BlockState {
        BlockState::new(*self)
    }
}
