//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the unit step from a block to the
//! neighbour that shares each face.

use crate::engine_state::voxels::coords::BlockPosition;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned a fixed integer value. The order matches the order of the
/// per-face UV tables in the block catalog.
///
/// The order is: [FRONT, BACK, TOP, BOTTOM, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing negative Z)
    FRONT = 0,

    /// The back face (facing positive Z)
    BACK = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, TOP, BOTTOM, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The step from a block to the neighbour across this face.
    pub fn offset(&self) -> BlockPosition {
        match self {
            BlockSide::FRONT => BlockPosition::new(0, 0, -1),
            BlockSide::BACK => BlockPosition::new(0, 0, 1),
            BlockSide::TOP => BlockPosition::new(0, 1, 0),
            BlockSide::BOTTOM => BlockPosition::new(0, -1, 0),
            BlockSide::LEFT => BlockPosition::new(-1, 0, 0),
            BlockSide::RIGHT => BlockPosition::new(1, 0, 0),
        }
    }

    /// The face on the opposite side of the block.
    pub fn opposite(&self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
        }
    }
}
