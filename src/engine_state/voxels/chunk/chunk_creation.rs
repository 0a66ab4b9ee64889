//! # Chunk Creation Module
//!
//! This module provides a builder that fills a chunk's block storage one cell at a time.
//!
//! The `ChunkCreationIterator` walks the chunk in storage order (x, then y, then z) and keeps
//! two structures in step:
//! 1. A vector (`blocks`) holding one fresh [`BlockState`] for every cell
//! 2. A bit vector (`solid_array`) with one bit per cell marking opaque blocks
//!
//! The bit vector lets face culling test neighbours inside the chunk without touching the
//! block catalog.

use bitvec::vec::BitVec;
use cgmath::Vector3;

use crate::engine_state::voxels::block::{block_type::BlockKind, BlockState};
use crate::engine_state::voxels::coords::BlockPosition;

/// A builder for populating every cell of a chunk in storage order.
pub struct ChunkCreationIterator {
    /// Size of the chunk being filled, in blocks
    size: Vector3<i32>,
    /// Bit vector where each bit represents whether a block is opaque (1) or transparent (0)
    solid_array: BitVec,
    /// One block state per cell, in storage order
    blocks: Vec<BlockState>,
    /// Current X position within the chunk
    local_x: i32,
    /// Current Y position within the chunk
    local_y: i32,
    /// Current Z position within the chunk
    local_z: i32,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for a chunk of the given size.
    ///
    /// # Arguments
    /// * `size` - The chunk extent in blocks
    ///
    /// # Returns
    /// A new `ChunkCreationIterator` positioned at local `(0, 0, 0)`
    pub fn new(size: Vector3<i32>) -> Self {
        let volume = (size.x * size.y * size.z).max(0) as usize;
        ChunkCreationIterator {
            size,
            solid_array: BitVec::with_capacity(volume),
            blocks: Vec::with_capacity(volume),
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    /// The local position the next pushed block will be stored at, or `None` once the chunk
    /// is full.
    pub fn next_position(&self) -> Option<BlockPosition> {
        if self.local_z >= self.size.z || self.size.x <= 0 || self.size.y <= 0 {
            return None;
        }
        Some(BlockPosition::new(self.local_x, self.local_y, self.local_z))
    }

    /// Stores a fresh state of `kind` at the current position and advances the position.
    ///
    /// # Arguments
    /// * `kind` - The kind of block to add
    pub fn push_block_kind(&mut self, kind: BlockKind) {
        let state = kind.create_state();
        self.solid_array.push(!state.is_transparent());
        self.blocks.push(state);

        // Move to the next position
        self.local_x += 1;

        // Handle end of row (X boundary)
        if self.local_x == self.size.x {
            self.local_x = 0;
            self.local_y += 1;

            // Handle end of plane (Y boundary)
            if self.local_y == self.size.y {
                self.local_y = 0;
                self.local_z += 1;
            }
        }
    }

    /// Finalizes creation and returns the block storage and the opacity mask.
    ///
    /// # Returns
    /// The block states and the matching bit vector, both in storage order
    pub fn finish(self) -> (Vec<BlockState>, BitVec) {
        (self.blocks, self.solid_array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_x_then_y_then_z() {
        let mut cci = ChunkCreationIterator::new(Vector3::new(2, 2, 2));
        let mut visited = Vec::new();
        while let Some(pos) = cci.next_position() {
            visited.push(pos);
            cci.push_block_kind(BlockKind::AIR);
        }

        assert_eq!(visited.len(), 8);
        assert_eq!(visited[0], BlockPosition::new(0, 0, 0));
        assert_eq!(visited[1], BlockPosition::new(1, 0, 0));
        assert_eq!(visited[2], BlockPosition::new(0, 1, 0));
        assert_eq!(visited[4], BlockPosition::new(0, 0, 1));
        assert_eq!(visited[7], BlockPosition::new(1, 1, 1));
    }

    #[test]
    fn solid_array_tracks_opacity() {
        let mut cci = ChunkCreationIterator::new(Vector3::new(3, 1, 1));
        cci.push_block_kind(BlockKind::STONE);
        cci.push_block_kind(BlockKind::AIR);
        cci.push_block_kind(BlockKind::GRASS);
        assert!(cci.next_position().is_none());

        let (blocks, solid) = cci.finish();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].kind(), BlockKind::GRASS);
        assert!(solid[0]);
        assert!(!solid[1]);
        assert!(solid[2]);
    }
}
