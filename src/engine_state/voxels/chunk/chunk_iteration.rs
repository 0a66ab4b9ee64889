//! # Chunk Iteration Module
//!
//! This module provides an iterator over the blocks of a generated chunk together with their
//! chunk-local positions, in storage order.

use cgmath::Vector3;

use crate::engine_state::voxels::block::BlockState;
use crate::engine_state::voxels::coords::BlockPosition;

/// An iterator over every block in a chunk.
///
/// Positions are recovered from the storage offset, so iteration never needs to look
/// anything up by coordinate.
pub struct ChunkBlockIterator<'a> {
    /// The chunk's block storage
    blocks: &'a [BlockState],
    /// Size of the chunk, in blocks
    size: Vector3<i32>,
    /// Offset of the next block to yield
    offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` over `blocks`.
    ///
    /// # Arguments
    /// * `blocks` - Block storage laid out x, then y, then z
    /// * `size` - The chunk extent that storage was built with
    pub fn new(blocks: &'a [BlockState], size: Vector3<i32>) -> Self {
        ChunkBlockIterator {
            blocks,
            size,
            offset: 0,
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (BlockPosition, &'a BlockState);

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.blocks.get(self.offset)?;

        let index = self.offset as i32;
        let plane = self.size.x * self.size.y;
        let position = BlockPosition::new(
            index % self.size.x,
            (index % plane) / self.size.x,
            index / plane,
        );

        self.offset += 1;
        Some((position, block))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.blocks.len() - self.offset;
        (remaining, Some(remaining))
    }
}
