//! # World Dimensions Module
//!
//! The fixed extent of a world: how many blocks make up a chunk and how many chunks make up
//! the world on each axis. Every coordinate conversion and validity check goes through
//! [`WorldDimensions`], so chunks and loaders can share it by value instead of holding a
//! reference back to the world.

use cgmath::Vector3;

use super::coords::{BlockPosition, ChunkCoordinate};

/// The block and chunk extents of a world.
///
/// The legal block envelope is `0 <= axis < chunks * chunk_size` on every axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorldDimensions {
    /// Size of each chunk, in blocks.
    pub chunk_size: Vector3<i32>,
    /// Number of chunks along each axis.
    pub chunks: Vector3<i32>,
}

impl WorldDimensions {
    /// Creates a new set of dimensions.
    pub fn new(chunk_size: Vector3<i32>, chunks: Vector3<i32>) -> Self {
        WorldDimensions { chunk_size, chunks }
    }

    /// Size of the whole world, in blocks.
    pub fn world_size(&self) -> Vector3<i32> {
        Vector3::new(
            self.chunk_size.x * self.chunks.x,
            self.chunk_size.y * self.chunks.y,
            self.chunk_size.z * self.chunks.z,
        )
    }

    /// Number of blocks held by a single chunk.
    pub fn blocks_per_chunk(&self) -> usize {
        (self.chunk_size.x * self.chunk_size.y * self.chunk_size.z) as usize
    }

    /// Whether `pos` lies inside the world.
    pub fn is_valid(&self, pos: BlockPosition) -> bool {
        let size = self.world_size();
        pos.all_ge(&BlockPosition::ZERO) && pos < BlockPosition::new(size.x, size.y, size.z)
    }

    /// Whether `coord` names a chunk slot inside the world.
    pub fn is_valid_chunk(&self, coord: ChunkCoordinate) -> bool {
        coord.all_ge(&ChunkCoordinate::ZERO)
            && coord < ChunkCoordinate::new(self.chunks.x, self.chunks.y, self.chunks.z)
    }

    /// The chunk containing `pos`, by floor division with the chunk size.
    ///
    /// This does not check validity; callers validate first.
    pub fn chunk_of(&self, pos: BlockPosition) -> ChunkCoordinate {
        ChunkCoordinate::new(
            pos.x.div_euclid(self.chunk_size.x),
            pos.y.div_euclid(self.chunk_size.y),
            pos.z.div_euclid(self.chunk_size.z),
        )
    }

    /// World position of the lowest corner block of `coord`.
    pub fn chunk_origin(&self, coord: ChunkCoordinate) -> BlockPosition {
        BlockPosition::new(
            coord.x * self.chunk_size.x,
            coord.y * self.chunk_size.y,
            coord.z * self.chunk_size.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> WorldDimensions {
        WorldDimensions::new(Vector3::new(16, 8, 4), Vector3::new(3, 2, 5))
    }

    #[test]
    fn world_size_is_product_of_extents() {
        assert_eq!(dims().world_size(), Vector3::new(48, 16, 20));
        assert_eq!(dims().blocks_per_chunk(), 16 * 8 * 4);
    }

    #[test]
    fn validity_covers_every_axis() {
        let dims = dims();
        assert!(dims.is_valid(BlockPosition::new(0, 0, 0)));
        assert!(dims.is_valid(BlockPosition::new(47, 15, 19)));
        assert!(!dims.is_valid(BlockPosition::new(48, 0, 0)));
        assert!(!dims.is_valid(BlockPosition::new(0, -1, 0)));
        assert!(!dims.is_valid(BlockPosition::new(0, 0, 20)));

        assert!(dims.is_valid_chunk(ChunkCoordinate::new(2, 1, 4)));
        assert!(!dims.is_valid_chunk(ChunkCoordinate::new(3, 0, 0)));
        assert!(!dims.is_valid_chunk(ChunkCoordinate::new(0, 0, -1)));
    }

    #[test]
    fn chunk_of_is_floor_division() {
        let dims = dims();
        for x in -20..60 {
            for y in -10..20 {
                let pos = BlockPosition::new(x, y, x / 3);
                let expected = ChunkCoordinate::new(
                    (x as f64 / 16.0).floor() as i32,
                    (y as f64 / 8.0).floor() as i32,
                    ((x / 3) as f64 / 4.0).floor() as i32,
                );
                assert_eq!(dims.chunk_of(pos), expected);
            }
        }
    }

    #[test]
    fn chunk_origin_inverts_chunk_of() {
        let dims = dims();
        let coord = ChunkCoordinate::new(2, 1, 3);
        let origin = dims.chunk_origin(coord);
        assert_eq!(origin, BlockPosition::new(32, 8, 12));
        assert_eq!(dims.chunk_of(origin), coord);
    }
}
