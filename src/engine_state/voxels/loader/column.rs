//! Loads a disc of chunk columns around the observer, spanning every vertical layer.

use cgmath::Point3;

use super::{axis_range, ChunkLoader};
use crate::engine_state::voxels::coords::{BlockPosition, ChunkCoordinate};
use crate::engine_state::voxels::dimensions::WorldDimensions;

/// Loads every chunk column whose horizontal squared distance from the observer's column is
/// at most `radius²`, over the full height of the world.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnChunkLoader {
    /// Load distance, in chunks
    pub radius: i32,
}

impl ColumnChunkLoader {
    /// Creates a new loader with the given radius in chunks.
    pub fn new(radius: i32) -> Self {
        ColumnChunkLoader { radius }
    }
}

impl ChunkLoader for ColumnChunkLoader {
    fn loaded_chunks(
        &self,
        observer: Point3<f32>,
        dimensions: &WorldDimensions,
    ) -> Vec<ChunkCoordinate> {
        let pos = BlockPosition::from_scene_position(observer);
        if !dimensions.is_valid(pos) || self.radius < 0 {
            return Vec::new();
        }

        let centre = dimensions.chunk_of(pos);
        let r = self.radius;
        let radius_squared = (r as i64) * (r as i64);

        let mut chunks = Vec::new();
        for x in axis_range(centre.x, r, dimensions.chunks.x) {
            for z in axis_range(centre.z, r, dimensions.chunks.z) {
                let (dx, dz) = ((centre.x - x) as i64, (centre.z - z) as i64);
                if dx * dx + dz * dz > radius_squared {
                    continue;
                }

                for y in 0..dimensions.chunks.y {
                    chunks.push(ChunkCoordinate::new(x, y, z));
                }
            }
        }

        chunks
    }
}
