//! Loads a filled sphere of chunks around the observer.

use cgmath::Point3;

use super::{axis_range, ChunkLoader};
use crate::engine_state::voxels::coords::{BlockPosition, ChunkCoordinate};
use crate::engine_state::voxels::dimensions::WorldDimensions;

/// Loads every valid chunk whose squared distance from the observer's chunk is at most
/// `radius²`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SphericalChunkLoader {
    /// Load distance, in chunks
    pub radius: i32,
}

impl SphericalChunkLoader {
    /// Creates a new loader with the given radius in chunks.
    pub fn new(radius: i32) -> Self {
        SphericalChunkLoader { radius }
    }
}

impl ChunkLoader for SphericalChunkLoader {
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
            for y in axis_range(centre.y, r, dimensions.chunks.y) {
                for z in axis_range(centre.z, r, dimensions.chunks.z) {
                    let coord = ChunkCoordinate::new(x, y, z);
                    if coord.distance_squared(&centre) <= radius_squared {
                        chunks.push(coord);
                    }
                }
            }
        }

        chunks
    }
}
