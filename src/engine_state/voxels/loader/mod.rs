//! # Chunk Loaders
//!
//! A chunk loader decides which chunks should be resident around an observer. Loaders are
//! pure strategies: the same observer position always yields the same set.

use std::ops::RangeInclusive;

use cgmath::Point3;

use super::coords::ChunkCoordinate;
use super::dimensions::WorldDimensions;

mod column;
mod spherical;

pub use column::ColumnChunkLoader;
pub use spherical::SphericalChunkLoader;

/// Computes the desired chunk set for an observer.
pub trait ChunkLoader: Send + Sync {
    /// The chunks that should be loaded for an observer at `observer`.
    ///
    /// Observers outside the world get an empty set.
    fn loaded_chunks(&self, observer: Point3<f32>, dimensions: &WorldDimensions)
        -> Vec<ChunkCoordinate>;
}

/// The chunk indices within `radius` of `centre` on one axis, clipped to `[0, count)`.
fn axis_range(centre: i32, radius: i32, count: i32) -> RangeInclusive<i32> {
    centre.saturating_sub(radius).max(0)..=centre.saturating_add(radius).min(count - 1)
}
