//! # World Generation
//!
//! Generators decide which block kind occupies each world position. A world owns one
//! generator per vertical chunk layer.
//!
//! A generator is configured once through [`WorldGenerator::setup`], which fixes its random
//! seed offsets. From then on [`WorldGenerator::block_kind`] must be a pure function of the
//! position.

use super::block::block_type::BlockKind;
use super::coords::BlockPosition;

mod cave;
pub mod noise;
mod surface;

pub use cave::{CaveSettings, CaveWorldGenerator};
pub use noise::{NoiseBasis, OctaveNoise};
pub use surface::{SurfaceSettings, SurfaceWorldGenerator};

/// Converts world positions into block kinds.
pub trait WorldGenerator: Send + Sync {
    /// Fixes this generator's seed state from `rng`.
    fn setup(&mut self, rng: &mut fastrand::Rng);

    /// The block kind at world position `pos`.
    fn block_kind(&self, pos: BlockPosition) -> BlockKind;
}

/// A random seed offset in `[0, 10000)`.
fn seed_offset(rng: &mut fastrand::Rng) -> f64 {
    rng.f64() * 10_000.0
}
