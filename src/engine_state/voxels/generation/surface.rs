//! Height-field terrain: grass on top, dirt below, air above.

use serde::{Deserialize, Serialize};

use super::noise::{NoiseBasis, OctaveNoise};
use super::{seed_offset, WorldGenerator};
use crate::engine_state::voxels::block::block_type::BlockKind;
use crate::engine_state::voxels::coords::BlockPosition;

/// Tuning parameters for [`SurfaceWorldGenerator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Multiplier applied to the noise before the exponent
    pub height_scale: f64,
    /// Exponent applied to the scaled noise
    pub height_exponent: f64,
    /// World Y the height field is measured from
    pub surface_level: i32,
    /// Horizontal noise scale along X
    pub x_scale: f64,
    /// Horizontal noise scale along Z
    pub z_scale: f64,
    /// Blocks per noise unit along X
    pub x_size: f64,
    /// Blocks per noise unit along Z
    pub z_size: f64,
    /// Number of noise octaves
    pub octaves: u32,
    /// Amplitude divisor between octaves
    pub persistence: f64,
    /// Base noise function
    pub noise: NoiseBasis,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        SurfaceSettings {
            height_scale: 16.0,
            height_exponent: 1.0,
            surface_level: 48,
            x_scale: 1.0,
            z_scale: 1.0,
            x_size: 16.0,
            z_size: 16.0,
            octaves: 1,
            persistence: 1.0,
            noise: NoiseBasis::Value,
        }
    }
}

/// Generates rolling terrain from a 2D height field.
pub struct SurfaceWorldGenerator {
    settings: SurfaceSettings,
    noise: OctaveNoise,
    x_seed: f64,
    z_seed: f64,
}

impl SurfaceWorldGenerator {
    /// Creates a new surface generator. Seeds are zero until [`WorldGenerator::setup`].
    pub fn new(settings: SurfaceSettings) -> Self {
        let noise = OctaveNoise::new(settings.noise);
        SurfaceWorldGenerator {
            settings,
            noise,
            x_seed: 0.0,
            z_seed: 0.0,
        }
    }

    /// The settings this generator was built with.
    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    /// Terrain height above the surface level at column `(x, z)`.
    pub fn height_at(&self, x: i32, z: i32) -> f64 {
        let s = &self.settings;
        let noise = self.noise.octave_noise(
            self.x_seed + x as f64 / s.x_size * s.x_scale,
            1.0,
            self.z_seed + z as f64 / s.z_size * s.z_scale,
            s.octaves,
            s.persistence,
        );
        (s.height_scale * noise).powf(s.height_exponent)
    }

    /// Classifies world row `y` of a column whose height is `height`.
    ///
    /// The single layer whose depth above `surface_level` lies in `[height - 1, height)` is
    /// grass. Everything at or above `height` is air and everything below the grass is dirt.
    pub fn classify(surface_level: i32, height: f64, y: i32) -> BlockKind {
        let depth = (y - surface_level) as f64;

        if depth >= height {
            BlockKind::AIR
        } else if depth >= height - 1.0 {
            BlockKind::GRASS
        } else {
            BlockKind::DIRT
        }
    }
}

impl WorldGenerator for SurfaceWorldGenerator {
    fn setup(&mut self, rng: &mut fastrand::Rng) {
        self.x_seed = seed_offset(rng);
        self.z_seed = seed_offset(rng);

        log::info!("X Seed: {}, Z Seed: {}", self.x_seed, self.z_seed);
    }

    fn block_kind(&self, pos: BlockPosition) -> BlockKind {
        let height = self.height_at(pos.x, pos.z);
        Self::classify(self.settings.surface_level, height, pos.y)
    }
}
