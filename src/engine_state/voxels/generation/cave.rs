//! 3D noise caves carved out of stone, on a bedrock floor.

use serde::{Deserialize, Serialize};

use super::noise::{NoiseBasis, OctaveNoise};
use super::{seed_offset, WorldGenerator};
use crate::engine_state::voxels::block::block_type::BlockKind;
use crate::engine_state::voxels::coords::BlockPosition;

/// Tuning parameters for [`CaveWorldGenerator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveSettings {
    /// Noise scale along X
    pub x_scale: f64,
    /// Noise scale along Y
    pub y_scale: f64,
    /// Noise scale along Z
    pub z_scale: f64,
    /// Blocks per noise unit along X
    pub x_size: f64,
    /// Blocks per noise unit along Y
    pub y_size: f64,
    /// Blocks per noise unit along Z
    pub z_size: f64,
    /// Number of noise octaves
    pub octaves: u32,
    /// Amplitude divisor between octaves
    pub persistence: f64,
    /// Noise values above this are solid
    pub cave_threshold: f64,
    /// Swap stone and air, making the caves solid
    pub invert: bool,
    /// Base noise function
    pub noise: NoiseBasis,
}

impl Default for CaveSettings {
    fn default() -> Self {
        CaveSettings {
            x_scale: 1.0,
            y_scale: 1.0,
            z_scale: 1.0,
            x_size: 16.0,
            y_size: 16.0,
            z_size: 16.0,
            octaves: 1,
            persistence: 1.0,
            cave_threshold: 0.5,
            invert: false,
            noise: NoiseBasis::Value,
        }
    }
}

/// Generates stone with noise-carved caves. World Y 0 is always bedrock.
pub struct CaveWorldGenerator {
    settings: CaveSettings,
    noise: OctaveNoise,
    seeds: [f64; 3],
}

impl CaveWorldGenerator {
    /// Creates a new cave generator. Seeds are zero until [`WorldGenerator::setup`].
    pub fn new(settings: CaveSettings) -> Self {
        let noise = OctaveNoise::new(settings.noise);
        CaveWorldGenerator {
            settings,
            noise,
            seeds: [0.0; 3],
        }
    }

    /// The settings this generator was built with.
    pub fn settings(&self) -> &CaveSettings {
        &self.settings
    }

    /// The cave density at `pos`, in `[0, 1]`.
    pub fn density_at(&self, pos: BlockPosition) -> f64 {
        let s = &self.settings;
        self.noise.octave_noise(
            self.seeds[0] + pos.x as f64 / s.x_size * s.x_scale,
            self.seeds[1] + pos.y as f64 / s.y_size * s.y_scale,
            self.seeds[2] + pos.z as f64 / s.z_size * s.z_scale,
            s.octaves,
            s.persistence,
        )
    }
}

impl WorldGenerator for CaveWorldGenerator {
    fn setup(&mut self, rng: &mut fastrand::Rng) {
        self.seeds = [seed_offset(rng), seed_offset(rng), seed_offset(rng)];

        log::info!(
            "X Seed: {}, Y Seed: {}, Z Seed: {}",
            self.seeds[0],
            self.seeds[1],
            self.seeds[2]
        );
    }

    fn block_kind(&self, pos: BlockPosition) -> BlockKind {
        if pos.y == 0 {
            return BlockKind::BEDROCK;
        }

        let solid = self.density_at(pos) > self.settings.cave_threshold;
        match (solid, self.settings.invert) {
            (true, false) | (false, true) => BlockKind::STONE,
            (true, true) | (false, false) => BlockKind::AIR,
        }
    }
}
