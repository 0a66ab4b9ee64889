//! # Octave Noise
//!
//! Layered noise built on a base noise function from the `noise` crate. Each layer doubles
//! the sampling frequency and divides the amplitude by the persistence; the sum is
//! normalised by the total amplitude so results always fall in `[0, 1]`.

use noise::{NoiseFn, Perlin, Value};
use serde::{Deserialize, Serialize};

/// Seed of the base permutation table. Per-generator variation comes from coordinate offsets.
const PERMUTATION_SEED: u32 = 0;

/// The base noise function sampled by each octave.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseBasis {
    /// Interpolated lattice value noise.
    #[default]
    Value,
    /// Gradient noise.
    Perlin,
}

enum Basis {
    Value(Value),
    Perlin(Perlin),
}

/// Deterministic multi-octave noise.
pub struct OctaveNoise {
    basis: Basis,
}

impl OctaveNoise {
    /// Creates a new octave noise source over `basis`.
    pub fn new(basis: NoiseBasis) -> Self {
        let basis = match basis {
            NoiseBasis::Value => Basis::Value(Value::new(PERMUTATION_SEED)),
            NoiseBasis::Perlin => Basis::Perlin(Perlin::new(PERMUTATION_SEED)),
        };
        OctaveNoise { basis }
    }

    /// One sample of the base noise, remapped from `[-1, 1]` to `[0, 1]`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let raw = match &self.basis {
            Basis::Value(value) => value.get([x, y, z]),
            Basis::Perlin(perlin) => perlin.get([x, y, z]),
        };
        ((raw + 1.0) / 2.0).clamp(0.0, 1.0)
    }

    /// Sums `octaves` layers of base noise.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - The sample coordinate
    /// * `octaves` - Number of layers, at least one layer is always sampled
    /// * `persistence` - Amplitude divisor between consecutive layers
    ///
    /// # Returns
    /// The normalised sum, in `[0, 1]`
    pub fn octave_noise(&self, x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude: f64 = 1.0;
        let mut max_value: f64 = 0.0;

        for _ in 0..octaves.max(1) {
            total += self.sample(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;

            amplitude /= persistence;
            frequency *= 2.0;
        }

        if max_value > 0.0 && max_value.is_finite() {
            (total / max_value).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
