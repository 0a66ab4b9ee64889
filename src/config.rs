//! # Configuration
//!
//! World settings loaded from JSON. Every field has a default, so an empty object `{}` is a
//! complete configuration.
//!
//! ```json
//! {
//!     "chunks": [6, 2, 6],
//!     "chunk_size": [16, 16, 16],
//!     "seed": 42,
//!     "generators": [
//!         { "kind": "cave", "cave_threshold": 0.55 },
//!         { "kind": "surface", "surface_level": 16, "height_scale": 12.0 }
//!     ],
//!     "loader": { "kind": "spherical", "radius": 4 }
//! }
//! ```

use std::path::Path;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::dimensions::WorldDimensions;
use crate::engine_state::voxels::generation::{
    CaveSettings, CaveWorldGenerator, SurfaceSettings, SurfaceWorldGenerator, WorldGenerator,
};
use crate::engine_state::voxels::loader::{ChunkLoader, ColumnChunkLoader, SphericalChunkLoader};
use crate::error::ConfigError;

/// The generator assigned to one vertical chunk layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeneratorConfig {
    /// Height-field terrain
    Surface(SurfaceSettings),
    /// Noise caves on a bedrock floor
    Cave(CaveSettings),
}

impl GeneratorConfig {
    /// Creates the generator described by this entry.
    pub fn build(&self) -> Box<dyn WorldGenerator> {
        match self {
            GeneratorConfig::Surface(settings) => {
                Box::new(SurfaceWorldGenerator::new(settings.clone()))
            }
            GeneratorConfig::Cave(settings) => Box::new(CaveWorldGenerator::new(settings.clone())),
        }
    }

    fn validate(&self, layer: usize) -> Result<(), ConfigError> {
        let (octaves, persistence, sizes) = match self {
            GeneratorConfig::Surface(s) => (s.octaves, s.persistence, vec![s.x_size, s.z_size]),
            GeneratorConfig::Cave(c) => {
                (c.octaves, c.persistence, vec![c.x_size, c.y_size, c.z_size])
            }
        };

        if octaves < 1 {
            return Err(ConfigError::Invalid(format!(
                "generator {} needs at least one octave",
                layer
            )));
        }
        if persistence <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "generator {} persistence must be positive, got {}",
                layer, persistence
            )));
        }
        if sizes.iter().any(|size| *size <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "generator {} noise sizes must be positive",
                layer
            )));
        }
        Ok(())
    }
}

/// The chunk loader attached to the observer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LoaderConfig {
    /// A filled sphere of chunks
    Spherical {
        /// Load distance, in chunks
        radius: i32,
    },
    /// A disc of full-height chunk columns
    Column {
        /// Load distance, in chunks
        radius: i32,
    },
}

impl LoaderConfig {
    /// Creates the loader described by this entry.
    pub fn build(&self) -> Box<dyn ChunkLoader> {
        match self {
            LoaderConfig::Spherical { radius } => Box::new(SphericalChunkLoader::new(*radius)),
            LoaderConfig::Column { radius } => Box::new(ColumnChunkLoader::new(*radius)),
        }
    }

    fn radius(&self) -> i32 {
        match self {
            LoaderConfig::Spherical { radius } | LoaderConfig::Column { radius } => *radius,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig::Spherical { radius: 4 }
    }
}

/// Settings for a world and the observer that explores it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of chunks along each axis
    pub chunks: [i32; 3],
    /// Size of each chunk, in blocks
    pub chunk_size: [i32; 3],
    /// Cull faces hidden by opaque neighbours
    pub optimise_mesh: bool,
    /// Spawn column as a fraction of the world's X and Z extent
    pub spawn_position: [f32; 2],
    /// Seed for generator set-up, random when absent
    pub seed: Option<u64>,
    /// Seconds between periodic chunk updates
    pub update_interval_secs: f64,
    /// One generator per vertical chunk layer, bottom first
    pub generators: Vec<GeneratorConfig>,
    /// The observer's chunk loader
    pub loader: LoaderConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            chunks: [6, 2, 6],
            chunk_size: [16, 16, 16],
            optimise_mesh: true,
            spawn_position: [0.0, 0.0],
            seed: None,
            update_interval_secs: 1.0,
            generators: vec![
                GeneratorConfig::Cave(CaveSettings::default()),
                GeneratorConfig::Surface(SurfaceSettings {
                    surface_level: 16,
                    height_scale: 12.0,
                    ..SurfaceSettings::default()
                }),
            ],
            loader: LoaderConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from JSON text and validates it.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`] for
    /// out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`WorldConfig::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The world extents described by this configuration.
    pub fn dimensions(&self) -> WorldDimensions {
        WorldDimensions::new(
            Vector3::from(self.chunk_size),
            Vector3::from(self.chunks),
        )
    }

    /// Checks every value for range errors.
    ///
    /// The number of generators is not checked here; the world rejects a mismatch when it
    /// is created.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunks.iter().any(|c| *c <= 0) {
            return Err(ConfigError::Invalid(format!(
                "chunk counts must be positive, got {:?}",
                self.chunks
            )));
        }
        if self.chunk_size.iter().any(|c| *c <= 0) {
            return Err(ConfigError::Invalid(format!(
                "chunk sizes must be positive, got {:?}",
                self.chunk_size
            )));
        }
        if self
            .spawn_position
            .iter()
            .any(|p| !(0.0..1.0).contains(p))
        {
            return Err(ConfigError::Invalid(format!(
                "spawn position must lie in [0, 1), got {:?}",
                self.spawn_position
            )));
        }
        if !(self.update_interval_secs >= 0.0 && self.update_interval_secs.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "update interval must be a non-negative number of seconds, got {}",
                self.update_interval_secs
            )));
        }
        let max_radius = self.chunks.iter().map(|c| *c as i64).sum::<i64>();
        if !(0..=max_radius).contains(&(self.loader.radius() as i64)) {
            return Err(ConfigError::Invalid(format!(
                "loader radius must lie in [0, {}], got {}",
                max_radius,
                self.loader.radius()
            )));
        }

        for (layer, generator) in self.generators.iter().enumerate() {
            generator.validate(layer)?;
        }

        Ok(())
    }
}
