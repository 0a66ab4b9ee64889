//! # Error Module
//!
//! Error types shared by the world, chunk and configuration code.
//!
//! Core operations return [`WorldError`] and propagate it with `?`. Configuration
//! loading returns [`ConfigError`], which wraps the I/O and JSON layers underneath it.

use std::fmt;

use crate::engine_state::rendering::meshing::ModelKind;
use crate::engine_state::voxels::coords::{BlockPosition, ChunkCoordinate};

/// Failures raised by the voxel world and its chunks.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// A block position outside the world envelope was used for a lookup or edit.
    InvalidBlockPosition(BlockPosition),
    /// A chunk coordinate outside the world envelope was requested.
    InvalidChunkCoordinate(ChunkCoordinate),
    /// A chunk was read or meshed before `generate_chunk` populated it.
    ChunkNotGenerated(ChunkCoordinate),
    /// A read-only neighbour query hit a chunk that was never created.
    ChunkNotPresent(ChunkCoordinate),
    /// No model has been registered for a block's model kind.
    MissingModel(ModelKind),
    /// The world was configured inconsistently (fatal at start-up).
    Configuration(String),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::InvalidBlockPosition(pos) => write!(f, "Invalid block position {}", pos),
            WorldError::InvalidChunkCoordinate(coord) => {
                write!(f, "Invalid chunk position {}", coord)
            }
            WorldError::ChunkNotGenerated(coord) => write!(
                f,
                "Could not use chunk {} because it hasn't generated yet",
                coord
            ),
            WorldError::ChunkNotPresent(coord) => {
                write!(f, "Chunk {} is not present in the world", coord)
            }
            WorldError::MissingModel(kind) => {
                write!(f, "No model registered for model kind {:?}", kind)
            }
            WorldError::Configuration(message) => write!(f, "Invalid world configuration: {}", message),
        }
    }
}

impl std::error::Error for WorldError {}

/// Failures raised while reading or validating a [`crate::config::WorldConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The configuration file is not valid JSON for the expected schema.
    Parse(serde_json::Error),
    /// The configuration parsed but holds out-of-range values.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "Could not read configuration: {}", err),
            ConfigError::Parse(err) => write!(f, "Could not parse configuration: {}", err),
            ConfigError::Invalid(message) => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
