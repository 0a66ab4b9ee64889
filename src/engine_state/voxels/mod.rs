//! # Voxel Engine Core
//!
//! This module contains the core voxel functionality: representing, generating, editing and
//! streaming a chunked block world.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Coordinates**: Integer block and chunk positions
//! * **Block**: The block catalog and per-voxel block states
//! * **Chunk**: Fixed-size boxes of blocks that are generated and meshed as a unit
//! * **Generation**: Noise-driven generators that decide each block's kind
//! * **Loader**: Strategies that pick the chunks to keep around an observer
//! * **World**: Coordinates chunks and provides a unified interface for the entire voxel space
//!
//! ## Data Flow
//!
//! 1. A chunk loader computes the desired chunk set around the observer
//! 2. The world creates missing chunks and generates them through the layer's generator
//! 3. The world periodically re-meshes dirty loaded chunks and evicts unwanted ones
//! 4. Block edits mark the owning chunk and any touching neighbour dirty, then rebuild

pub mod block;
pub mod chunk;
pub mod coords;
pub mod dimensions;
pub mod generation;
pub mod loader;
pub mod world;
