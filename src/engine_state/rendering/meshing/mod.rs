//! Mesh generation for voxel chunks.
//!
//! This module handles the conversion of chunk block data into renderable, collidable
//! triangle meshes.
//!
//! # Architecture
//! - [`FaceTemplate`]: the fixed quad emitted for each side of a unit cube
//! - [`Model`]: turns one block into geometry, looked up through a [`ModelRegistry`]
//! - [`ChunkMesh`]: the parallel vertex/UV/tangent/index arrays produced for one chunk
//!
//! # Face Culling
//! A face is skipped when the block on the other side of it is opaque. Faces on the outer
//! boundary of the world have no neighbour and are always emitted. Culling can be switched
//! off per world, in which case every opaque block emits all six faces.

mod chunk_mesh;
mod face;
mod model;

pub use chunk_mesh::ChunkMesh;
pub use face::{FaceTemplate, BOTTOM_LEFT, BOTTOM_RIGHT, TOP_LEFT, TOP_RIGHT};
pub use model::{CubeModel, Model, ModelContext, ModelKind, ModelRegistry};
