//! Rendering data for the voxel engine.
//!
//! The engine does not talk to a graphics API itself. This module produces the geometry a
//! renderer or physics layer consumes: per-chunk meshes and the interleaved vertex layout.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
