//! Vertex data structures for chunk meshes.
//!
//! Chunk meshes are kept as parallel arrays (see [`super::meshing::ChunkMesh`]). This module
//! defines the interleaved layout handed to a renderer when it wants one buffer per mesh.

/// A single interleaved mesh vertex.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: 2x f32 (8 bytes)
/// - Tangent: 4x f32 (16 bytes), the last component is the handedness
///
/// Total size: 36 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// UV texture coordinates inside the atlas
    pub tex_coords: [f32; 2],
    /// Tangent along the face's axis, `w` holds the handedness
    pub tangent: [f32; 4],
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(position: [f32; 3], tex_coords: [f32; 2], tangent: [f32; 4]) -> Self {
        Vertex {
            position,
            tex_coords,
            tangent,
        }
    }
}
