//! Mesh buffers for a single chunk.
//!
//! A [`ChunkMesh`] keeps positions, texture coordinates, tangents and indices as parallel
//! arrays. Positions are chunk-local, so a renderer translates the whole mesh by
//! [`crate::engine_state::voxels::chunk::Chunk::to_world_position`] of the local origin.

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::coords::BlockPosition;

use super::face::FaceTemplate;

/// The geometry produced for one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Chunk-local vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Atlas texture coordinates, one per vertex
    pub uvs: Vec<[f32; 2]>,
    /// Tangents, one per vertex
    pub tangents: Vec<[f32; 4]>,
    /// Triangle list indices into the vertex arrays
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        ChunkMesh::default()
    }

    /// Appends one quad built from `template` for the block at `local`.
    ///
    /// # Arguments
    /// * `template` - The fixed geometry of the face being emitted
    /// * `local` - The block's position inside its chunk
    /// * `base_uv` - The atlas tile origin for this face
    ///
    /// The template's indices are offset by the number of vertices already in the mesh.
    pub fn push_face(&mut self, template: &FaceTemplate, local: BlockPosition, base_uv: [f32; 2]) {
        let base_index = self.positions.len() as u32;

        for (corner, uv_offset) in template.corners.iter().zip(template.uv_offsets.iter()) {
            self.positions.push([
                local.x as f32 + corner[0],
                local.y as f32 + corner[1],
                local.z as f32 + corner[2],
            ]);
            self.uvs
                .push([base_uv[0] + uv_offset[0], base_uv[1] + uv_offset[1]]);
            self.tangents.push(template.tangent);
        }

        self.indices
            .extend(template.indices.iter().map(|index| base_index + index));
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the mesh holds no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Interleaves the parallel arrays into one vertex per entry.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(self.uvs.iter())
            .zip(self.tangents.iter())
            .map(|((position, uv), tangent)| Vertex::new(*position, *uv, *tangent))
            .collect()
    }

    /// The interleaved vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }

    /// The index buffer as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// The mesh as a list of triangles, for use as collision geometry.
    pub fn triangles(&self) -> Vec<[[f32; 3]; 3]> {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                [
                    self.positions[tri[0] as usize],
                    self.positions[tri[1] as usize],
                    self.positions[tri[2] as usize],
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    #[test]
    fn faces_offset_their_indices() {
        let mut mesh = ChunkMesh::new();
        assert!(mesh.is_empty());

        mesh.push_face(
            FaceTemplate::for_side(BlockSide::TOP),
            BlockPosition::new(0, 0, 0),
            [0.0, 1.0],
        );
        mesh.push_face(
            FaceTemplate::for_side(BlockSide::TOP),
            BlockPosition::new(1, 2, 3),
            [0.0, 1.0],
        );

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.indices.len(), 12);
        assert!(mesh.indices[6..].iter().all(|index| (4..8).contains(index)));
        assert_eq!(mesh.positions[4], [1.0, 3.0, 3.0]);
    }

    #[test]
    fn uvs_are_offset_from_the_tile_origin() {
        let mut mesh = ChunkMesh::new();
        let template = FaceTemplate::for_side(BlockSide::FRONT);
        mesh.push_face(template, BlockPosition::ZERO, [0.25, 0.75]);

        for (uv, offset) in mesh.uvs.iter().zip(template.uv_offsets.iter()) {
            assert_eq!(*uv, [0.25 + offset[0], 0.75 + offset[1]]);
        }
    }

    #[test]
    fn byte_views_match_the_arrays() {
        let mut mesh = ChunkMesh::new();
        mesh.push_face(
            FaceTemplate::for_side(BlockSide::LEFT),
            BlockPosition::ZERO,
            [0.0, 1.0],
        );

        assert_eq!(mesh.interleaved().len(), 4);
        assert_eq!(mesh.vertex_bytes().len(), 4 * std::mem::size_of::<Vertex>());
        assert_eq!(mesh.index_bytes().len(), 6 * std::mem::size_of::<u32>());
        assert_eq!(mesh.triangles().len(), 2);
    }
}
