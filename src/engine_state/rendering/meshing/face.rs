//! Fixed per-face geometry for a unit cube.
//!
//! Every visible block face becomes one quad: four vertices and two triangles. The corner
//! offsets, atlas quadrant offsets, tangent and winding for each side never change, so they
//! live in a static table indexed by [`BlockSide`].

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::TEXTURE_TILE_SIZE};

/// Atlas quadrant offsets from a tile's top-left UV origin.
///
/// V grows upwards in mesh space, so the bottom of a tile is a negative V offset.
pub const TOP_LEFT: [f32; 2] = [0.0, 0.0];
/// Offset to the top-right corner of a tile.
pub const TOP_RIGHT: [f32; 2] = [TEXTURE_TILE_SIZE, 0.0];
/// Offset to the bottom-left corner of a tile.
pub const BOTTOM_LEFT: [f32; 2] = [0.0, -TEXTURE_TILE_SIZE];
/// Offset to the bottom-right corner of a tile.
pub const BOTTOM_RIGHT: [f32; 2] = [TEXTURE_TILE_SIZE, -TEXTURE_TILE_SIZE];

const TANGENT_X: [f32; 4] = [1.0, 0.0, 0.0, -1.0];
const TANGENT_Y: [f32; 4] = [0.0, 1.0, 0.0, -1.0];
const TANGENT_Z: [f32; 4] = [0.0, 0.0, 1.0, -1.0];

/// The geometry emitted for one face of a unit cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceTemplate {
    /// Corner offsets from the block's minimum corner
    pub corners: [[f32; 3]; 4],
    /// Atlas quadrant offset added to the block type's UV for each corner
    pub uv_offsets: [[f32; 2]; 4],
    /// Tangent shared by all four corners
    pub tangent: [f32; 4],
    /// Two triangles, as indices into `corners`, wound to face outwards
    pub indices: [u32; 6],
}

/// Face templates indexed by `BlockSide as usize`.
static FACE_TEMPLATES: [FaceTemplate; 6] = [
    // FRONT (-Z)
    FaceTemplate {
        corners: [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
        ],
        uv_offsets: [BOTTOM_LEFT, BOTTOM_RIGHT, TOP_LEFT, TOP_RIGHT],
        tangent: TANGENT_Y,
        indices: [0, 3, 1, 0, 2, 3],
    },
    // BACK (+Z)
    FaceTemplate {
        corners: [
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ],
        uv_offsets: [BOTTOM_LEFT, BOTTOM_RIGHT, TOP_LEFT, TOP_RIGHT],
        tangent: TANGENT_Y,
        indices: [1, 2, 0, 1, 3, 2],
    },
    // TOP (+Y)
    FaceTemplate {
        corners: [
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        uv_offsets: [TOP_LEFT, TOP_RIGHT, BOTTOM_RIGHT, BOTTOM_LEFT],
        tangent: TANGENT_X,
        indices: [0, 2, 1, 0, 3, 2],
    },
    // BOTTOM (-Y)
    FaceTemplate {
        corners: [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
        uv_offsets: [TOP_LEFT, TOP_RIGHT, BOTTOM_RIGHT, BOTTOM_LEFT],
        tangent: TANGENT_X,
        indices: [0, 1, 2, 0, 2, 3],
    },
    // LEFT (-X)
    FaceTemplate {
        corners: [
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
        ],
        uv_offsets: [BOTTOM_LEFT, TOP_RIGHT, BOTTOM_RIGHT, TOP_LEFT],
        tangent: TANGENT_Z,
        indices: [0, 3, 1, 0, 2, 3],
    },
    // RIGHT (+X)
    FaceTemplate {
        corners: [
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
        ],
        uv_offsets: [BOTTOM_RIGHT, TOP_LEFT, BOTTOM_LEFT, TOP_RIGHT],
        tangent: TANGENT_Z,
        indices: [0, 3, 2, 0, 1, 3],
    },
];

impl FaceTemplate {
    /// The template for one side of a cube.
    pub fn for_side(side: BlockSide) -> &'static FaceTemplate {
        &FACE_TEMPLATES[side as usize]
    }
}
