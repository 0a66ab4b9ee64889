//! # Block Type Module
//!
//! This module defines the block catalog: the fixed set of materials a block can be made of.
//!
//! * [`BlockKind`] is the stable tag stored in every block.
//! * [`BlockType`] is the immutable descriptor behind a tag: name, transparency, texture
//!   coordinates and the model used to emit geometry.
//!
//! Descriptors live in a single immutable table, so two blocks of the same kind always share
//! the same descriptor.

use num_derive::FromPrimitive;

use crate::engine_state::rendering::meshing::ModelKind;

use super::block_side::BlockSide;

/// Width (and height) of one atlas tile in normalized UV units: a 32px tile in a 512px atlas.
pub const TEXTURE_TILE_SIZE: f32 = 32.0 / 512.0;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from the compact integer id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockKind {
    /// Empty space. Transparent and never meshed.
    AIR,

    /// Grass-topped soil, with distinct top, bottom and side textures.
    GRASS,

    /// Plain soil.
    DIRT,

    /// Solid rock, carved by the cave generator.
    STONE,

    /// A wooden block.
    WOOD,

    /// A door block.
    DOOR,

    /// The floor of the world, laid by the cave generator.
    BEDROCK,
}

/// Per-face texture origins for a block type.
///
/// UVs use a top-left tile origin inside the atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UvTable {
    /// One tile shared by all six faces.
    Uniform([f32; 2]),
    /// One tile per face, indexed by [`BlockSide`].
    PerFace([[f32; 2]; 6]),
}

/// The immutable descriptor for a [`BlockKind`].
#[derive(Debug, PartialEq)]
pub struct BlockType {
    /// The tag this descriptor belongs to
    pub kind: BlockKind,
    /// Symbolic name, e.g. `blocks.grass`
    pub name: &'static str,
    /// Transparent blocks emit no geometry and never hide a neighbour's face
    pub transparent: bool,
    /// Texture origins, absent for blocks that are never drawn
    pub uvs: Option<UvTable>,
    /// The model that emits this block's geometry
    pub model: ModelKind,
}

/// UV origin of an atlas row, counting down from the top edge.
macro_rules! atlas_row {
    ($row:expr) => {
        [0.0, 1.0 - $row as f32 * TEXTURE_TILE_SIZE]
    };
}

/// The block catalog, indexed by `BlockKind as usize`.
static BLOCK_TYPES: [BlockType; 7] = [
    BlockType {
        kind: BlockKind::AIR,
        name: "blocks.air",
        transparent: true,
        uvs: None,
        model: ModelKind::Cube,
    },
    BlockType {
        kind: BlockKind::GRASS,
        name: "blocks.grass",
        transparent: false,
        // [FRONT, BACK, TOP, BOTTOM, LEFT, RIGHT]
        uvs: Some(UvTable::PerFace([
            atlas_row!(1),
            atlas_row!(1),
            atlas_row!(0),
            atlas_row!(2),
            atlas_row!(1),
            atlas_row!(1),
        ])),
        model: ModelKind::Cube,
    },
    BlockType {
        kind: BlockKind::DIRT,
        name: "blocks.dirt",
        transparent: false,
        uvs: Some(UvTable::Uniform(atlas_row!(2))),
        model: ModelKind::Cube,
    },
    BlockType {
        kind: BlockKind::STONE,
        name: "blocks.stone",
        transparent: false,
        uvs: Some(UvTable::Uniform(atlas_row!(3))),
        model: ModelKind::Cube,
    },
    BlockType {
        kind: BlockKind::WOOD,
        name: "blocks.wood",
        transparent: false,
        uvs: Some(UvTable::Uniform(atlas_row!(3))),
        model: ModelKind::Cube,
    },
    BlockType {
        kind: BlockKind::DOOR,
        name: "blocks.door",
        transparent: false,
        uvs: Some(UvTable::Uniform(atlas_row!(4))),
        model: ModelKind::Cube,
    },
    BlockType {
        kind: BlockKind::BEDROCK,
        name: "blocks.bedrock",
        transparent: false,
        uvs: Some(UvTable::Uniform(atlas_row!(4))),
        model: ModelKind::Cube,
    },
];

impl BlockKind {
    /// Every kind in the catalog, in id order.
    pub fn all() -> [BlockKind; 7] {
        [
            BlockKind::AIR,
            BlockKind::GRASS,
            BlockKind::DIRT,
            BlockKind::STONE,
            BlockKind::WOOD,
            BlockKind::DOOR,
            BlockKind::BEDROCK,
        ]
    }

    /// Converts a compact id back to a kind, or `None` for unknown ids.
    pub fn from_id(id: u8) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }

    /// The compact integer id of this kind.
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// The shared descriptor for this kind.
    pub fn block_type(&self) -> &'static BlockType {
        &BLOCK_TYPES[*self as usize]
    }
}

impl BlockType {
    /// Texture origin for one face.
    ///
    /// Transparent blocks and blocks without a UV table map to the atlas origin.
    pub fn uv(&self, side: BlockSide) -> [f32; 2] {
        if self.transparent {
            return [0.0, 0.0];
        }

        match self.uvs {
            Some(UvTable::Uniform(uv)) => uv,
            Some(UvTable::PerFace(uvs)) => uvs[side as usize],
            None => [0.0, 0.0],
        }
    }

    /// Whether this descriptor can be drawn: opaque blocks need a UV table.
    pub fn is_renderable(&self) -> bool {
        self.transparent || self.uvs.is_some()
    }
}
