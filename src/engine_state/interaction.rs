//! # Block Interaction
//!
//! Picking, digging and placing blocks along the observer's line of sight.
//!
//! [`raycast`] walks the voxel grid cell by cell (a 3D DDA) and stops at the first opaque
//! block. The returned [`BlockHit`] records the face the ray entered through, which is where a
//! placed block ends up.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::block::block_type::BlockKind;
use crate::engine_state::voxels::coords::BlockPosition;
use crate::engine_state::voxels::world::World;
use crate::error::WorldError;

/// Default reach of an observer, in blocks.
pub const DEFAULT_REACH: f32 = 4.0;

/// The first opaque block along a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockHit {
    /// The block that was hit
    pub position: BlockPosition,
    /// The face of that block the ray entered through
    pub side: BlockSide,
    /// Distance from the ray origin to the entry point
    pub distance: f32,
}

impl BlockHit {
    /// The cell across the hit face, where a new block would be placed.
    pub fn adjacent(&self) -> BlockPosition {
        self.position + self.side.offset()
    }
}

/// The face a ray enters through when it steps along `axis` in direction `step`.
fn entry_side(axis: usize, step: i32) -> BlockSide {
    match (axis, step > 0) {
        (0, true) => BlockSide::LEFT,
        (0, false) => BlockSide::RIGHT,
        (1, true) => BlockSide::BOTTOM,
        (1, false) => BlockSide::TOP,
        (_, true) => BlockSide::FRONT,
        (_, false) => BlockSide::BACK,
    }
}

fn is_opaque(world: &World, pos: BlockPosition) -> bool {
    world
        .block(pos)
        .map(|block| !block.is_transparent())
        .unwrap_or(false)
}

/// Finds the first opaque block within `reach` of `origin` along `direction`.
///
/// Cells outside the world or in chunks that do not exist are treated as empty.
///
/// # Arguments
/// * `world` - The world to search
/// * `origin` - Start of the ray in scene space
/// * `direction` - Ray direction, need not be normalised
/// * `reach` - Maximum distance travelled along the ray
///
/// # Returns
/// The hit block, or `None` when nothing opaque is in reach, `direction` is zero, or any
/// input is not finite
pub fn raycast(
    world: &World,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    reach: f32,
) -> Option<BlockHit> {
    let finite = |v: [f32; 3]| v.iter().all(|c| c.is_finite());
    if !reach.is_finite()
        || !finite([origin.x, origin.y, origin.z])
        || !finite([direction.x, direction.y, direction.z])
    {
        return None;
    }

    let length = (direction.x * direction.x + direction.y * direction.y + direction.z * direction.z)
        .sqrt();
    if length <= f32::EPSILON {
        return None;
    }
    let dir = [direction.x / length, direction.y / length, direction.z / length];
    let start = [origin.x, origin.y, origin.z];

    let mut cell = [
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    ];
    let mut step = [0i32; 3];
    let mut t_delta = [f32::MAX; 3];
    let mut t_max = [f32::MAX; 3];

    for axis in 0..3 {
        if dir[axis] > 0.0 {
            step[axis] = 1;
            t_delta[axis] = 1.0 / dir[axis];
            t_max[axis] = (cell[axis] as f32 + 1.0 - start[axis]) * t_delta[axis];
        } else if dir[axis] < 0.0 {
            step[axis] = -1;
            t_delta[axis] = -1.0 / dir[axis];
            t_max[axis] = (start[axis] - cell[axis] as f32) * t_delta[axis];
        }
    }

    let to_position = |cell: [i32; 3]| BlockPosition::new(cell[0], cell[1], cell[2]);

    // A ray starting inside a block hits it through the face it points away from.
    if is_opaque(world, to_position(cell)) {
        let axis = (0..3)
            .max_by(|a, b| dir[*a].abs().total_cmp(&dir[*b].abs()))
            .unwrap_or(0);
        return Some(BlockHit {
            position: to_position(cell),
            side: entry_side(axis, step[axis]),
            distance: 0.0,
        });
    }

    loop {
        let axis = if t_max[0] < t_max[1] {
            if t_max[0] < t_max[2] {
                0
            } else {
                2
            }
        } else if t_max[1] < t_max[2] {
            1
        } else {
            2
        };

        let distance = t_max[axis];
        if distance > reach {
            return None;
        }

        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        if is_opaque(world, to_position(cell)) {
            return Some(BlockHit {
                position: to_position(cell),
                side: entry_side(axis, step[axis]),
                distance,
            });
        }
    }
}

/// Removes the hit block, replacing it with air.
///
/// # Errors
/// Propagates failures from [`World::set_block`].
pub fn dig(world: &mut World, hit: &BlockHit) -> Result<(), WorldError> {
    world.set_block(hit.position, BlockKind::AIR)
}

/// Places a block of `kind` in the cell across the hit face.
///
/// # Returns
/// `false` when that cell lies outside the world and nothing was placed
///
/// # Errors
/// Propagates failures from [`World::set_block`].
pub fn place(world: &mut World, hit: &BlockHit, kind: BlockKind) -> Result<bool, WorldError> {
    let target = hit.adjacent();
    if !world.is_valid(target) {
        return Ok(false);
    }

    world.set_block(target, kind)?;
    Ok(true)
}
