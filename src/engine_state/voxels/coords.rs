//! # Coordinates Module
//!
//! Integer coordinate types for the voxel world.
//!
//! * [`BlockPosition`] addresses a single block in world space.
//! * [`ChunkCoordinate`] addresses a chunk slot in chunk space.
//!
//! Both are plain value types with component-wise `+`/`-`. Their ordering is partial: `a < b`
//! only holds when every axis of `a` is strictly smaller than the same axis of `b`. It exists
//! for bound checks and must not be used for sorting.
//!
//! `a <= b` means `a == b || a < b`, so `(0, 0, 0) <= (1, 0, 1)` is false. Inclusive bounds
//! that allow equality on some axes use [`BlockPosition::all_le`] and
//! [`BlockPosition::all_ge`] instead.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use cgmath::Point3;

macro_rules! coordinate_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
        pub struct $name {
            /// X component
            pub x: i32,
            /// Y component (vertical)
            pub y: i32,
            /// Z component
            pub z: i32,
        }

        impl $name {
            /// The origin.
            pub const ZERO: $name = $name { x: 0, y: 0, z: 0 };

            /// Creates a new coordinate from its components.
            pub const fn new(x: i32, y: i32, z: i32) -> Self {
                $name { x, y, z }
            }

            /// Squared euclidean distance to `other`.
            pub fn distance_squared(&self, other: &$name) -> i64 {
                let dx = (self.x - other.x) as i64;
                let dy = (self.y - other.y) as i64;
                let dz = (self.z - other.z) as i64;
                dx * dx + dy * dy + dz * dz
            }

            /// Whether every axis is less than or equal to the same axis of `other`.
            pub fn all_le(&self, other: &$name) -> bool {
                self.x <= other.x && self.y <= other.y && self.z <= other.z
            }

            /// Whether every axis is greater than or equal to the same axis of `other`.
            pub fn all_ge(&self, other: &$name) -> bool {
                self.x >= other.x && self.y >= other.y && self.z >= other.z
            }

            /// Converts to the centre of the cell in continuous space.
            pub fn to_scene_position(&self) -> Point3<f32> {
                Point3::new(
                    self.x as f32 + 0.5,
                    self.y as f32 + 0.5,
                    self.z as f32 + 0.5,
                )
            }
        }

        impl Add for $name {
            type Output = $name;

            fn add(self, rhs: $name) -> $name {
                $name::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
            }
        }

        impl Sub for $name {
            type Output = $name;

            fn sub(self, rhs: $name) -> $name {
                $name::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &$name) -> Option<Ordering> {
                if self == other {
                    Some(Ordering::Equal)
                } else if self.x < other.x && self.y < other.y && self.z < other.z {
                    Some(Ordering::Less)
                } else if self.x > other.x && self.y > other.y && self.z > other.z {
                    Some(Ordering::Greater)
                } else {
                    None
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({}, {}, {})", self.x, self.y, self.z)
            }
        }

        impl From<Point3<i32>> for $name {
            fn from(point: Point3<i32>) -> Self {
                $name::new(point.x, point.y, point.z)
            }
        }

        impl From<$name> for Point3<i32> {
            fn from(coord: $name) -> Self {
                Point3::new(coord.x, coord.y, coord.z)
            }
        }
    };
}

coordinate_type!(
    /// A block position in world space, one unit per block.
    BlockPosition
);

coordinate_type!(
    /// The coordinate of a chunk slot, one unit per chunk.
    ChunkCoordinate
);

impl BlockPosition {
    /// Converts a continuous scene position to the block that contains it.
    ///
    /// Each axis is floored, so `-0.2` lands in block `-1` rather than `0`.
    pub fn from_scene_position(point: Point3<f32>) -> Self {
        BlockPosition::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_component_wise() {
        let a = BlockPosition::new(1, 2, 3);
        let b = BlockPosition::new(-4, 5, 0);
        assert_eq!(a + b, BlockPosition::new(-3, 7, 3));
        assert_eq!(a - b, BlockPosition::new(5, -3, 3));
    }

    #[test]
    fn ordering_requires_every_axis() {
        let low = BlockPosition::new(0, 0, 0);
        let high = BlockPosition::new(1, 1, 1);
        let mixed = BlockPosition::new(1, 0, 1);

        assert!(low < high);
        assert!(high > low);
        assert!(!(low < mixed));
        assert!(!(mixed > low));
        assert_eq!(low.partial_cmp(&mixed), None);
        assert!(low <= low);
        assert!(!(low <= mixed));
    }

    #[test]
    fn inclusive_bounds_compare_each_axis() {
        let low = BlockPosition::new(0, 0, 0);
        let mixed = BlockPosition::new(1, 0, 1);

        assert!(low.all_le(&mixed));
        assert!(mixed.all_ge(&low));
        assert!(low.all_le(&low));
        assert!(!mixed.all_le(&low));
        assert!(!low.all_ge(&BlockPosition::new(-1, 1, -1)));
    }

    #[test]
    fn scene_position_is_cell_centre() {
        let pos = BlockPosition::new(2, -1, 0);
        assert_eq!(pos.to_scene_position(), Point3::new(2.5, -0.5, 0.5));
        assert_eq!(BlockPosition::from_scene_position(pos.to_scene_position()), pos);
    }

    #[test]
    fn scene_position_floors_negative_values() {
        let pos = BlockPosition::from_scene_position(Point3::new(-0.2, 3.9, 0.0));
        assert_eq!(pos, BlockPosition::new(-1, 3, 0));
    }

    #[test]
    fn display_matches_tuple_form() {
        assert_eq!(ChunkCoordinate::new(1, 0, -2).to_string(), "(1, 0, -2)");
    }
}
