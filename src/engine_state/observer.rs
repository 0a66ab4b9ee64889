//! # Observer
//!
//! The point of view the world streams around. The observer carries a position, a view
//! direction and the chunk loader that turns its position into a desired chunk set.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::coords::ChunkCoordinate;
use crate::engine_state::voxels::dimensions::WorldDimensions;
use crate::engine_state::voxels::loader::ChunkLoader;

/// A positioned viewer with a chunk loader attached.
pub struct Observer {
    /// Position in scene space
    pub position: Point3<f32>,
    /// View direction
    pub forward: Vector3<f32>,
    /// Whether the observer has been placed in a generated world
    active: bool,
    /// Strategy deciding which chunks stay resident
    loader: Box<dyn ChunkLoader>,
}

impl Observer {
    /// Creates an inactive observer at `position` looking along +Z.
    pub fn new(position: Point3<f32>, loader: Box<dyn ChunkLoader>) -> Self {
        Observer {
            position,
            forward: Vector3::new(0.0, 0.0, 1.0),
            active: false,
            loader,
        }
    }

    /// The chunks this observer wants loaded.
    pub fn desired_chunks(&self, dimensions: &WorldDimensions) -> Vec<ChunkCoordinate> {
        self.loader.loaded_chunks(self.position, dimensions)
    }

    /// Marks the observer as placed and ready.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Whether the observer has been placed.
    pub fn is_active(&self) -> bool {
        self.active
    }
}
