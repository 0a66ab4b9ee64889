//! # Voxel World Entry Point
//!
//! Generates a world and logs what was built. It simply calls into the library's `run()`
//! function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    voxel_world::run();
}
