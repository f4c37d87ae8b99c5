//! Coordinate system transformations for the maze.
//!
//! The game uses two coordinate systems:
//! - Grid Coordinates: (row, column) indices into the parsed map
//! - World Coordinates: 3D space where the player moves (x, y, z)
//!
//! Grid cell (r, c) covers world X in `[2c, 2c + 2]` and Z in `[2r, 2r + 2]`.
//! The world origin sits on the map corner, Y points up, the floor is at
//! `y = 0` and the ceiling at [`constants::WALL_HEIGHT`].

mod transformations;

pub use transformations::*;

/// World-space dimensions shared by collision, spawning and rendering.
pub mod constants {
    /// Edge length of one grid cell in world units.
    pub const CELL_SIZE: f32 = 2.0;

    /// Height of a wall block, which is also the ceiling height.
    pub const WALL_HEIGHT: f32 = 3.0;
}
