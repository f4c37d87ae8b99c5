//! Conversions between grid cells and world positions.

use super::constants::CELL_SIZE;
use crate::math::vec::{Vec2, Vec3};
use crate::maze::Cell;

/// Returns the world position of the centre of `cell` at height `y`.
///
/// # Arguments
/// * `cell` - The grid cell (row, col)
/// * `y` - The desired y-coordinate (height) in the world
///
/// # Returns
/// `(2c + 1, y, 2r + 1)` for a cell size of 2
pub fn cell_center(cell: Cell, y: f32) -> Vec3 {
    Vec3::new(
        cell.col as f32 * CELL_SIZE + CELL_SIZE * 0.5,
        y,
        cell.row as f32 * CELL_SIZE + CELL_SIZE * 0.5,
    )
}

/// Returns the signed grid indices `(row, col)` containing a horizontal point.
///
/// The result is not bounds-checked; negative or too-large indices mean the
/// point lies outside the map.
///
/// # Arguments
/// * `point` - World position on the XZ plane (`point.y()` is world Z)
pub fn world_to_cell(point: Vec2) -> (i64, i64) {
    let col = (point.x() / CELL_SIZE).floor() as i64;
    let row = (point.y() / CELL_SIZE).floor() as i64;
    (row, col)
}
