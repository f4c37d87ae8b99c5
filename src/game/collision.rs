//! Walkability queries against the wall cells of the map.
//!
//! # Overview
//!
//! The player is a circle of radius `player_radius` on the XZ plane. Instead
//! of testing the circle against every wall square, each wall square is grown
//! by the radius on all four sides and the player's centre point is tested
//! against the grown boxes. A point is walkable when it lies inside the map
//! and inside none of the grown boxes.
//!
//! # Core Components
//!
//! * [`AABB`] - Axis-aligned rectangle on the XZ plane
//! * [`CollisionSystem`] - The precomputed wall list plus the walkability query
//!
//! # Corners
//!
//! Growing a square by a radius produces a box with square corners, not
//! rounded ones. Two walls meeting at an inside corner are two independent
//! box tests with no corner special-casing, so the player may end up slightly
//! closer to the corner than `player_radius`. This is the defined behaviour.

use crate::math::coordinates::constants::CELL_SIZE;
use crate::math::coordinates::world_to_cell;
use crate::math::vec::Vec2;
use crate::maze::{CellType, GridMap};

/// Axis-Aligned Bounding Box on the horizontal plane.
///
/// `min` and `max` are `[x, z]` corners. Containment is strict, so a point
/// lying exactly on the boundary is outside the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl AABB {
    /// Creates a new AABB from minimum and maximum corner points.
    pub fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    /// Returns a copy grown by `amount` on all four sides.
    pub fn expanded(&self, amount: f32) -> Self {
        Self {
            min: [self.min[0] - amount, self.min[1] - amount],
            max: [self.max[0] + amount, self.max[1] + amount],
        }
    }

    /// Checks whether `point` lies strictly inside the box.
    ///
    /// # Arguments
    ///
    /// * `point` - Position on the XZ plane (`point.y()` is world Z)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x() > self.min[0]
            && point.x() < self.max[0]
            && point.y() > self.min[1]
            && point.y() < self.max[1]
    }
}

/// Precomputed wall boxes for one map and one player radius.
///
/// Built once when the map is loaded. Every query is a linear scan over the
/// wall list, which stays well below a millisecond for hand-written mazes.
#[derive(Debug, Clone)]
pub struct CollisionSystem {
    /// Radius of the player's collision circle.
    pub player_radius: f32,
    rows: usize,
    columns: usize,
    /// Wall cells already expanded by `player_radius`.
    walls: Vec<AABB>,
}

impl CollisionSystem {
    /// Builds the collision data for `map`.
    ///
    /// # Arguments
    ///
    /// * `map` - The parsed grid; only [`CellType::Wall`] cells block movement
    /// * `player_radius` - Radius every wall box is grown by
    pub fn build_from_map(map: &GridMap, player_radius: f32) -> Self {
        let walls: Vec<AABB> = map
            .cells_of(CellType::Wall)
            .map(|cell| {
                let x = cell.col as f32 * CELL_SIZE;
                let z = cell.row as f32 * CELL_SIZE;
                AABB::new([x, z], [x + CELL_SIZE, z + CELL_SIZE]).expanded(player_radius)
            })
            .collect();

        let system = Self {
            player_radius,
            rows: map.rows(),
            columns: map.columns(),
            walls,
        };
        log::debug!(
            "Collision system built: {} wall boxes, player radius {}",
            system.wall_count(),
            player_radius
        );
        system
    }

    /// Returns whether the player's centre may occupy `point`.
    ///
    /// # Returns
    ///
    /// `false` when the point lies outside the map or inside any grown wall
    /// box, `true` otherwise. Any finite input gets an answer.
    pub fn is_walkable(&self, point: Vec2) -> bool {
        let (row, col) = world_to_cell(point);
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.columns {
            return false;
        }
        !self.walls.iter().any(|wall| wall.contains(point))
    }

    /// Number of wall boxes, one per wall cell.
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::parse_map;

    fn system(text: &str, radius: f32) -> CollisionSystem {
        CollisionSystem::build_from_map(&parse_map(text).unwrap(), radius)
    }

    #[test]
    fn test_out_of_bounds() {
        let collision = system("3x2\n@  \n   ", 0.25);
        for point in [
            Vec2::new(-0.01, 1.0),
            Vec2::new(1.0, -0.01),
            Vec2::new(6.0, 1.0),
            Vec2::new(1.0, 4.0),
            Vec2::new(100.0, 100.0),
        ] {
            assert!(!collision.is_walkable(point), "{:?} should be blocked", point);
        }
        assert!(collision.is_walkable(Vec2::new(0.0, 0.0)));
        assert!(collision.is_walkable(Vec2::new(5.99, 3.99)));
    }

    #[test]
    fn test_expanded_wall_box() {
        // Wall at row 1, col 1 covers x, z in [2, 4].
        let collision = system("3x3\n@  \n o \n   ", 0.25);
        assert_eq!(collision.wall_count(), 1);

        assert!(!collision.is_walkable(Vec2::new(3.0, 3.0)));
        assert!(!collision.is_walkable(Vec2::new(1.8, 3.0)));
        assert!(!collision.is_walkable(Vec2::new(3.0, 4.2)));
        assert!(!collision.is_walkable(Vec2::new(1.8, 1.8)));

        assert!(collision.is_walkable(Vec2::new(1.7, 3.0)));
        assert!(collision.is_walkable(Vec2::new(1.0, 1.0)));
        assert!(collision.is_walkable(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_boundary_is_walkable() {
        let collision = system("2x1\n@o", 0.5);
        assert!(collision.is_walkable(Vec2::new(1.5, 1.0)));
        assert!(!collision.is_walkable(Vec2::new(1.51, 1.0)));
    }

    #[test]
    fn test_non_wall_cells_are_walkable() {
        let collision = system("4x1\n@ASH", 0.25);
        assert_eq!(collision.wall_count(), 0);
        for x in [1.0, 3.0, 5.0, 7.0] {
            assert!(collision.is_walkable(Vec2::new(x, 1.0)));
        }
    }
}
