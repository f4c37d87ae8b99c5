//! Input-driven movement with axis-separated wall sliding.
//!
//! # Movement Process
//!
//! 1. The held keys are combined into a unit (or zero) 2D input vector
//! 2. The camera's front/right vectors are flattened onto the XZ plane
//! 3. The desired position is tested against the [`CollisionSystem`]
//! 4. If blocked, X and then Z are tried on their own so the player slides
//!    along the wall instead of stopping dead

use crate::game::collision::CollisionSystem;
use crate::game::player::Player;
use crate::math::vec::{Vec2, Vec3};

/// Input vectors shorter than this count as standing still.
const MOVING_EPSILON: f32 = 1e-6;

/// The four movement keys sampled for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    /// Combines the keys into a direction, `x` to the right and `y` forward.
    ///
    /// Opposite keys cancel. A diagonal is normalized so it is no faster than
    /// a straight move.
    pub fn direction(&self) -> Vec2 {
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        Vec2::new(
            axis(self.right, self.left),
            axis(self.forward, self.backward),
        )
        .normalize()
    }
}

impl Player {
    /// Moves the logical position by one frame of input, sliding along walls.
    ///
    /// Uses the orientation as it stood after the previous frame's mouse
    /// update. Sets [`Player::is_moving`] before the position changes.
    ///
    /// # Arguments
    ///
    /// * `collision_system` - Walkability queries for the current map
    /// * `input` - Unit or zero direction, `x` right and `y` forward
    /// * `delta_time` - Time elapsed since last frame in seconds
    pub fn move_with_collision(
        &mut self,
        collision_system: &CollisionSystem,
        input: Vec2,
        delta_time: f32,
    ) {
        self.is_moving = input.length_squared() > MOVING_EPSILON;
        if !self.is_moving {
            return;
        }

        let forward = self.orientation.front().with_y(0.0).normalize();
        let right = self.orientation.right().with_y(0.0).normalize();
        let delta = (forward * input.y() + right * input.x()) * (self.config.speed * delta_time);

        let current = self.position;
        let desired = current + delta;

        if collision_system.is_walkable(desired.xz()) {
            self.position = desired;
            return;
        }

        // Slide: X first, then Z against the possibly updated X.
        let mut x = current.x();
        let mut z = current.z();
        if collision_system.is_walkable(Vec2::new(desired.x(), z)) {
            x = desired.x();
        }
        if collision_system.is_walkable(Vec2::new(x, desired.z())) {
            z = desired.z();
        }
        self.position = Vec3::new(x, current.y(), z);
        log::trace!("Slid from {:?} to {:?}", current, self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementConfig;
    use crate::game::orientation::Orientation;
    use crate::math::coordinates::world_to_cell;
    use crate::maze::parse_map;

    fn player_at(x: f32, z: f32, yaw: f32, config: MovementConfig) -> Player {
        let mut player = Player::new(Vec3::new(x, config.eye_height, z), config);
        player.orientation = Orientation::new(0.0, yaw);
        player
    }

    fn unit_speed(radius: f32) -> MovementConfig {
        MovementConfig {
            speed: 1.0,
            player_radius: radius,
            ..MovementConfig::default()
        }
    }

    #[test]
    fn test_input_direction() {
        let none = MovementInput::default();
        assert_eq!(none.direction(), Vec2::ZERO);

        let cancel = MovementInput {
            forward: true,
            backward: true,
            ..Default::default()
        };
        assert_eq!(cancel.direction(), Vec2::ZERO);

        let diagonal = MovementInput {
            forward: true,
            right: true,
            ..Default::default()
        };
        let direction = diagonal.direction();
        assert!((direction.length() - 1.0).abs() < 1e-6);
        assert!(direction.x() > 0.0 && direction.y() > 0.0);
    }

    #[test]
    fn test_free_move_ignores_pitch() {
        let map = parse_map("3x3\n@  \n   \n   ").unwrap();
        let config = unit_speed(0.25);
        let collision = CollisionSystem::build_from_map(&map, config.player_radius);
        let mut player = player_at(3.0, 3.0, -90.0, config);
        player.orientation = Orientation::new(60.0, -90.0);

        player.move_with_collision(&collision, Vec2::new(0.0, 1.0), 0.5);
        assert!(player.is_moving);
        assert!((player.position - Vec3::new(3.0, config.eye_height, 2.5)).length() < 1e-5);
    }

    #[test]
    fn test_slide_along_wall() {
        // Wall at row 0, col 1; grown box x in [1.75, 4.25].
        let map = parse_map("2x2\n@o\n  ").unwrap();
        let config = unit_speed(0.25);
        let collision = CollisionSystem::build_from_map(&map, config.player_radius);
        let mut player = player_at(1.7, 1.0, 45.0, config);

        player.move_with_collision(&collision, Vec2::new(0.0, 1.0), 0.1);

        let step = 0.1 * std::f32::consts::FRAC_1_SQRT_2;
        assert_eq!(player.position.x(), 1.7);
        assert!((player.position.z() - (1.0 + step)).abs() < 1e-5);
    }

    #[test]
    fn test_blocked_in_corner() {
        // Walls to the east and south of the start cell.
        let map = parse_map("2x2\n@o\noo").unwrap();
        let config = unit_speed(0.25);
        let collision = CollisionSystem::build_from_map(&map, config.player_radius);
        let mut player = player_at(1.74, 1.74, 45.0, config);
        let before = player.position;

        player.move_with_collision(&collision, Vec2::new(0.0, 1.0), 0.1);
        assert_eq!(player.position, before);
        assert!(player.is_moving);
    }

    #[test]
    fn test_zero_dt_and_idle() {
        let map = parse_map("3x3\n@  \n   \n   ").unwrap();
        let config = unit_speed(0.25);
        let collision = CollisionSystem::build_from_map(&map, config.player_radius);
        let mut player = player_at(3.0, 3.0, 10.0, config);
        let before = player.position;

        player.move_with_collision(&collision, Vec2::new(0.6, 0.8), 0.0);
        assert_eq!(player.position, before);

        player.move_with_collision(&collision, Vec2::ZERO, 1.0);
        assert_eq!(player.position, before);
        assert!(!player.is_moving);
    }

    #[test]
    fn test_slides_around_center_wall() {
        let map = parse_map("3x3\n@  \n o \n   ").unwrap();
        let config = unit_speed(0.2);
        let collision = CollisionSystem::build_from_map(&map, config.player_radius);
        let mut player = player_at(0.5, 0.5, 45.0, config);

        let dt = 1.0 / 60.0;
        let max_axis_step = config.speed * dt;
        for _ in 0..180 {
            let before = player.position;
            player.move_with_collision(&collision, Vec2::new(0.0, 1.0), dt);
            assert!(collision.is_walkable(player.position.xz()));
            assert!((player.position.x() - before.x()).abs() <= max_axis_step + 1e-6);
            assert!((player.position.z() - before.z()).abs() <= max_axis_step + 1e-6);
        }

        // Held against the north face of the grown box, slid east past x = 2.
        assert!(player.position.z() <= 1.8);
        assert!(player.position.z() > 1.7);
        assert!(player.position.x() > 2.0);
        assert_eq!(world_to_cell(player.position.xz()), (0, 1));
    }
}
