//! Player state and the per-frame camera update.
//!
//! This module defines the [`Player`] struct, which owns the camera state:
//! the logical position used for collision, the smoothed render position used
//! for drawing, the mouse-look orientation and the movement tuning.
//!
//! # Overview
//!
//! The player system handles:
//! - **Logical Position**: Collision-authoritative, never smoothed
//! - **Orientation**: Pitch/yaw in degrees and the derived front/right/up basis
//! - **Render Pose**: Exponentially smoothed position plus head-bob
//! - **Outputs**: View and projection matrices and the flashlight pose
//!
//! # Update Order
//!
//! [`Player::update`] always runs movement, then orientation, then smoothing.
//! Movement therefore uses the orientation from the previous frame, and
//! smoothing chases the position that was just committed.
//!
//! # Coordinate System
//!
//! Right-handed, Y up. The map lies on the XZ plane with its corner at the
//! origin. A yaw of -90° looks along -Z, 0° along +X.
//!
//! # Usage Example
//!
//! ```ignore
//! let mut player = Player::spawn(&map, config);
//! player.update(&collision, MovementInput::default().direction(), (0.0, 0.0), 0.016);
//! let view_proj = player.projection_matrix(16.0 / 9.0).multiply(&player.view_matrix());
//! ```

use crate::config::MovementConfig;
use crate::game::collision::CollisionSystem;
use crate::game::flashlight::Flashlight;
use crate::game::orientation::Orientation;
use crate::game::pose::CameraPose;
use crate::math::coordinates::cell_center;
use crate::math::deg_to_rad;
use crate::math::mat::Mat4;
use crate::math::vec::{Vec2, Vec3};
use crate::maze::GridMap;

/// Vertical field of view of the projection, in degrees.
pub const FIELD_OF_VIEW: f32 = 45.0;
/// Near clipping plane distance.
pub const Z_NEAR: f32 = 0.1;
/// Far clipping plane distance.
pub const Z_FAR: f32 = 100.0;
/// Yaw the player spawns with, looking along -Z.
pub const SPAWN_YAW: f32 = -90.0;

/// Represents the player's camera state in the world.
///
/// Owned exclusively by the game state and mutated once per frame.
#[derive(Debug, Clone)]
pub struct Player {
    /// Logical (collision) position. `y` is the configured eye height.
    pub position: Vec3,

    /// Mouse-look angles and basis vectors.
    pub orientation: Orientation,

    /// Smoothed render position and head-bob phase.
    pub pose: CameraPose,

    /// Whether movement input was held this frame.
    pub is_moving: bool,

    /// Movement, look and light tuning.
    pub config: MovementConfig,
}

impl Player {
    /// Creates a player at `position` looking along -Z.
    pub fn new(position: Vec3, config: MovementConfig) -> Self {
        Self {
            position,
            orientation: Orientation::new(0.0, SPAWN_YAW),
            pose: CameraPose::new(position),
            is_moving: false,
            config,
        }
    }

    /// Creates a player at the centre of the map's start cell at eye height.
    pub fn spawn(map: &GridMap, config: MovementConfig) -> Self {
        let start = map.player_start();
        let position = cell_center(start, config.eye_height);
        log::info!(
            "Player spawned in cell ({}, {}) at {:?}",
            start.row,
            start.col,
            position
        );
        Self::new(position, config)
    }

    /// Advances the camera by one frame.
    ///
    /// # Arguments
    ///
    /// * `collision_system` - Walkability queries for the current map
    /// * `input` - Unit or zero movement direction, `x` right and `y` forward
    /// * `mouse_delta` - Mouse movement accumulated over the frame
    /// * `dt` - Frame time in seconds
    pub fn update(
        &mut self,
        collision_system: &CollisionSystem,
        input: Vec2,
        mouse_delta: (f32, f32),
        dt: f32,
    ) {
        self.move_with_collision(collision_system, input, dt);
        self.orientation.apply_mouse_delta(
            mouse_delta.0,
            mouse_delta.1,
            self.config.mouse_sensitivity,
            dt,
        );
        self.pose
            .advance(self.position, self.is_moving, dt, &self.config);
    }

    /// The smoothed, head-bobbed eye position.
    pub fn render_position(&self) -> Vec3 {
        self.pose.render_position
    }

    /// Look-at view matrix from the render position along `front`.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.render_position();
        Mat4::look_at(
            eye,
            eye + self.orientation.front(),
            self.orientation.up(),
        )
    }

    /// Perspective projection with a 45° vertical field of view.
    ///
    /// # Arguments
    ///
    /// * `aspect_ratio` - Width divided by height of the viewport
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective(deg_to_rad(FIELD_OF_VIEW), aspect_ratio, Z_NEAR, Z_FAR)
    }

    /// Clip-space transform: `projection * view`.
    pub fn view_proj_matrix(&self, aspect_ratio: f32) -> Mat4 {
        self.projection_matrix(aspect_ratio)
            .multiply(&self.view_matrix())
    }

    /// Current flashlight position and beam direction.
    pub fn flashlight(&self) -> Flashlight {
        Flashlight::derive(self.render_position(), &self.orientation, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::parse_map;

    fn setup(text: &str) -> (Player, CollisionSystem) {
        let map = parse_map(text).unwrap();
        let config = MovementConfig::default();
        let collision = CollisionSystem::build_from_map(&map, config.player_radius);
        (Player::spawn(&map, config), collision)
    }

    /// Tests the spawn position at the start cell centre.
    #[test]
    fn test_spawn() {
        let (player, _) = setup("3x2\n   \n  @");
        assert_eq!(player.position, Vec3::new(5.0, 1.7, 3.0));
        assert_eq!(player.render_position(), player.position);
        assert_eq!(player.orientation.yaw, SPAWN_YAW);
        assert!(!player.is_moving);
    }

    /// Tests that the eye maps to the origin of view space.
    #[test]
    fn test_view_matrix_at_eye() {
        let (player, _) = setup("1x1\n@");
        let view = player.view_matrix();
        let eye = view.transform_point(player.render_position());
        assert!(eye.length() < 1e-5);
        let ahead = view.transform_point(player.render_position() + Vec3::new(0.0, 0.0, -1.0));
        assert!((ahead - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    /// Tests that a zero timestep changes neither position nor angles.
    #[test]
    fn test_update_zero_dt() {
        let (mut player, collision) = setup("3x3\n   \n @ \n   ");
        let position = player.position;
        player.update(&collision, Vec2::new(0.0, 1.0), (0.0, 0.0), 0.0);
        player.update(&collision, Vec2::new(0.0, 1.0), (25.0, -10.0), 0.0);
        assert_eq!(player.position, position);
        assert_eq!(player.orientation.pitch, 0.0);
        assert_eq!(player.orientation.yaw, SPAWN_YAW);
    }

    /// Tests that movement uses the orientation from before this frame's mouse input.
    #[test]
    fn test_movement_before_orientation() {
        let (mut player, collision) = setup("5x5\n     \n     \n  @  \n     \n     ");
        // Swallow the first mouse sample.
        player.update(&collision, Vec2::ZERO, (0.0, 0.0), 0.01);
        let start = player.position;

        // Turn 90° right in the same frame as stepping forward.
        let sensitivity = player.config.mouse_sensitivity;
        player.update(&collision, Vec2::new(0.0, 1.0), (90.0 / sensitivity / 0.1, 0.0), 0.1);

        let step = player.config.speed * 0.1;
        assert!((player.position.z() - (start.z() - step)).abs() < 1e-5);
        assert!((player.position.x() - start.x()).abs() < 1e-5);
        assert!((player.orientation.yaw - 0.0).abs() < 1e-3);
    }

    /// Tests that the render position trails the logical position and bobs.
    #[test]
    fn test_render_position_trails() {
        let (mut player, collision) = setup("3x5\n   \n   \n   \n   \n @ ");
        for _ in 0..10 {
            player.update(&collision, Vec2::new(0.0, 1.0), (0.0, 0.0), 1.0 / 60.0);
        }
        assert!(player.is_moving);
        assert!(player.pose.bob_timer > 0.0);
        assert!(player.render_position().z() > player.position.z());

        for _ in 0..300 {
            player.update(&collision, Vec2::ZERO, (0.0, 0.0), 1.0 / 60.0);
        }
        assert_eq!(player.pose.bob_timer, 0.0);
        assert!((player.render_position() - player.position).length() < 1e-4);
    }

    /// Tests the flashlight follows the render position.
    #[test]
    fn test_flashlight_follows_player() {
        let (player, _) = setup("1x1\n@");
        let light = player.flashlight();
        assert_eq!(light.position.x(), player.render_position().x());
        assert_eq!(light.position.z(), player.render_position().z());
        assert_eq!(light.position.y(), player.config.light_height);
    }
}
