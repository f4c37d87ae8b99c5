//! Flashlight (spotlight) pose derived from the camera.

use crate::config::MovementConfig;
use crate::game::orientation::{Orientation, direction_from_angles};
use crate::math::deg_to_rad;
use crate::math::vec::Vec3;

/// Everything the renderer needs to light the scene with the flashlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flashlight {
    pub position: Vec3,
    /// Unit beam direction.
    pub direction: Vec3,
    /// Cosine of the half-angle of the cone.
    pub cutoff_cos: f32,
    pub range: f32,
}

impl Flashlight {
    /// Places the light at the render XZ position and configured height,
    /// aimed along the view direction tilted down by the depression angle.
    pub fn derive(render_position: Vec3, orientation: &Orientation, config: &MovementConfig) -> Self {
        Self {
            position: render_position.with_y(config.light_height),
            direction: direction_from_angles(
                orientation.pitch - config.light_depression_angle,
                orientation.yaw,
            ),
            cutoff_cos: deg_to_rad(config.light_cutoff_degrees).cos(),
            range: config.light_range,
        }
    }
}
