//! Mouse-look orientation: pitch/yaw angles and the derived camera basis.

use crate::math::deg_to_rad;
use crate::math::vec::Vec3;

/// Pitch is kept strictly inside ±90° so `front` never becomes parallel to
/// the world up vector.
pub const PITCH_LIMIT: f32 = 89.0;

/// Camera orientation in degrees plus the basis vectors derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Vertical look angle in degrees, clamped to `[-89, 89]`.
    pub pitch: f32,
    /// Horizontal look angle in degrees, unbounded. -90 looks along -Z.
    pub yaw: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    /// Set until the first mouse sample after (re)activation has been seen.
    first_move: bool,
}

impl Orientation {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        let mut orientation = Self {
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            yaw,
            front: Vec3::ZERO,
            right: Vec3::ZERO,
            up: Vec3::ZERO,
            first_move: true,
        };
        orientation.update_vectors();
        orientation
    }

    /// Applies one frame of mouse movement.
    ///
    /// The first call after construction or [`Orientation::rearm`] only
    /// records that a sample arrived and leaves the angles untouched.
    ///
    /// # Arguments
    /// * `delta_x`, `delta_y` - Mouse movement since the last frame
    /// * `sensitivity` - Degrees per unit of mouse movement per second
    /// * `dt` - Frame time in seconds
    pub fn apply_mouse_delta(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32, dt: f32) {
        if self.first_move {
            self.first_move = false;
            return;
        }

        self.yaw += delta_x * sensitivity * dt;
        self.pitch -= delta_y * sensitivity * dt;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Re-enables the first-sample rule, e.g. after the cursor is re-captured.
    pub fn rearm(&mut self) {
        self.first_move = true;
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    fn update_vectors(&mut self) {
        self.front = direction_from_angles(self.pitch, self.yaw);
        self.right = self.front.cross(&Vec3::UNIT_Y).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

/// Unit look direction for the given pitch and yaw, both in degrees.
///
/// `(cos p * cos y, sin p, cos p * sin y)`, normalized.
pub fn direction_from_angles(pitch: f32, yaw: f32) -> Vec3 {
    let (pitch, yaw) = (deg_to_rad(pitch), deg_to_rad(yaw));
    Vec3::new(pitch.cos() * yaw.cos(), pitch.sin(), pitch.cos() * yaw.sin()).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    /// Tests the basis at the spawn orientation.
    #[test]
    fn test_initial_basis() {
        let orientation = Orientation::new(0.0, -90.0);
        assert_close(orientation.front(), Vec3::new(0.0, 0.0, -1.0));
        assert_close(orientation.right(), Vec3::new(1.0, 0.0, 0.0));
        assert_close(orientation.up(), Vec3::UNIT_Y);
    }

    /// Tests that the first sample after activation is swallowed.
    #[test]
    fn test_first_move_ignored() {
        let mut orientation = Orientation::new(0.0, -90.0);
        orientation.apply_mouse_delta(500.0, 300.0, 1.0, 1.0);
        assert_eq!(orientation.yaw, -90.0);
        assert_eq!(orientation.pitch, 0.0);

        orientation.apply_mouse_delta(10.0, 5.0, 2.0, 0.5);
        assert_eq!(orientation.yaw, -80.0);
        assert_eq!(orientation.pitch, -5.0);

        orientation.rearm();
        orientation.apply_mouse_delta(10.0, 5.0, 2.0, 0.5);
        assert_eq!(orientation.yaw, -80.0);
    }

    /// Tests that pitch stays clamped under large cumulative input.
    #[test]
    fn test_pitch_clamped() {
        let mut orientation = Orientation::new(0.0, 0.0);
        orientation.apply_mouse_delta(0.0, 0.0, 1.0, 1.0);
        for _ in 0..100 {
            orientation.apply_mouse_delta(3.0, -1000.0, 1.0, 0.1);
            assert!(orientation.pitch <= PITCH_LIMIT);
        }
        assert_eq!(orientation.pitch, PITCH_LIMIT);
        for _ in 0..100 {
            orientation.apply_mouse_delta(3.0, 1000.0, 1.0, 0.1);
            assert!(orientation.pitch >= -PITCH_LIMIT);
        }
        assert_eq!(orientation.pitch, -PITCH_LIMIT);
        assert!((orientation.front().length() - 1.0).abs() < 1e-5);
        assert!((orientation.up().length() - 1.0).abs() < 1e-5);
    }

    /// Tests that a zero timestep leaves the angles unchanged.
    #[test]
    fn test_zero_dt() {
        let mut orientation = Orientation::new(10.0, 30.0);
        orientation.apply_mouse_delta(0.0, 0.0, 1.0, 0.0);
        orientation.apply_mouse_delta(40.0, -25.0, 5.0, 0.0);
        assert_eq!(orientation.pitch, 10.0);
        assert_eq!(orientation.yaw, 30.0);
    }
}
