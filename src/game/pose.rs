//! Camera pose smoothing via exponential interpolation and head-bob.
//!
//! The rendered camera trails the logical (collision) position using
//! frame-rate independent exponential interpolation:
//!
//!   `render += (logical - render) * (1 - exp(-dt / tau))`
//!
//! After `t` seconds at rest the remaining error is `e0 * exp(-t / tau)`, no
//! matter how the time was split into frames.

use crate::config::MovementConfig;
use crate::math::vec::Vec3;

/// Interpolation factor for one step of `dt` seconds with time constant `tau`.
///
/// Returns 0 for `dt = 0` and approaches 1 as `dt` grows.
pub fn smoothing_factor(dt: f32, time_constant: f32) -> f32 {
    1.0 - (-dt / time_constant).exp()
}

/// Visual camera position, decoupled from the logical position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Smoothed, head-bobbed eye position used for the view matrix.
    pub render_position: Vec3,
    /// Head-bob phase in radians; zero whenever the player stands still.
    pub bob_timer: f32,
}

impl CameraPose {
    pub fn new(position: Vec3) -> Self {
        Self {
            render_position: position,
            bob_timer: 0.0,
        }
    }

    /// Moves the render position towards `logical` and applies head-bob.
    ///
    /// The smoothed Y is discarded: the final height is always
    /// `eye_height + bob_offset()`.
    pub fn advance(&mut self, logical: Vec3, is_moving: bool, dt: f32, config: &MovementConfig) {
        let factor = smoothing_factor(dt, config.smoothing_time);
        let smoothed = self.render_position.lerp(&logical, factor);

        if is_moving {
            self.bob_timer += dt * config.bob_frequency;
        } else {
            self.bob_timer = 0.0;
        }

        let y_offset = if is_moving {
            self.bob_timer.sin() * config.bob_amplitude
        } else {
            0.0
        };
        self.render_position = smoothed.with_y(config.eye_height + y_offset);
    }
}
