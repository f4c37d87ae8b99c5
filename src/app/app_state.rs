//! AppState module.
//!
//! This module defines the [`AppState`] struct, which holds all state required for a running
//! game session once a window exists: the GPU renderer, the simulation and the input state.

use crate::config::TextureConfig;
use crate::error::GameError;
use crate::game::{GameState, keys::KeyState};
use crate::renderer::wgpu_lib::WgpuRenderer;
use winit::window::{CursorGrabMode, Window};

/// Raw mouse motion summed between two simulation steps.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MouseDelta {
    dx: f64,
    dy: f64,
}

impl MouseDelta {
    /// Adds one raw device motion event.
    pub fn accumulate(&mut self, dx: f64, dy: f64) {
        self.dx += dx;
        self.dy += dy;
    }

    /// Returns the motion since the last call and resets it.
    pub fn take(&mut self) -> (f32, f32) {
        let delta = (self.dx as f32, self.dy as f32);
        *self = Self::default();
        delta
    }
}

pub struct AppState {
    pub wgpu_renderer: WgpuRenderer,
    pub game_state: GameState,
    pub key_state: KeyState,
    pub mouse_delta: MouseDelta,
    /// FPS value last written to the window title.
    pub shown_fps: Option<usize>,
}

impl AppState {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        window: &Window,
        game_state: GameState,
        textures: &TextureConfig,
    ) -> Result<Self, GameError> {
        let size = window.inner_size();
        let wgpu_renderer = WgpuRenderer::new(
            instance,
            surface,
            size.width,
            size.height,
            &game_state,
            textures,
        )
        .await?;

        let mut state = Self {
            wgpu_renderer,
            game_state,
            key_state: KeyState::new(),
            mouse_delta: MouseDelta::default(),
            shown_fps: None,
        };
        state.triage_mouse(window);
        Ok(state)
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
    }

    /// Applies the game's mouse capture flag to the OS cursor.
    ///
    /// Some platforms cannot lock the cursor, so `Confined` is tried as a
    /// fallback before giving up with a warning.
    pub fn triage_mouse(&mut self, window: &Window) {
        if self.game_state.capture_mouse {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("Failed to lock cursor: {}", e);
            }
            window.set_cursor_visible(false);
        } else {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("Failed to unlock cursor: {}", e);
            }
            window.set_cursor_visible(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_delta_accumulates() {
        let mut delta = MouseDelta::default();
        delta.accumulate(3.0, -1.0);
        delta.accumulate(2.5, 4.0);
        assert_eq!(delta.take(), (5.5, 3.0));
        assert_eq!(delta.take(), (0.0, 0.0));
    }
}
