//! Per-frame update for the App.
//!
//! Contains the redraw handler that steps the simulation and renders it.

use super::event_handler::{App, WINDOW_TITLE};
use winit::event_loop::ActiveEventLoop;

/// Window title with the FPS readout.
pub fn window_title(fps: usize) -> String {
    format!("{} | FPS: {}", WINDOW_TITLE, fps)
}

impl App {
    /// Handles one frame: timing, input sampling, simulation and rendering.
    ///
    /// # Error Handling
    /// - A lost or outdated surface is reconfigured and the frame skipped
    /// - A timeout skips the frame
    /// - Running out of GPU memory stops the application
    pub fn handle_redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(state)) = (self.window.as_ref(), self.state.as_mut()) else {
            return;
        };
        if window.is_minimized().unwrap_or(false) {
            return;
        }

        let dt = state.game_state.advance_clock();
        let input = state.key_state.movement_input();
        let mouse_delta = state.mouse_delta.take();
        state.game_state.update(dt, input, mouse_delta);

        let fps = state.game_state.fps_counter.current_fps();
        if state.shown_fps != Some(fps) {
            window.set_title(&window_title(fps));
            state.shown_fps = Some(fps);
        }

        match state.wgpu_renderer.render(&state.game_state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                state.wgpu_renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory; stopping");
                event_loop.exit();
            }
            Err(e) => {
                log::warn!("Failed to render frame: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_title() {
        assert_eq!(window_title(60), "Maze Game | FPS: 60");
    }
}
