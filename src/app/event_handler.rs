//! Event handler module.
//!
//! Contains the App struct and its winit event handling logic.

use crate::app::app_state::AppState;
use crate::config::AppConfig;
use crate::error::GameError;
use crate::game::GameState;
use crate::game::keys::{GameKey, winit_key_to_game_key};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// Base window title; the FPS readout is appended to it.
pub const WINDOW_TITLE: &str = "Maze Game";

pub struct App {
    pub instance: wgpu::Instance,
    pub config: AppConfig,
    /// Simulation built before the window exists, moved into `state` on resume.
    pub pending_game: Option<GameState>,
    pub state: Option<AppState>,
    pub window: Option<Arc<Window>>,
    /// First fatal error, reported by `main` after the loop exits.
    pub error: Option<GameError>,
}

impl App {
    pub fn new(config: AppConfig, game_state: GameState) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            config,
            pending_game: Some(game_state),
            state: None,
            window: None,
            error: None,
        }
    }

    pub async fn set_window(&mut self, window: Window) -> Result<(), GameError> {
        let window = Arc::new(window);
        let surface = self.instance.create_surface(window.clone())?;

        let Some(game_state) = self.pending_game.take() else {
            return Ok(());
        };

        let state = AppState::new(
            &self.instance,
            surface,
            &window,
            game_state,
            &self.config.texture_config,
        )
        .await?;

        log::info!(
            "Window ready at {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );
        self.window.get_or_insert(window);
        self.state.get_or_insert(state);
        Ok(())
    }

    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            let Some(state) = self.state.as_mut() else {
                log::warn!("Cannot resize surface without state initialized");
                return;
            };
            state.resize_surface(width, height);
        }
    }

    /// Records `error` and stops the loop.
    pub fn fail(&mut self, event_loop: &ActiveEventLoop, error: GameError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, game_key: GameKey, pressed: bool) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !pressed {
            state.key_state.release_key(game_key);
            return;
        }

        state.key_state.press_key(game_key);
        match game_key {
            GameKey::Quit => {
                log::info!("Quit requested");
                event_loop.exit();
            }
            GameKey::Escape => {
                state.game_state.toggle_mouse_capture();
                // Drop motion from while the cursor was free.
                state.mouse_delta.take();
                if let Some(window) = self.window.as_ref() {
                    state.triage_mouse(window);
                }
            }
            // Movement keys are sampled every frame.
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                self.fail(event_loop, err.into());
                return;
            }
        };

        if let Err(err) = pollster::block_on(self.set_window(window)) {
            self.fail(event_loop, err);
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(state) = self.state.as_mut() {
                if state.game_state.capture_mouse {
                    state.mouse_delta.accumulate(delta.0, delta.1);
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if self.state.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                self.handle_resized(new_size.width, new_size.height);
            }

            WindowEvent::Focused(false) => {
                if let Some(state) = self.state.as_mut() {
                    state.key_state.clear();
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: key,
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(game_key) = winit_key_to_game_key(&key) {
                    self.handle_key(event_loop, game_key, key_state == ElementState::Pressed);
                }
            }

            WindowEvent::RedrawRequested => {
                self.handle_redraw(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
