//! Application module.
//!
//! This module glues the platform to the game: it owns the window, turns winit events into
//! game input and drives one simulation step plus one rendered frame per redraw.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds the renderer and session state
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`update`]: Contains the per-frame update and rendering logic
//!
//! # Event Flow
//!
//! 1. **Input Events**: Keys update the held-key set; raw mouse motion is accumulated
//! 2. **Frame**: On redraw the clock advances, input is sampled and the game steps
//! 3. **Rendering**: The current state is rendered and presented
//!
//! Everything runs on the event loop thread.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
