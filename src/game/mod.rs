//! Game state management module.
//!
//! This module defines the [`GameState`] struct, which tracks all mutable
//! state for the game loop: the player, the collision data for the loaded
//! map, the props, and frame timing.

pub mod cars;
pub mod collectables;
pub mod collision;
pub mod flashlight;
pub mod fps;
pub mod keys;
pub mod movement;
pub mod orientation;
pub mod player;
pub mod pose;

use self::cars::CarManager;
use self::collectables::CollectableManager;
use self::collision::CollisionSystem;
use self::fps::FpsCounter;
use self::movement::MovementInput;
use self::player::Player;
use crate::config::{AppConfig, MovementConfig};
use crate::maze::GridMap;
use std::time::Instant;

/// Longest frame time fed into the simulation, in seconds.
///
/// A window drag or breakpoint would otherwise produce one huge step.
pub const MAX_FRAME_TIME: f32 = 0.1;

/// Represents the entire mutable state of the game.
///
/// This struct is updated every frame and contains:
/// - The read-only map and the collision data built from it
/// - The player and their camera state
/// - Collectable and car props
/// - Timing information for frame updates and FPS calculation
pub struct GameState {
    /// The loaded map. Never mutated after construction.
    pub map: GridMap,
    /// The player character.
    pub player: Player,
    /// Walkability queries for `map`.
    pub collision_system: CollisionSystem,
    pub collectables: CollectableManager,
    pub cars: CarManager,
    pub fps_counter: FpsCounter,
    /// Whether the mouse is captured for camera movement.
    pub capture_mouse: bool,
    /// Time of the last frame.
    pub last_frame_time: Instant,
    /// Time elapsed since the last frame (seconds).
    pub delta_time: f32,
}

impl GameState {
    /// Builds the game for `map`, spawning the player on its start cell.
    pub fn new(map: GridMap, movement: MovementConfig, pickup_radius: f32) -> Self {
        let collision_system = CollisionSystem::build_from_map(&map, movement.player_radius);
        let player = Player::spawn(&map, movement);
        let collectables = CollectableManager::from_map(&map, pickup_radius);
        let cars = CarManager::from_map(&map);

        Self {
            map,
            player,
            collision_system,
            collectables,
            cars,
            fps_counter: FpsCounter::new(),
            capture_mouse: true,
            last_frame_time: Instant::now(),
            delta_time: 0.0,
        }
    }

    pub fn from_config(map: GridMap, config: &AppConfig) -> Self {
        Self::new(
            map,
            config.movement_config(),
            config.collectables.pickup_radius,
        )
    }

    /// Measures the time since the previous call and stores it in `delta_time`.
    pub fn advance_clock(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.record_frame(elapsed)
    }

    /// Counts a frame of `elapsed` wall-clock seconds and returns the clamped
    /// simulation step.
    pub fn record_frame(&mut self, elapsed: f32) -> f32 {
        self.fps_counter.update(f64::from(elapsed));
        self.delta_time = elapsed.min(MAX_FRAME_TIME);
        self.delta_time
    }

    /// Runs one simulation step.
    ///
    /// Order: movement and collision, orientation, pose smoothing, then
    /// collectable animation and pickup against the new logical position.
    /// Mouse movement is ignored while the cursor is released.
    pub fn update(&mut self, dt: f32, input: MovementInput, mouse_delta: (f32, f32)) {
        let mouse_delta = if self.capture_mouse {
            mouse_delta
        } else {
            (0.0, 0.0)
        };

        self.player
            .update(&self.collision_system, input.direction(), mouse_delta, dt);
        self.collectables.update(dt, self.player.position.xz());

        log::trace!(
            "dt {:.4} pos {:?} pitch {:.1} yaw {:.1}",
            dt,
            self.player.position,
            self.player.orientation.pitch,
            self.player.orientation.yaw
        );
    }

    /// Flips mouse capture. Re-capturing discards the next mouse sample.
    pub fn toggle_mouse_capture(&mut self) -> bool {
        self.capture_mouse = !self.capture_mouse;
        if self.capture_mouse {
            self.player.orientation.rearm();
        }
        log::info!(
            "Mouse {}",
            if self.capture_mouse { "captured" } else { "released" }
        );
        self.capture_mouse
    }
}
