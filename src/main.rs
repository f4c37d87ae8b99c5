//! Mazewalk - a first-person maze walker
//!
//! This is the main entry point. Mazewalk loads a text grid map, spawns the player on its start
//! cell and lets them walk the maze in first person with a flashlight, sliding along walls and
//! picking up collectables.
//!
//! # Architecture
//! The application follows a modular architecture:
//! - `app/`: Window, event handling and the per-frame loop
//! - `game/`: Player camera, collision, props and input state
//! - `maze/`: Grid map types and the map file parser
//! - `renderer/`: WGPU pipeline, geometry and textures
//! - `math/`: Vector and matrix utilities for 3D graphics
//! - `config`/`error`: Settings file and error types
//!
//! # Usage
//! `mazewalk [path/to/appsettings.json]`. Logging follows `RUST_LOG` when set, otherwise the
//! configured `Logging.Level`.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod math;
pub mod maze;
pub mod renderer;

use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::error::GameResult;
use crate::game::GameState;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

/// Installs the global logger. `RUST_LOG` overrides `level`.
fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Loads configuration and map, then runs the event loop until exit.
fn run() -> GameResult<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match AppConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            init_logging(log::LevelFilter::Info);
            return Err(err.into());
        }
    };
    init_logging(config.log_level().unwrap_or(log::LevelFilter::Info));
    config.log_summary(&config_path);

    let map = maze::load_map_file(&config.map_config.file_path)?;
    let game_state = GameState::from_config(map, &config);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(config, game_state);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => {
            log::info!("Exited cleanly");
            Ok(())
        }
    }
}
