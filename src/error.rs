//! Error types for startup and map loading.
//!
//! Everything that can fail does so before the first frame: reading the
//! configuration, parsing the map, and bringing up the window and GPU. The
//! per-frame update never returns an error.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used by the startup path.
pub type GameResult<T> = Result<T, GameError>;

/// A missing, unreadable or out-of-range configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// A map file that does not describe a valid maze.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("cannot read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map file is empty")]
    Empty,

    #[error("invalid map dimensions line: {0:?}")]
    InvalidDimensions(String),

    #[error("map has {actual} rows but the header declares {expected}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("row {row} has length {actual} but the header declares width {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("map must contain exactly one player start position, found {0}")]
    PlayerStartCount(usize),
}

/// Top-level error returned from `main`.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window error: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("cannot create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    Adapter,

    #[error("cannot create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that map errors keep their context in the rendered message.
    #[test]
    fn test_map_error_messages() {
        let err = MapError::RowLengthMismatch {
            row: 3,
            expected: 10,
            actual: 9,
        };
        assert_eq!(
            err.to_string(),
            "row 3 has length 9 but the header declares width 10"
        );

        let err: GameError = MapError::PlayerStartCount(2).into();
        assert_eq!(
            err.to_string(),
            "map must contain exactly one player start position, found 2"
        );
    }
}
