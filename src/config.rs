//! Application configuration loaded from `appsettings.json`.
//!
//! The file is split into PascalCase sections (`Window`, `MapConfig`,
//! `Camera`, `Mouse`, `Movement`, `Light`, ...). Required keys have no serde
//! default, so a missing key fails the parse. Optional keys fall back to the
//! `default_*` functions below. [`AppConfig::validate`] then rejects values
//! that parse but make no sense, such as a negative speed.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "appsettings.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppConfig {
    pub window: WindowConfig,
    pub map_config: MapConfig,
    pub camera: CameraConfig,
    pub mouse: MouseConfig,
    pub movement: MovementSection,
    pub light: LightConfig,

    #[serde(default)]
    pub texture_config: TextureConfig,

    #[serde(default)]
    pub collectables: CollectablesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapConfig {
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CameraConfig {
    /// Eye height above the floor.
    pub height: f32,
    pub light_height: f32,
    /// Downward tilt of the flashlight relative to the view, in degrees.
    pub angle_of_depression: f32,

    #[serde(default = "default_smoothing_time")]
    pub smoothing_time: f32,

    #[serde(default = "default_bob_frequency")]
    pub bob_frequency: f32,

    #[serde(default = "default_bob_amplitude")]
    pub bob_amplitude: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MouseConfig {
    #[serde(alias = "Sensivity")]
    pub sensitivity: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovementSection {
    pub speed: f32,

    #[serde(default = "default_player_radius")]
    pub player_radius: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LightConfig {
    pub cutoff_deg: f32,
    pub range: f32,
}

/// Optional texture paths; missing or unreadable files render as flat colour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextureConfig {
    #[serde(default)]
    pub floor_texture_path: Option<PathBuf>,

    #[serde(default)]
    pub wall_texture_path: Option<PathBuf>,

    #[serde(default, alias = "CeillingTexturePath")]
    pub ceiling_texture_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CollectablesConfig {
    #[serde(default = "default_pickup_radius")]
    pub pickup_radius: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_smoothing_time() -> f32 {
    0.08
}
fn default_bob_frequency() -> f32 {
    10.0
}
fn default_bob_amplitude() -> f32 {
    0.05
}
fn default_player_radius() -> f32 {
    0.25
}
fn default_pickup_radius() -> f32 {
    0.75
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CollectablesConfig {
    fn default() -> Self {
        Self {
            pickup_radius: default_pickup_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Immutable tuning values consumed by the player each frame.
///
/// Angles are in degrees, distances in world units and times in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    pub speed: f32,
    pub mouse_sensitivity: f32,
    pub player_radius: f32,
    pub smoothing_time: f32,
    pub bob_frequency: f32,
    pub bob_amplitude: f32,
    pub eye_height: f32,
    pub light_height: f32,
    pub light_depression_angle: f32,
    pub light_cutoff_degrees: f32,
    pub light_range: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            mouse_sensitivity: 8.0,
            player_radius: default_player_radius(),
            smoothing_time: default_smoothing_time(),
            bob_frequency: default_bob_frequency(),
            bob_amplitude: default_bob_amplitude(),
            eye_height: 1.7,
            light_height: 1.5,
            light_depression_angle: 20.0,
            light_cutoff_degrees: 25.0,
            light_range: 20.0,
        }
    }
}

impl AppConfig {
    /// Reads, parses and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Logs every loaded section at `info`. Called once logging is set up,
    /// which itself depends on the loaded level.
    pub fn log_summary(&self, path: &Path) {
        let config = self;
        log::info!("Configuration loaded from {}", path.display());
        log::info!(
            "Window {}x{}, map {}",
            config.window.width,
            config.window.height,
            config.map_config.file_path.display()
        );
        log::info!(
            "Camera height {}, light height {}, depression {}°",
            config.camera.height,
            config.camera.light_height,
            config.camera.angle_of_depression
        );
        log::info!(
            "Speed {}, mouse sensitivity {}, light cutoff {}° range {}",
            config.movement.speed,
            config.mouse.sensitivity,
            config.light.cutoff_deg,
            config.light.range
        );
        log::info!(
            "Player radius {}, pickup radius {}, smoothing {}s",
            config.movement.player_radius,
            config.collectables.pickup_radius,
            config.camera.smoothing_time
        );
    }

    /// Parses and validates configuration text. `origin` is only used in errors.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every numeric value for range and finiteness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("Window", "width and height must be positive"));
        }

        let finite = [
            ("Camera:Height", self.camera.height),
            ("Camera:LightHeight", self.camera.light_height),
            ("Camera:AngleOfDepression", self.camera.angle_of_depression),
            ("Camera:SmoothingTime", self.camera.smoothing_time),
            ("Camera:BobFrequency", self.camera.bob_frequency),
            ("Camera:BobAmplitude", self.camera.bob_amplitude),
            ("Mouse:Sensitivity", self.mouse.sensitivity),
            ("Movement:Speed", self.movement.speed),
            ("Movement:PlayerRadius", self.movement.player_radius),
            ("Light:CutoffDeg", self.light.cutoff_deg),
            ("Light:Range", self.light.range),
            ("Collectables:PickupRadius", self.collectables.pickup_radius),
        ];
        if let Some(&(key, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(key, format!("{} is not a finite number", value)));
        }

        let positive = [
            ("Movement:Speed", self.movement.speed),
            ("Mouse:Sensitivity", self.mouse.sensitivity),
            ("Camera:SmoothingTime", self.camera.smoothing_time),
            ("Light:Range", self.light.range),
        ];
        if let Some(&(key, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(invalid(key, format!("{} must be positive", value)));
        }

        let non_negative = [
            ("Movement:PlayerRadius", self.movement.player_radius),
            ("Camera:BobFrequency", self.camera.bob_frequency),
            ("Camera:BobAmplitude", self.camera.bob_amplitude),
            ("Collectables:PickupRadius", self.collectables.pickup_radius),
        ];
        if let Some(&(key, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(invalid(key, format!("{} must not be negative", value)));
        }

        if self.light.cutoff_deg <= 0.0 || self.light.cutoff_deg >= 90.0 {
            return Err(invalid(
                "Light:CutoffDeg",
                format!("{} must lie strictly between 0 and 90", self.light.cutoff_deg),
            ));
        }

        self.log_level()?;
        Ok(())
    }

    /// The configured log level filter.
    pub fn log_level(&self) -> Result<log::LevelFilter, ConfigError> {
        self.logging
            .level
            .parse()
            .map_err(|_| invalid("Logging:Level", format!("unknown level {:?}", self.logging.level)))
    }

    /// Builds the per-frame movement tuning from the loaded sections.
    pub fn movement_config(&self) -> MovementConfig {
        MovementConfig {
            speed: self.movement.speed,
            mouse_sensitivity: self.mouse.sensitivity,
            player_radius: self.movement.player_radius,
            smoothing_time: self.camera.smoothing_time,
            bob_frequency: self.camera.bob_frequency,
            bob_amplitude: self.camera.bob_amplitude,
            eye_height: self.camera.height,
            light_height: self.camera.light_height,
            light_depression_angle: self.camera.angle_of_depression,
            light_cutoff_degrees: self.light.cutoff_deg,
            light_range: self.light.range,
        }
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "Window": { "Width": 1280, "Height": 720 },
        "MapConfig": { "FilePath": "assets/maps/maze.txt" },
        "Camera": { "Height": 1.7, "LightHeight": 1.5, "AngleOfDepression": 20 },
        "Mouse": { "Sensivity": 8.0 },
        "Movement": { "Speed": 3.0 },
        "Light": { "CutoffDeg": 25.0, "Range": 20.0 }
    }"#;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::parse(text, Path::new("appsettings.json"))
    }

    /// Tests that optional sections take their defaults.
    #[test]
    fn test_minimal_config_defaults() {
        let config = parse(MINIMAL).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.mouse.sensitivity, 8.0);
        assert_eq!(config.movement.player_radius, 0.25);
        assert_eq!(config.camera.smoothing_time, 0.08);
        assert_eq!(config.collectables.pickup_radius, 0.75);
        assert_eq!(config.logging.level, "info");
        assert!(config.texture_config.wall_texture_path.is_none());
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Info);
    }

    /// Tests that a missing required key is a parse error.
    #[test]
    fn test_missing_required_key() {
        let text = MINIMAL.replace(r#""Speed": 3.0"#, r#""Sped": 3.0"#);
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Speed"));
    }

    /// Tests range validation of individual values.
    #[test]
    fn test_invalid_values() {
        let cases = [
            (r#""Speed": 3.0"#, r#""Speed": 0.0"#, "Movement:Speed"),
            (r#""CutoffDeg": 25.0"#, r#""CutoffDeg": 90.0"#, "Light:CutoffDeg"),
            (r#""Width": 1280"#, r#""Width": 0"#, "Window"),
            (r#""Sensivity": 8.0"#, r#""Sensivity": -1.0"#, "Mouse:Sensitivity"),
        ];
        for (from, to, expected_key) in cases {
            match parse(&MINIMAL.replace(from, to)) {
                Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, expected_key),
                other => panic!("expected invalid {}, got {:?}", expected_key, other),
            }
        }
    }

    /// Tests that an unknown log level is rejected.
    #[test]
    fn test_invalid_log_level() {
        let text = MINIMAL.replacen('{', r#"{ "Logging": { "Level": "loud" },"#, 1);
        assert!(matches!(
            parse(&text),
            Err(ConfigError::Invalid {
                key: "Logging:Level",
                ..
            })
        ));
    }

    /// Tests the mapping into the movement tuning values.
    #[test]
    fn test_movement_config() {
        let movement = parse(MINIMAL).unwrap().movement_config();
        assert_eq!(movement.speed, 3.0);
        assert_eq!(movement.eye_height, 1.7);
        assert_eq!(movement.light_height, 1.5);
        assert_eq!(movement.light_depression_angle, 20.0);
        assert_eq!(movement.light_cutoff_degrees, 25.0);
        assert_eq!(movement.mouse_sensitivity, 8.0);
    }

    /// Tests that a missing file is reported with its path.
    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("no/such/appsettings.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("no/such/appsettings.json"));
    }

    /// Tests that the bundled settings file loads and names the bundled map.
    #[test]
    fn test_bundled_settings() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let config = AppConfig::load(&root.join(DEFAULT_CONFIG_PATH)).unwrap();
        assert_eq!(config.map_config.file_path, Path::new("assets/maps/maze.txt"));
        assert!(config.texture_config.ceiling_texture_path.is_some());
    }
}
