//! Scene layout and tuning
//!
//! Every hard-coded number of the scene lives here. Loaded from an optional
//! JSON file next to the binary; any field the file omits keeps its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration loading/validation failure
#[derive(Debug)]
pub enum ConfigError {
    /// File exists but could not be read
    Io(std::io::Error),
    /// File is not valid JSON for [`GameConfig`]
    Parse(serde_json::Error),
    /// Parsed, but the values cannot drive the simulation
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config read failed: {}", e),
            Self::Parse(e) => write!(f, "config parse failed: {}", e),
            Self::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

/// Scene configuration, constructed once and passed to every subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Timing ===
    /// Logic updates per second
    pub tick_rate: f32,

    // === Window ===
    pub window_size: UVec2,
    pub window_title: String,

    // === Play area ===
    /// Projectile is out when its y exceeds this
    pub floor_y: f32,
    /// Projectile is out when its x leaves `[bounds_x.x, bounds_x.y]`
    pub bounds_x: Vec2,

    // === Cannon / projectile ===
    pub launch_point: Vec2,
    pub projectile_radius: f32,
    pub initial_gravity: f32,
    pub gravity_step: f32,
    /// Drag distance (px) per unit of launch velocity
    pub launch_scale: f32,

    // === Target ===
    /// Left/right turn thresholds for the target's x
    pub patrol_bounds: Vec2,
    pub patrol_speed: f32,
    pub target_start: Vec2,
    pub target_size: Vec2,

    // === Wall ===
    pub wall_position: Vec2,
    pub wall_size: Vec2,

    // === Target animation ===
    pub frame_increment: f32,
    pub frame_count: u32,
    pub cell_size: UVec2,

    // === Trajectory preview ===
    pub preview_steps: u32,
    pub preview_interval: u32,

    // === Assets ===
    pub asset_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,

            window_size: UVec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            window_title: "Cannon Range".to_string(),

            floor_y: FLOOR_Y,
            bounds_x: Vec2::new(BOUNDS_LEFT, BOUNDS_RIGHT),

            launch_point: Vec2::new(LAUNCH_X, LAUNCH_Y),
            projectile_radius: PROJECTILE_RADIUS,
            initial_gravity: INITIAL_GRAVITY,
            gravity_step: GRAVITY_STEP,
            launch_scale: LAUNCH_SCALE,

            patrol_bounds: Vec2::new(PATROL_LEFT, PATROL_RIGHT),
            patrol_speed: PATROL_SPEED,
            target_start: Vec2::new(PATROL_LEFT, TARGET_Y),
            target_size: Vec2::splat(TARGET_SIZE),

            wall_position: Vec2::new(WALL_X, WALL_Y),
            wall_size: Vec2::new(WALL_WIDTH, WALL_HEIGHT),

            frame_increment: FRAME_INCREMENT,
            frame_count: FRAME_COUNT,
            cell_size: UVec2::new(CELL_WIDTH, CELL_HEIGHT),

            preview_steps: PREVIEW_STEPS,
            preview_interval: PREVIEW_INTERVAL,

            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl GameConfig {
    /// Default config file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "cannon-range.json";

    /// Duration of one logic tick, `None` if `tick_rate` has no usable period
    pub fn try_tick_duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(1.0 / self.tick_rate as f64)
            .ok()
            .filter(|tick| !tick.is_zero())
    }

    /// Duration of one logic tick. Falls back to the default rate for a
    /// config that skipped [`GameConfig::validate`].
    pub fn tick_duration(&self) -> Duration {
        self.try_tick_duration()
            .unwrap_or_else(|| Duration::from_secs_f64(1.0 / TICK_RATE as f64))
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        let loaded = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate > 0.0) {
            return Err(ConfigError::Invalid("tick_rate must be positive"));
        }
        if self.try_tick_duration().is_none() {
            return Err(ConfigError::Invalid("tick_rate is out of range"));
        }
        if self.window_size.x == 0 || self.window_size.y == 0 {
            return Err(ConfigError::Invalid("window_size must be non-zero"));
        }
        if self.launch_scale == 0.0 {
            return Err(ConfigError::Invalid("launch_scale must be non-zero"));
        }
        if self.frame_count == 0 {
            return Err(ConfigError::Invalid("frame_count must be at least 1"));
        }
        if !(self.frame_increment > 0.0) {
            return Err(ConfigError::Invalid("frame_increment must be positive"));
        }
        if self.preview_interval == 0 {
            return Err(ConfigError::Invalid("preview_interval must be at least 1"));
        }
        if self.patrol_bounds.x >= self.patrol_bounds.y {
            return Err(ConfigError::Invalid("patrol_bounds must be increasing"));
        }
        if self.bounds_x.x >= self.bounds_x.y {
            return Err(ConfigError::Invalid("bounds_x must be increasing"));
        }
        if self.patrol_speed < 0.0 {
            return Err(ConfigError::Invalid("patrol_speed must not be negative"));
        }
        if self.gravity_step < 0.0 || self.initial_gravity < 0.0 {
            return Err(ConfigError::Invalid("gravity values must not be negative"));
        }
        Ok(())
    }
}
