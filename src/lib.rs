//! Cannon Range - a single-screen artillery game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (aiming, projectile flight, collisions, patrol)
//! - `input`: Raw input events and the dispatcher that turns them into actions
//! - `game_loop`: Fixed-step accumulator and the loop driver
//! - `renderer`: Display-list rendering in graphics or debug mode, plus the wgpu pipeline
//! - `platform`: Window/input collaborators (native winit window, headless)
//! - `assets`: Fail-soft texture and font loading
//! - `config`: Data-driven scene layout and tuning

pub mod assets;
pub mod config;
pub mod game_loop;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game_loop::{Clock, FixedStep, GameLoop, ManualClock, SystemClock};

use glam::Vec2;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Logic updates per second
    pub const TICK_RATE: f32 = 60.0;

    /// Window / play area in pixels
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 600;

    /// Projectile is "out" below this line
    pub const FLOOR_Y: f32 = 600.0;
    /// Horizontal play area
    pub const BOUNDS_LEFT: f32 = 0.0;
    pub const BOUNDS_RIGHT: f32 = 800.0;

    /// Cannon muzzle, where every shot starts and every reset returns
    pub const LAUNCH_X: f32 = 100.0;
    pub const LAUNCH_Y: f32 = 550.0;
    pub const PROJECTILE_RADIUS: f32 = 10.0;

    /// Gravity in px/tick², only the y component is ever non-zero
    pub const INITIAL_GRAVITY: f32 = 0.05;
    pub const GRAVITY_STEP: f32 = 0.005;
    /// Pixels of drag per unit of launch velocity
    pub const LAUNCH_SCALE: f32 = 50.0;

    /// Target patrol
    pub const PATROL_LEFT: f32 = 420.0;
    pub const PATROL_RIGHT: f32 = 740.0;
    pub const PATROL_SPEED: f32 = 0.6;
    pub const TARGET_SIZE: f32 = 55.0;
    pub const TARGET_Y: f32 = 545.0;

    /// Wall obstacle
    pub const WALL_X: f32 = 400.0;
    pub const WALL_Y: f32 = 500.0;
    pub const WALL_WIDTH: f32 = 32.0;
    pub const WALL_HEIGHT: f32 = 100.0;

    /// Target sprite sheet animation
    pub const FRAME_INCREMENT: f32 = 0.3;
    pub const FRAME_COUNT: u32 = 20;
    pub const CELL_WIDTH: u32 = 52;
    pub const CELL_HEIGHT: u32 = 54;

    /// Trajectory preview: 255 sub-steps, a ghost every 20th (every 1/3 s at 60 Hz)
    pub const PREVIEW_STEPS: u32 = 255;
    pub const PREVIEW_INTERVAL: u32 = 20;

    /// Cannon barrel rotation before the first aim (degrees)
    pub const REST_ROTATION: f32 = 45.0;
}

/// Sprite-space heading of a direction vector, in degrees.
///
/// `atan2` in degrees plus 90°, so a vector pointing straight up (screen -y)
/// maps to 0°, the rest orientation of the barrel and bullet sprites.
#[inline]
pub fn heading_degrees(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x).to_degrees() + 90.0
}
