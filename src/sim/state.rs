//! Game state and core simulation types
//!
//! One hard-coded scene: a cannon, a wall, a patrolling target and a single
//! projectile. All of it lives for the whole process; nothing is persisted.

use glam::Vec2;

use super::patrol::SpriteAnimation;
use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::REST_ROTATION;

/// Which skin the renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Primitive shapes only
    #[default]
    Debug,
    /// Textured sprites and the trajectory preview
    Graphics,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Debug => RenderMode::Graphics,
            RenderMode::Graphics => RenderMode::Debug,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Debug => "debug",
            RenderMode::Graphics => "graphics",
        }
    }
}

/// Shot lifecycle: Idle -> Aiming -> Firing -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ShotState {
    /// Resting at the launch point
    #[default]
    Idle,
    /// Button held; `pointer` is the latest pointer position
    Aiming { pointer: Vec2 },
    /// In flight
    Firing { velocity: Vec2 },
}

/// The cannonball
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Center of the ball
    pub location: Vec2,
    pub radius: f32,
    /// Sprite rotation in degrees (see [`crate::heading_degrees`])
    pub rotation: f32,
    pub state: ShotState,
}

impl Projectile {
    pub fn new(launch_point: Vec2, radius: f32) -> Self {
        Self {
            location: launch_point,
            radius,
            rotation: REST_ROTATION,
            state: ShotState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, ShotState::Idle)
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self.state, ShotState::Aiming { .. })
    }

    pub fn is_firing(&self) -> bool {
        matches!(self.state, ShotState::Firing { .. })
    }

    /// Current velocity (zero unless in flight)
    pub fn velocity(&self) -> Vec2 {
        match self.state {
            ShotState::Firing { velocity } => velocity,
            _ => Vec2::ZERO,
        }
    }

    /// Bounding box used for collision tests
    pub fn bounds(&self) -> Rect {
        Rect::around(self.location, self.radius)
    }

    /// Back to the launch point, ending any flight
    pub fn reset(&mut self, launch_point: Vec2) {
        self.location = launch_point;
        self.state = ShotState::Idle;
    }
}

/// Line from the launch point to the pointer, only meaningful while aiming
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimLine {
    pub start: Vec2,
    pub end: Vec2,
}

/// Which way the target sprite looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Sprite sheet's native orientation
    Left,
    /// Mirrored horizontally
    Right,
}

/// The patrolling target
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Top-left corner
    pub location: Vec2,
    /// Only the x component is used
    pub velocity: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub animation: SpriteAnimation,
    /// Sprite sheet cell currently shown (texture pixels)
    pub cell: Rect,
}

impl Target {
    pub fn new(config: &GameConfig) -> Self {
        let mut target = Self {
            location: config.target_start,
            velocity: Vec2::new(config.patrol_speed, 0.0),
            size: config.target_size,
            facing: Facing::Right,
            animation: SpriteAnimation::new(config.frame_increment, config.frame_count),
            cell: Rect::new(Vec2::ZERO, config.cell_size.as_vec2()),
        };
        // Select the first cell
        target.animate(config);
        target
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.location, self.size)
    }
}

/// Static obstacle between the cannon and the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub rect: Rect,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Escape or window close seen; the loop stops at the next update
    pub exit_requested: bool,
    pub render_mode: RenderMode,
    pub hits: u32,
    pub misses: u32,
    /// Per-tick acceleration, x is always zero and y never negative
    pub gravity: Vec2,
    /// Last gravity adjustment hit the zero clamp (drives the indicator colour)
    pub gravity_floored: bool,
    /// Barrel rotation in degrees
    pub cannon_rotation: f32,
    pub projectile: Projectile,
    pub target: Target,
    pub wall: Wall,
    /// Logic ticks performed
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            exit_requested: false,
            render_mode: RenderMode::default(),
            hits: 0,
            misses: 0,
            gravity: Vec2::new(0.0, config.initial_gravity),
            gravity_floored: false,
            cannon_rotation: REST_ROTATION,
            projectile: Projectile::new(config.launch_point, config.projectile_radius),
            target: Target::new(config),
            wall: Wall {
                rect: Rect::new(config.wall_position, config.wall_size),
            },
            time_ticks: 0,
        }
    }

    /// Change gravity by `amount`, never letting it go below zero
    pub fn adjust_gravity(&mut self, amount: f32) {
        self.gravity.y += amount;
        self.gravity_floored = false;
        if self.gravity.y < 0.0 {
            self.gravity.y = 0.0;
            self.gravity_floored = true;
        }
        log::debug!(
            "Gravity {:.3}{}",
            self.gravity.y,
            if self.gravity_floored { " (clamped)" } else { "" }
        );
    }

    pub fn toggle_render_mode(&mut self) {
        self.render_mode = self.render_mode.toggled();
        log::info!("Render mode: {}", self.render_mode.as_str());
    }

    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            log::info!("Exit requested (hits {}, misses {})", self.hits, self.misses);
        }
        self.exit_requested = true;
    }
}
