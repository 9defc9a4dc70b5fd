//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only, one call to [`tick`] per logic update
//! - No rendering or platform dependencies
//! - Every tunable comes from [`crate::GameConfig`]

pub mod aim;
pub mod collision;
pub mod patrol;
pub mod rect;
pub mod state;
pub mod tick;

pub use aim::{GhostMarker, launch_velocity, predict_trajectory};
pub use collision::{Impact, Obstacle, out_of_bounds};
pub use patrol::SpriteAnimation;
pub use rect::Rect;
pub use state::{AimLine, Facing, GameState, Projectile, RenderMode, ShotState, Target, Wall};
pub use tick::tick;
