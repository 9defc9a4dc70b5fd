//! Flight termination: leaving the play area, hitting the wall, hitting the target
//!
//! Checks run in a fixed order (bounds, wall, target) and stop at the first
//! one that ends the flight, so a single tick scores at most once.

use glam::Vec2;

use super::rect::Rect;
use super::state::GameState;
use crate::config::GameConfig;

/// How a flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Below the floor or off either side
    OutOfBounds,
    Wall,
    Target,
}

impl Impact {
    /// Only a target impact scores a hit; everything else is a miss
    pub fn is_hit(self) -> bool {
        matches!(self, Impact::Target)
    }
}

/// A rectangle the projectile can collide with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Wall,
    Target,
}

impl Obstacle {
    pub fn rect(self, state: &GameState) -> Rect {
        match self {
            Obstacle::Wall => state.wall.rect,
            Obstacle::Target => state.target.bounds(),
        }
    }

    fn impact(self) -> Impact {
        match self {
            Obstacle::Wall => Impact::Wall,
            Obstacle::Target => Impact::Target,
        }
    }
}

/// Is the projectile center outside the play area?
pub fn out_of_bounds(location: Vec2, config: &GameConfig) -> bool {
    location.y > config.floor_y || location.x < config.bounds_x.x || location.x > config.bounds_x.y
}

impl GameState {
    /// Returns `false` when the projectile has left the play area, after
    /// counting a miss and putting it back at the launch point.
    pub fn check_ground(&mut self, config: &GameConfig) -> bool {
        if out_of_bounds(self.projectile.location, config) {
            self.record_impact(Impact::OutOfBounds, config);
            return false;
        }
        true
    }

    /// Returns `false` when the projectile's box overlaps `obstacle`, after
    /// scoring the impact and putting the projectile back at the launch point.
    pub fn check_collision(&mut self, obstacle: Obstacle, config: &GameConfig) -> bool {
        if self.projectile.bounds().intersects(&obstacle.rect(self)) {
            self.record_impact(obstacle.impact(), config);
            return false;
        }
        true
    }

    /// Run the flight checks in order; `Some` when the flight ended this tick
    pub fn resolve_flight(&mut self, config: &GameConfig) -> Option<Impact> {
        if !self.check_ground(config) {
            return Some(Impact::OutOfBounds);
        }
        // Wall before target: an overlap with both counts as a wall miss
        if !self.check_collision(Obstacle::Wall, config) {
            return Some(Impact::Wall);
        }
        if !self.check_collision(Obstacle::Target, config) {
            return Some(Impact::Target);
        }
        None
    }

    fn record_impact(&mut self, impact: Impact, config: &GameConfig) {
        self.projectile.reset(config.launch_point);
        if impact.is_hit() {
            self.hits += 1;
            log::info!("Hit! (hits {}, misses {})", self.hits, self.misses);
        } else {
            self.misses += 1;
            log::info!("Miss: {:?} (hits {}, misses {})", impact, self.hits, self.misses);
        }
    }
}
