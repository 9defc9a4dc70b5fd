//! Fixed timestep simulation tick
//!
//! One logic update: the target always patrols and animates; a projectile in
//! flight integrates one step and then runs the flight checks.

use super::collision::Impact;
use super::state::{GameState, ShotState};
use crate::config::GameConfig;
use crate::heading_degrees;

/// Advance the game state by one fixed tick. Returns how the flight ended,
/// if it ended this tick.
pub fn tick(state: &mut GameState, config: &GameConfig) -> Option<Impact> {
    state.time_ticks += 1;

    state.target.patrol(config);
    state.target.animate(config);

    if !state.projectile.is_firing() {
        return None;
    }

    state.step_projectile();
    let impact = state.resolve_flight(config);
    log::trace!(
        "tick {}: ball ({:.1}, {:.1}) {:?}",
        state.time_ticks,
        state.projectile.location.x,
        state.projectile.location.y,
        impact
    );
    impact
}

impl GameState {
    /// Semi-implicit Euler: velocity picks up gravity first, then moves the ball
    pub fn step_projectile(&mut self) {
        if let ShotState::Firing { ref mut velocity } = self.projectile.state {
            *velocity += self.gravity;
            self.projectile.location += *velocity;
            self.projectile.rotation = heading_degrees(*velocity);
        }
    }
}
