//! Aiming: press to start, drag to point the barrel, release to fire
//!
//! The launch velocity is the drag vector from the launch point to the
//! pointer, scaled down by `launch_scale`. While aiming, the flight path can
//! be previewed by running the same integration on a local copy.

use glam::Vec2;

use super::state::{AimLine, GameState, ShotState};
use crate::config::GameConfig;
use crate::heading_degrees;

/// Velocity a release at `pointer` would give the projectile
#[inline]
pub fn launch_velocity(launch_point: Vec2, pointer: Vec2, launch_scale: f32) -> Vec2 {
    (pointer - launch_point) / launch_scale
}

/// A non-physical marker along the predicted flight path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostMarker {
    pub location: Vec2,
    /// Sprite rotation in degrees
    pub rotation: f32,
    /// 255 = opaque
    pub opacity: u8,
}

/// Predict the flight path from `start` with `velocity` under `gravity`.
///
/// Runs `steps` sub-steps of the same integration as a real flight and drops
/// a marker every `interval` sub-steps, each fainter than the last.
pub fn predict_trajectory(
    start: Vec2,
    velocity: Vec2,
    gravity: Vec2,
    steps: u32,
    interval: u32,
) -> Vec<GhostMarker> {
    let interval = interval.max(1);
    let mut markers = Vec::with_capacity((steps / interval + 1) as usize);
    let mut location = start;
    let mut velocity = velocity;

    for i in 0..steps {
        velocity += gravity;
        location += velocity;
        if i % interval == 0 {
            markers.push(GhostMarker {
                location,
                rotation: heading_degrees(velocity),
                opacity: 255u32.saturating_sub(i) as u8,
            });
        }
    }

    markers
}

impl GameState {
    /// Idle + press -> Aiming. Ignored in any other state.
    pub fn begin_aim(&mut self, pointer: Vec2, config: &GameConfig) -> bool {
        if !self.projectile.is_idle() {
            return false;
        }
        self.projectile.state = ShotState::Aiming { pointer };
        self.point_cannon(pointer, config);
        true
    }

    /// Aiming + move -> Aiming with the new pointer
    pub fn update_aim(&mut self, pointer: Vec2, config: &GameConfig) -> bool {
        if !self.projectile.is_aiming() {
            return false;
        }
        self.projectile.state = ShotState::Aiming { pointer };
        self.point_cannon(pointer, config);
        true
    }

    /// Aiming + release -> Firing
    pub fn release_aim(&mut self, pointer: Vec2, config: &GameConfig) -> bool {
        if !self.projectile.is_aiming() {
            return false;
        }
        let velocity = launch_velocity(config.launch_point, pointer, config.launch_scale);
        self.projectile.state = ShotState::Firing { velocity };
        log::debug!("Fired with velocity ({:.2}, {:.2})", velocity.x, velocity.y);
        true
    }

    /// Line from the launch point to the pointer, only while aiming
    pub fn aim_line(&self, config: &GameConfig) -> Option<AimLine> {
        match self.projectile.state {
            ShotState::Aiming { pointer } => Some(AimLine {
                start: config.launch_point,
                end: pointer,
            }),
            _ => None,
        }
    }

    /// Ghost markers for the shot a release right now would fire
    pub fn trajectory_preview(&self, config: &GameConfig) -> Vec<GhostMarker> {
        match self.projectile.state {
            ShotState::Aiming { pointer } => predict_trajectory(
                self.projectile.location,
                launch_velocity(config.launch_point, pointer, config.launch_scale),
                self.gravity,
                config.preview_steps,
                config.preview_interval,
            ),
            _ => Vec::new(),
        }
    }

    /// Barrel and resting ball both look along the aim line
    fn point_cannon(&mut self, pointer: Vec2, config: &GameConfig) {
        let rotation = heading_degrees(pointer - config.launch_point);
        self.cannon_rotation = rotation;
        self.projectile.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_velocity_scaling() {
        let v = launch_velocity(Vec2::new(100.0, 550.0), Vec2::new(150.0, 550.0), 50.0);
        assert_eq!(v, Vec2::new(1.0, 0.0));

        let v = launch_velocity(Vec2::new(100.0, 550.0), Vec2::new(200.0, 450.0), 50.0);
        assert_eq!(v, Vec2::new(2.0, -2.0));
    }

    #[test]
    fn test_press_move_release_cycle() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);

        assert!(state.begin_aim(Vec2::new(150.0, 500.0), &config));
        assert!(state.projectile.is_aiming());
        let line = state.aim_line(&config).unwrap();
        assert_eq!(line.start, Vec2::new(100.0, 550.0));
        assert_eq!(line.end, Vec2::new(150.0, 500.0));
        // Up-right at 45° from the muzzle
        assert!((state.cannon_rotation - 45.0).abs() < 1e-3);

        assert!(state.update_aim(Vec2::new(150.0, 550.0), &config));
        assert!((state.cannon_rotation - 90.0).abs() < 1e-3);
        assert_eq!(state.projectile.rotation, state.cannon_rotation);
        assert_eq!(state.aim_line(&config).unwrap().end, Vec2::new(150.0, 550.0));

        assert!(state.release_aim(Vec2::new(150.0, 550.0), &config));
        assert!(state.projectile.is_firing());
        assert_eq!(state.projectile.velocity(), Vec2::new(1.0, 0.0));
        assert!(state.aim_line(&config).is_none());
    }

    #[test]
    fn test_input_ignored_while_firing() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.begin_aim(Vec2::new(200.0, 450.0), &config);
        state.release_aim(Vec2::new(200.0, 450.0), &config);
        let rotation = state.cannon_rotation;

        assert!(!state.begin_aim(Vec2::new(10.0, 10.0), &config));
        assert!(!state.update_aim(Vec2::new(10.0, 10.0), &config));
        assert!(!state.release_aim(Vec2::new(10.0, 10.0), &config));
        assert_eq!(state.projectile.velocity(), Vec2::new(2.0, -2.0));
        assert_eq!(state.cannon_rotation, rotation);
    }

    #[test]
    fn test_move_and_release_ignored_when_idle() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        assert!(!state.update_aim(Vec2::new(10.0, 10.0), &config));
        assert!(!state.release_aim(Vec2::new(10.0, 10.0), &config));
        assert!(state.projectile.is_idle());
        assert_eq!(state.cannon_rotation, crate::consts::REST_ROTATION);
    }

    #[test]
    fn test_preview_markers_and_fade() {
        let markers = predict_trajectory(
            Vec2::new(100.0, 550.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.05),
            255,
            20,
        );
        // Steps 0, 20, ..., 240
        assert_eq!(markers.len(), 13);
        assert_eq!(markers[0].opacity, 255);
        assert_eq!(markers[1].opacity, 235);
        assert_eq!(markers[12].opacity, 15);
        assert!(markers.windows(2).all(|w| w[0].opacity > w[1].opacity));

        // First marker is after one integration step
        assert!((markers[0].location - Vec2::new(101.0, 550.05)).length() < 1e-4);
    }

    #[test]
    fn test_preview_does_not_touch_state() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        assert!(state.trajectory_preview(&config).is_empty());

        state.begin_aim(Vec2::new(250.0, 400.0), &config);
        let before = state.clone();
        let markers = state.trajectory_preview(&config);
        assert_eq!(markers.len(), 13);
        assert_eq!(state, before);
    }

    #[test]
    fn test_preview_matches_real_flight() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.begin_aim(Vec2::new(200.0, 400.0), &config);
        let markers = state.trajectory_preview(&config);
        state.release_aim(Vec2::new(200.0, 400.0), &config);

        // Marker k sits where the ball is after 20k+1 ticks of flight
        for _ in 0..21 {
            state.step_projectile();
        }
        assert!((state.projectile.location - markers[1].location).length() < 1e-3);
    }
}
