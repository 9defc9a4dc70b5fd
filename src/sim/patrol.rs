//! Target patrol and sprite-sheet animation
//!
//! The target walks back and forth between two x thresholds at constant speed
//! and cycles through the cells of its sprite sheet every tick, whether or not
//! a shot is in the air.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Facing, Target};
use crate::config::GameConfig;

/// Fractional frame counter over a horizontal strip of sprite cells
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAnimation {
    /// Accumulated frames; the integer part is the cell index
    pub counter: f32,
    pub increment: f32,
    pub frame_count: u32,
    /// Cell currently selected (`None` until the first advance)
    pub frame: Option<u32>,
}

impl SpriteAnimation {
    pub fn new(increment: f32, frame_count: u32) -> Self {
        Self {
            counter: 0.0,
            increment,
            frame_count,
            frame: None,
        }
    }

    /// Advance one tick. Returns the new cell index only when it changed.
    pub fn advance(&mut self) -> Option<u32> {
        self.counter += self.increment;
        let mut frame = self.counter as u32;
        if frame >= self.frame_count {
            frame = 0;
            self.counter = 0.0;
        }

        if self.frame == Some(frame) {
            return None;
        }
        self.frame = Some(frame);
        Some(frame)
    }

    pub fn current(&self) -> u32 {
        self.frame.unwrap_or(0)
    }
}

impl Target {
    /// Turn around past either threshold, then move one tick
    pub fn patrol(&mut self, config: &GameConfig) {
        let (left, right) = (config.patrol_bounds.x, config.patrol_bounds.y);

        // Thresholds are strictly ordered (validated), so at most one branch applies
        if self.location.x < left {
            self.velocity.x = config.patrol_speed;
            self.facing = Facing::Right;
        } else if self.location.x > right {
            self.velocity.x = -config.patrol_speed;
            self.facing = Facing::Left;
        }
        self.location += self.velocity;
    }

    /// Step the animation; re-selects the sheet cell only on a frame change
    pub fn animate(&mut self, config: &GameConfig) -> bool {
        match self.animation.advance() {
            Some(frame) => {
                let cell_size = config.cell_size.as_vec2();
                self.cell = Rect::new(Vec2::new(frame as f32 * cell_size.x, 0.0), cell_size);
                true
            }
            None => false,
        }
    }
}
