//! Rendering
//!
//! [`render`] turns the game state into a [`Frame`], a backend-agnostic list
//! of draw commands in play-area pixels. The render mode picks the skin:
//! [`debug`] draws primitive shapes, [`graphics`] draws textured sprites and
//! the trajectory preview. Both read the same [`Snapshot`].
//!
//! The GPU side ([`shapes`], [`text`], [`vertex`], [`pipeline`]) tessellates a
//! frame, HUD text included, and draws it with wgpu.

pub mod debug;
pub mod graphics;
pub mod pipeline;
pub mod shapes;
pub mod text;
pub mod vertex;

use glam::Vec2;

use crate::assets::SpriteId;
use crate::config::GameConfig;
use crate::sim::{AimLine, GameState, Rect};

pub use crate::sim::RenderMode;
pub use pipeline::RenderState;

/// Linear RGBA
pub type Color = [f32; 4];

pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    pub const BLUE: Color = [0.0, 0.0, 1.0, 1.0];
    pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
}

/// HUD and indicator placement shared by both skins
pub mod layout {
    use glam::Vec2;

    pub const INSTRUCTIONS: &str = "left mouse click to load, release to fire";
    pub const INSTRUCTIONS_POS: Vec2 = Vec2::new(40.0, 40.0);
    pub const INSTRUCTIONS_SIZE: f32 = 30.0;
    pub const HITS_POS: Vec2 = Vec2::new(40.0, 80.0);
    pub const MISSES_POS: Vec2 = Vec2::new(40.0, 110.0);
    pub const SCORE_SIZE: f32 = 20.0;

    /// Top-left of the gravity bar / arrow
    pub const GRAVITY_POS: Vec2 = Vec2::new(760.0, 40.0);
    pub const GRAVITY_BAR_WIDTH: f32 = 20.0;
}

/// One thing to draw, in draw order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle with its top-left at `position - origin`, rotated by
    /// `rotation` degrees around `position`
    Rect {
        position: Vec2,
        size: Vec2,
        origin: Vec2,
        rotation: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        start: Vec2,
        end: Vec2,
        color: Color,
    },
    /// Textured quad. `source` selects texture pixels (defaults to the whole
    /// texture; may exceed it for repeated textures). Transform order is
    /// origin, scale, rotation, position.
    Sprite {
        sprite: SpriteId,
        position: Vec2,
        origin: Vec2,
        rotation: f32,
        scale: Vec2,
        source: Option<Rect>,
        tint: Color,
    },
    Text {
        text: String,
        position: Vec2,
        size: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// Untransformed, untinted sprite at `position`
    pub fn sprite(sprite: SpriteId, position: Vec2) -> Self {
        DrawCommand::Sprite {
            sprite,
            position,
            origin: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            source: None,
            tint: colors::WHITE,
        }
    }

    pub fn text(text: impl Into<String>, position: Vec2, size: f32, color: Color) -> Self {
        DrawCommand::Text {
            text: text.into(),
            position,
            size,
            color,
        }
    }
}

/// A complete frame: clear colour plus draw commands
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub clear: Color,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new(clear: Color) -> Self {
        Self {
            clear,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Text of every text command, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Values both skins read, gathered once per frame
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub state: &'a GameState,
    pub config: &'a GameConfig,
    pub aim_line: Option<AimLine>,
    pub hits_text: String,
    pub misses_text: String,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState, config: &'a GameConfig) -> Self {
        Self {
            state,
            config,
            aim_line: state.aim_line(config),
            hits_text: format!("Hits {}", state.hits),
            misses_text: format!("Misses {}", state.misses),
        }
    }

    pub fn is_aiming(&self) -> bool {
        self.aim_line.is_some()
    }

    pub fn push_instructions(&self, frame: &mut Frame) {
        frame.push(DrawCommand::text(
            layout::INSTRUCTIONS,
            layout::INSTRUCTIONS_POS,
            layout::INSTRUCTIONS_SIZE,
            colors::YELLOW,
        ));
    }

    pub fn push_score(&self, frame: &mut Frame) {
        frame.push(DrawCommand::text(
            self.hits_text.clone(),
            layout::HITS_POS,
            layout::SCORE_SIZE,
            colors::BLUE,
        ));
        frame.push(DrawCommand::text(
            self.misses_text.clone(),
            layout::MISSES_POS,
            layout::SCORE_SIZE,
            colors::BLUE,
        ));
    }
}

/// Draw the current state in its render mode
pub fn render(state: &GameState, config: &GameConfig) -> Frame {
    let snapshot = Snapshot::capture(state, config);
    let mut frame = Frame::new(colors::WHITE);
    match state.render_mode {
        RenderMode::Debug => debug::draw(&snapshot, &mut frame),
        RenderMode::Graphics => graphics::draw(&snapshot, &mut frame),
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_picks_skin() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);

        let frame = render(&state, &config);
        assert_eq!(frame.clear, colors::WHITE);
        assert!(!frame.commands.iter().any(|c| matches!(c, DrawCommand::Sprite { .. })));

        state.toggle_render_mode();
        let frame = render(&state, &config);
        assert!(matches!(
            frame.commands[0],
            DrawCommand::Sprite {
                sprite: SpriteId::Background,
                ..
            }
        ));
    }

    #[test]
    fn test_hud_text_in_both_skins() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.hits = 2;
        state.misses = 5;

        for _ in 0..2 {
            let frame = render(&state, &config);
            let texts: Vec<_> = frame.texts().collect();
            assert_eq!(texts, vec![layout::INSTRUCTIONS, "Hits 2", "Misses 5"]);
            state.toggle_render_mode();
        }
    }

    #[test]
    fn test_render_is_read_only() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.begin_aim(Vec2::new(200.0, 450.0), &config);
        state.toggle_render_mode();
        let before = state.clone();
        let _ = render(&state, &config);
        assert_eq!(state, before);
    }
}
