//! Graphics skin: textured sprites plus the trajectory preview while aiming

use glam::Vec2;

use super::{Color, DrawCommand, Frame, Snapshot, colors, layout};
use crate::assets::SpriteId;
use crate::sim::{Facing, Rect};

/// Bullet sprite pivot (center of a 40x40 image)
pub const BULLET_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);
/// Barrel pivot, at the breech
pub const BARREL_ORIGIN: Vec2 = Vec2::new(22.0, 45.0);
pub const BASE_POS: Vec2 = Vec2::new(70.0, 531.0);

/// Arrow stretches with gravity
pub fn arrow_scale(gravity: f32) -> Vec2 {
    Vec2::new(1.0, gravity * 15.0 + 1.0)
}

fn arrow_tint(floored: bool) -> Color {
    if floored { colors::BLUE } else { colors::WHITE }
}

pub fn draw(snap: &Snapshot<'_>, frame: &mut Frame) {
    let state = snap.state;
    let config = snap.config;

    frame.push(DrawCommand::sprite(SpriteId::Background, Vec2::ZERO));

    // Bullet goes under the barrel
    frame.push(DrawCommand::Sprite {
        sprite: SpriteId::Bullet,
        position: state.projectile.location,
        origin: BULLET_ORIGIN,
        rotation: state.projectile.rotation,
        scale: Vec2::ONE,
        source: None,
        tint: colors::WHITE,
    });

    frame.push(DrawCommand::Sprite {
        sprite: SpriteId::Barrel,
        position: config.launch_point,
        origin: BARREL_ORIGIN,
        rotation: state.cannon_rotation,
        scale: Vec2::ONE,
        source: None,
        tint: colors::WHITE,
    });

    frame.push(DrawCommand::sprite(SpriteId::Base, BASE_POS));

    snap.push_instructions(frame);

    // Texture repeats across the whole wall
    frame.push(DrawCommand::Sprite {
        sprite: SpriteId::Wall,
        position: state.wall.rect.position,
        origin: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
        source: Some(Rect::new(Vec2::ZERO, state.wall.rect.size)),
        tint: colors::WHITE,
    });

    frame.push(DrawCommand::Sprite {
        sprite: SpriteId::Arrow,
        position: layout::GRAVITY_POS,
        origin: Vec2::ZERO,
        rotation: 0.0,
        scale: arrow_scale(state.gravity.y),
        source: None,
        tint: arrow_tint(state.gravity_floored),
    });

    let target = &state.target;
    // The sheet faces left; mirror around the cell width to face right
    let (scale, origin) = match target.facing {
        Facing::Left => (Vec2::ONE, Vec2::ZERO),
        Facing::Right => (Vec2::new(-1.0, 1.0), Vec2::new(target.cell.size.x, 0.0)),
    };
    frame.push(DrawCommand::Sprite {
        sprite: SpriteId::Gumba,
        position: target.location,
        origin,
        rotation: 0.0,
        scale,
        source: Some(target.cell),
        tint: colors::WHITE,
    });

    if snap.is_aiming() {
        for ghost in state.trajectory_preview(config) {
            frame.push(DrawCommand::Sprite {
                sprite: SpriteId::Bullet,
                position: ghost.location,
                origin: BULLET_ORIGIN,
                rotation: ghost.rotation,
                scale: Vec2::ONE,
                source: None,
                tint: [1.0, 1.0, 1.0, ghost.opacity as f32 / 255.0],
            });
        }
    }

    snap.push_score(frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::render;
    use crate::sim::GameState;

    fn graphics_state(config: &GameConfig) -> GameState {
        let mut state = GameState::new(config);
        state.toggle_render_mode();
        state
    }

    fn sprites(frame: &Frame) -> Vec<SpriteId> {
        frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_sprite_order_idle() {
        let config = GameConfig::default();
        let state = graphics_state(&config);
        let frame = render(&state, &config);
        assert_eq!(
            sprites(&frame),
            vec![
                SpriteId::Background,
                SpriteId::Bullet,
                SpriteId::Barrel,
                SpriteId::Base,
                SpriteId::Wall,
                SpriteId::Arrow,
                SpriteId::Gumba,
            ]
        );
        // Instructions between the base and the wall
        assert!(matches!(frame.commands[4], DrawCommand::Text { .. }));
    }

    #[test]
    fn test_ghosts_while_aiming() {
        let config = GameConfig::default();
        let mut state = graphics_state(&config);
        state.begin_aim(Vec2::new(250.0, 420.0), &config);

        let frame = render(&state, &config);
        let ghosts: Vec<f32> = frame.commands[8..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite {
                    sprite: SpriteId::Bullet,
                    tint,
                    ..
                } => Some(tint[3]),
                _ => None,
            })
            .collect();
        assert_eq!(ghosts.len(), 13);
        assert_eq!(ghosts[0], 1.0);
        assert!(ghosts.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_no_ghosts_when_firing() {
        let config = GameConfig::default();
        let mut state = graphics_state(&config);
        state.begin_aim(Vec2::new(250.0, 420.0), &config);
        state.release_aim(Vec2::new(250.0, 420.0), &config);
        let frame = render(&state, &config);
        assert_eq!(sprites(&frame).len(), 7);
    }

    #[test]
    fn test_target_mirrors_when_moving_right() {
        let config = GameConfig::default();
        let mut state = graphics_state(&config);

        let gumba = |state: &GameState| {
            render(state, &config).commands.into_iter().find_map(|c| match c {
                DrawCommand::Sprite {
                    sprite: SpriteId::Gumba,
                    origin,
                    scale,
                    source,
                    ..
                } => Some((origin, scale, source)),
                _ => None,
            })
        };

        let (origin, scale, source) = gumba(&state).unwrap();
        assert_eq!(scale, Vec2::new(-1.0, 1.0));
        assert_eq!(origin, Vec2::new(52.0, 0.0));
        assert_eq!(source, Some(state.target.cell));

        state.target.facing = Facing::Left;
        let (origin, scale, _) = gumba(&state).unwrap();
        assert_eq!(scale, Vec2::ONE);
        assert_eq!(origin, Vec2::ZERO);
    }

    #[test]
    fn test_arrow_indicator() {
        let config = GameConfig::default();
        let mut state = graphics_state(&config);
        state.adjust_gravity(-1.0);
        let frame = render(&state, &config);
        let arrow = frame.commands.iter().find_map(|c| match c {
            DrawCommand::Sprite {
                sprite: SpriteId::Arrow,
                scale,
                tint,
                ..
            } => Some((*scale, *tint)),
            _ => None,
        });
        assert_eq!(arrow, Some((Vec2::ONE, colors::BLUE)));
        assert!((arrow_scale(0.05).y - 1.75).abs() < 1e-5);
    }
}
