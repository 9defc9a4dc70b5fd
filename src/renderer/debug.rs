//! Debug skin: flat shapes, no textures

use glam::Vec2;

use super::{Color, DrawCommand, Frame, Snapshot, colors, layout};

/// Cannon barrel rectangle, pivoting around its center at the launch point
pub const CANNON_SIZE: Vec2 = Vec2::new(20.0, 70.0);

/// Gravity bar height for a gravity value
pub fn gravity_bar_height(gravity: f32) -> f32 {
    gravity * 500.0 + 50.0
}

fn gravity_bar_color(floored: bool) -> Color {
    if floored { colors::RED } else { colors::BLUE }
}

pub fn draw(snap: &Snapshot<'_>, frame: &mut Frame) {
    let state = snap.state;

    snap.push_instructions(frame);

    frame.push(DrawCommand::Rect {
        position: snap.config.launch_point,
        size: CANNON_SIZE,
        origin: CANNON_SIZE / 2.0,
        rotation: state.cannon_rotation,
        color: colors::BLACK,
    });

    frame.push(DrawCommand::Rect {
        position: state.wall.rect.position,
        size: state.wall.rect.size,
        origin: Vec2::ZERO,
        rotation: 0.0,
        color: colors::BLACK,
    });

    frame.push(DrawCommand::Rect {
        position: layout::GRAVITY_POS,
        size: Vec2::new(layout::GRAVITY_BAR_WIDTH, gravity_bar_height(state.gravity.y)),
        origin: Vec2::ZERO,
        rotation: 0.0,
        color: gravity_bar_color(state.gravity_floored),
    });

    let target = state.target.bounds();
    frame.push(DrawCommand::Rect {
        position: target.position,
        size: target.size,
        origin: Vec2::ZERO,
        rotation: 0.0,
        color: colors::GREEN,
    });

    if let Some(line) = snap.aim_line {
        frame.push(DrawCommand::Line {
            start: line.start,
            end: line.end,
            color: colors::BLACK,
        });
    }

    frame.push(DrawCommand::Circle {
        center: state.projectile.location,
        radius: state.projectile.radius,
        color: colors::RED,
    });

    snap.push_score(frame);
}
