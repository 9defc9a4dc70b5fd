//! Tessellation of a [`Frame`] into triangles
//!
//! Output stays in play-area pixels; the pipeline maps to clip space.
//! Consecutive commands that use the same texture share one batch.

use std::f32::consts::PI;
use std::ops::Range;

use glam::{Affine2, UVec2, Vec2};

use super::text;
use super::vertex::Vertex;
use super::{Color, DrawCommand, Frame};
use crate::assets::SpriteId;
use crate::sim::Rect;

const CIRCLE_SEGMENTS: u32 = 30;
const LINE_WIDTH: f32 = 1.5;

/// A run of vertices drawn with one texture (`None` = flat white)
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texture: Option<SpriteId>,
    pub vertices: Range<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub batches: Vec<Batch>,
}

impl Mesh {
    fn extend(&mut self, texture: Option<SpriteId>, vertices: impl IntoIterator<Item = Vertex>) {
        let start = self.vertices.len() as u32;
        self.vertices.extend(vertices);
        let end = self.vertices.len() as u32;
        if start == end {
            return;
        }
        match self.batches.last_mut() {
            Some(batch) if batch.texture == texture && batch.vertices.end == start => {
                batch.vertices.end = end;
            }
            _ => self.batches.push(Batch {
                texture,
                vertices: start..end,
            }),
        }
    }
}

/// Sprite-style transform: origin, then scale, rotation (degrees), position
pub fn transform(position: Vec2, origin: Vec2, rotation: f32, scale: Vec2) -> Affine2 {
    Affine2::from_translation(position)
        * Affine2::from_angle(rotation.to_radians())
        * Affine2::from_scale(scale)
        * Affine2::from_translation(-origin)
}

/// Two triangles over `corners` (clockwise from top-left)
pub fn quad(corners: [Vec2; 4], uvs: [Vec2; 4], color: Color) -> [Vertex; 6] {
    let v = |i: usize| Vertex::new(corners[i].x, corners[i].y, uvs[i].x, uvs[i].y, color);
    [v(0), v(1), v(2), v(0), v(2), v(3)]
}

/// Filled, possibly rotated rectangle
pub fn rect(size: Vec2, xf: Affine2, color: Color) -> [Vertex; 6] {
    let corners = [Vec2::ZERO, Vec2::new(size.x, 0.0), size, Vec2::new(0.0, size.y)]
        .map(|p| xf.transform_point2(p));
    quad(corners, [Vec2::ZERO; 4], color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::flat(center.x, center.y, color));
        vertices.push(Vertex::flat(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::flat(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Thin quad along a segment
pub fn line(start: Vec2, end: Vec2, width: f32, color: Color) -> [Vertex; 6] {
    let dir = (end - start).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(
        [start + perp, end + perp, end - perp, start - perp],
        [Vec2::ZERO; 4],
        color,
    )
}

/// Textured quad. `source` is in texture pixels and may run past the
/// texture edge (the sampler repeats).
pub fn sprite(texture_size: UVec2, source: Option<Rect>, xf: Affine2, tint: Color) -> [Vertex; 6] {
    let tex = texture_size.as_vec2();
    let (offset, size) = match source {
        Some(r) => (r.position, r.size),
        None => (Vec2::ZERO, tex),
    };
    let local = [Vec2::ZERO, Vec2::new(size.x, 0.0), size, Vec2::new(0.0, size.y)];
    let corners = local.map(|p| xf.transform_point2(p));
    let uvs = local.map(|p| (offset + p) / tex);
    quad(corners, uvs, tint)
}

/// Tessellate a frame. `texture_size` reports loaded textures; sprites
/// without one are skipped.
pub fn tessellate(frame: &Frame, texture_size: impl Fn(SpriteId) -> Option<UVec2>) -> Mesh {
    let mut mesh = Mesh::default();

    for command in &frame.commands {
        match command {
            DrawCommand::Rect {
                position,
                size,
                origin,
                rotation,
                color,
            } => {
                let xf = transform(*position, *origin, *rotation, Vec2::ONE);
                mesh.extend(None, rect(*size, xf, *color));
            }
            DrawCommand::Circle { center, radius, color } => {
                mesh.extend(None, circle(*center, *radius, *color, CIRCLE_SEGMENTS));
            }
            DrawCommand::Line { start, end, color } => {
                mesh.extend(None, line(*start, *end, LINE_WIDTH, *color));
            }
            DrawCommand::Sprite {
                sprite: id,
                position,
                origin,
                rotation,
                scale,
                source,
                tint,
            } => {
                let Some(size) = texture_size(*id).filter(|s| s.x > 0 && s.y > 0) else {
                    continue;
                };
                let xf = transform(*position, *origin, *rotation, *scale);
                mesh.extend(Some(*id), sprite(size, *source, xf, *tint));
            }
            DrawCommand::Text {
                text: content,
                position,
                size,
                color,
            } => {
                mesh.extend(None, text::text(content, *position, *size, *color));
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn pos(v: &Vertex) -> Vec2 {
        Vec2::from(v.position)
    }

    #[test]
    fn test_transform_pivots_around_origin() {
        // 20x70 rect centred on (100, 550), rotated 90°
        let xf = transform(Vec2::new(100.0, 550.0), Vec2::new(10.0, 35.0), 90.0, Vec2::ONE);
        assert!(close(xf.transform_point2(Vec2::new(10.0, 35.0)), Vec2::new(100.0, 550.0)));
        // Top-left corner swings to the right of the pivot
        assert!(close(xf.transform_point2(Vec2::ZERO), Vec2::new(135.0, 540.0)));
    }

    #[test]
    fn test_mirrored_sprite_covers_same_area() {
        let xf = transform(
            Vec2::new(420.0, 545.0),
            Vec2::new(52.0, 0.0),
            0.0,
            Vec2::new(-1.0, 1.0),
        );
        let cell = Rect::new(Vec2::ZERO, Vec2::new(52.0, 54.0));
        let verts = sprite(UVec2::new(1040, 54), Some(cell), xf, colors::WHITE);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let min = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min - 420.0).abs() < 1e-3);
        assert!((max - 472.0).abs() < 1e-3);
    }

    #[test]
    fn test_repeated_source_uvs() {
        let verts = sprite(
            UVec2::new(16, 50),
            Some(Rect::new(Vec2::ZERO, Vec2::new(32.0, 100.0))),
            Affine2::IDENTITY,
            colors::WHITE,
        );
        assert_eq!(verts[2].uv, [2.0, 2.0]);
        assert_eq!(pos(&verts[2]), Vec2::new(32.0, 100.0));
    }

    #[test]
    fn test_batches_merge_and_skip_missing() {
        let mut frame = Frame::new(colors::WHITE);
        frame.push(DrawCommand::Circle {
            center: Vec2::ZERO,
            radius: 5.0,
            color: colors::RED,
        });
        frame.push(DrawCommand::Line {
            start: Vec2::ZERO,
            end: Vec2::new(10.0, 0.0),
            color: colors::BLACK,
        });
        frame.push(DrawCommand::sprite(SpriteId::Bullet, Vec2::ZERO));
        frame.push(DrawCommand::sprite(SpriteId::Bullet, Vec2::ONE));
        frame.push(DrawCommand::sprite(SpriteId::Wall, Vec2::ZERO));
        frame.push(DrawCommand::text("Hits 0", Vec2::ZERO, 20.0, colors::BLUE));

        let mesh = tessellate(&frame, |id| match id {
            SpriteId::Bullet => Some(UVec2::new(40, 40)),
            _ => None,
        });

        let flat = CIRCLE_SEGMENTS * 3 + 6;
        let hud = text::text("Hits 0", Vec2::ZERO, 20.0, colors::BLUE).len() as u32;
        assert!(hud > 0);
        assert_eq!(
            mesh.batches,
            vec![
                Batch {
                    texture: None,
                    vertices: 0..flat,
                },
                Batch {
                    texture: Some(SpriteId::Bullet),
                    vertices: flat..flat + 12,
                },
                Batch {
                    texture: None,
                    vertices: flat + 12..flat + 12 + hud,
                },
            ]
        );
        assert_eq!(mesh.vertices.len() as u32, flat + 12 + hud);
    }

    #[test]
    fn test_line_has_width() {
        let verts = line(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, colors::BLACK);
        assert!(close(pos(&verts[0]), Vec2::new(0.0, 1.0)));
        assert!(close(pos(&verts[2]), Vec2::new(10.0, -1.0)));
    }
}
