//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::scene::DrawCommand;
use crate::sim::Rect;

/// Triangle fan resolution for filled circles
pub const CIRCLE_SEGMENTS: u32 = 36;

/// Default stroke width for lines, in pixels
pub const LINE_WIDTH: f32 = 1.0;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Four corners as two triangles
fn quad(a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let min = rect.pos;
    let max = rect.pos + rect.size;
    quad(
        min,
        Vec2::new(max.x, min.y),
        Vec2::new(min.x, max.y),
        max,
        color,
    )
}

/// Generate vertices for a line segment as a thin quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> [Vertex; 6] {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(from + perp, from - perp, to + perp, to - perp, color)
}

/// Vertex data for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellation {
    /// Background color from the last `Clear`, if any
    pub clear: Option<[f32; 4]>,
    pub vertices: Vec<Vertex>,
}

/// Convert a draw list to triangles, in screen pixels
///
/// `Clear` discards everything before it. Text commands are skipped.
pub fn tessellate(commands: &[DrawCommand]) -> Tessellation {
    let mut out = Tessellation::default();

    for command in commands {
        match command {
            DrawCommand::Clear(color) => {
                out.clear = Some(color.to_f32());
                out.vertices.clear();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => out
                .vertices
                .extend(circle(*center, *radius, color.to_f32(), CIRCLE_SEGMENTS)),
            DrawCommand::Rect { rect: r, color } => {
                out.vertices.extend(rect(r, color.to_f32()));
            }
            DrawCommand::Line { from, to, color } => {
                out.vertices
                    .extend(line(*from, *to, LINE_WIDTH, color.to_f32()));
            }
            DrawCommand::Text { .. } => {}
        }
    }

    out
}
