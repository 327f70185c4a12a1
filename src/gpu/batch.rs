//! CPU-side batching of circles and lines for the primitive pipeline.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::color::Color;
use crate::surface::DrawSurface;

/// One instanced quad: a filled circle or a stroked line segment.
///
/// Matches `PrimitiveIn` in the WGSL source.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Primitive {
    /// Circle centre, or line start.
    pub start: [f32; 2],
    /// Line end. Unused for circles.
    pub end: [f32; 2],
    /// sRGB colour, alpha already multiplied by the global alpha.
    pub color: [f32; 4],
    /// Circle radius, or half the line width.
    pub size: f32,
    pub kind: u32,
}

impl Primitive {
    pub const CIRCLE: u32 = 0;
    pub const LINE: u32 = 1;

    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4,
        3 => Float32,
        4 => Uint32
    ];

    pub fn circle(center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            start: center.to_array(),
            end: center.to_array(),
            color: color.to_array(),
            size: radius,
            kind: Self::CIRCLE,
        }
    }

    pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Self {
        Self {
            start: from.to_array(),
            end: to.to_array(),
            color: color.to_array(),
            size: width * 0.5,
            kind: Self::LINE,
        }
    }

    /// Instance-rate vertex layout for the primitive pipeline.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Primitive>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A [`DrawSurface`] that collects one frame's primitives in painter's order.
///
/// Drawing state (colours, width, alpha) is resolved at call time, as on a
/// canvas, so later state changes never affect earlier primitives.
#[derive(Debug, Clone)]
pub struct FrameBatch {
    primitives: Vec<Primitive>,
    fill: Color,
    stroke: Color,
    line_width: f32,
    alpha: f32,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            alpha: 1.0,
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn effective(&self, color: Color) -> Color {
        color.with_alpha(color.a * self.alpha)
    }
}

impl Default for FrameBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for FrameBatch {
    fn clear(&mut self) {
        self.primitives.clear();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        let color = self.effective(self.fill);
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        self.primitives.push(Primitive::circle(center, radius, color));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        let color = self.effective(self.stroke);
        if color.a <= 0.0 {
            return;
        }
        self.primitives
            .push(Primitive::line(from, to, self.line_width, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Primitive>(), 40);
        let layout = Primitive::layout();
        assert_eq!(layout.array_stride, 40);
        assert_eq!(layout.attributes.len(), 5);
        assert_eq!(layout.attributes[4].offset, 36);
    }

    #[test]
    fn test_state_resolved_at_call_time() {
        let mut batch = FrameBatch::new();
        batch.set_fill_color(Color::WHITE);
        batch.fill_circle(Vec2::new(5.0, 5.0), 3.0);
        batch.set_stroke_color(Color::rgb(1.0, 0.0, 0.0));
        batch.set_line_width(2.0);
        batch.set_global_alpha(0.5);
        batch.stroke_line(Vec2::ZERO, Vec2::new(10.0, 0.0));
        batch.set_global_alpha(1.0);

        let prims = batch.primitives();
        assert_eq!(prims.len(), 2);
        assert_eq!(prims[0].kind, Primitive::CIRCLE);
        assert_eq!(prims[0].color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(prims[0].size, 3.0);
        assert_eq!(prims[1].kind, Primitive::LINE);
        assert_eq!(prims[1].color, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(prims[1].size, 1.0);
        assert_eq!(prims[1].end, [10.0, 0.0]);
    }

    #[test]
    fn test_invisible_primitives_skipped() {
        let mut batch = FrameBatch::new();
        batch.set_global_alpha(0.0);
        batch.fill_circle(Vec2::ZERO, 2.0);
        batch.stroke_line(Vec2::ZERO, Vec2::ONE);
        batch.set_global_alpha(1.0);
        batch.fill_circle(Vec2::ZERO, 0.0);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_clear_keeps_state() {
        let mut batch = FrameBatch::new();
        batch.set_fill_color(Color::WHITE);
        batch.fill_circle(Vec2::ZERO, 1.0);
        batch.clear();
        assert!(batch.is_empty());

        batch.fill_circle(Vec2::ZERO, 1.0);
        assert_eq!(batch.primitives()[0].color, Color::WHITE.to_array());
    }

    #[test]
    fn test_simulation_fills_batch() {
        use crate::config::ParticleConfig;
        use crate::simulation::Simulation;

        let mut sim = Simulation::new(ParticleConfig::default().with_particle_count(25)).with_seed(4);
        sim.resize(300, 300);
        let mut batch = FrameBatch::new();
        sim.step(&mut batch);

        let circles = batch
            .primitives()
            .iter()
            .filter(|p| p.kind == Primitive::CIRCLE)
            .count();
        assert_eq!(circles, 25);
    }
}
