//! The uniform block shared by both pipelines.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::color::Background;

/// Matches `Globals` in the WGSL source (80 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub canvas_size: [f32; 2],
    pub viewport_size: [f32; 2],
    pub gradient_from: [f32; 4],
    pub gradient_to: [f32; 4],
    pub gradient_axis: [f32; 4],
    pub linear_output: u32,
    _pad: [u32; 3],
}

impl Globals {
    /// Uniforms for one frame.
    ///
    /// `canvas` is the size the simulation draws in and `viewport` the
    /// window's logical size. They differ while a resize is being debounced,
    /// which stretches the particle layer over the window.
    pub fn new(canvas: Vec2, viewport: Vec2, background: &Background, linear_output: bool) -> Self {
        let (angle_deg, from, to) = background.stops();
        let (direction, length) = gradient_axis(angle_deg, viewport);
        Self {
            canvas_size: safe_size(canvas).to_array(),
            viewport_size: safe_size(viewport).to_array(),
            gradient_from: from.to_array(),
            gradient_to: to.to_array(),
            gradient_axis: [direction.x, direction.y, length, 0.0],
            linear_output: linear_output as u32,
            _pad: [0; 3],
        }
    }
}

/// Direction (y down) and length of a CSS `linear-gradient` line.
///
/// 0° points up and angles turn clockwise. The line passes through the
/// centre and is long enough that the corners sit exactly on the first and
/// last stop.
pub fn gradient_axis(angle_deg: f32, size: Vec2) -> (Vec2, f32) {
    let angle = angle_deg.to_radians();
    let (sin, cos) = angle.sin_cos();
    let direction = Vec2::new(sin, -cos);
    let length = (size.x * sin).abs() + (size.y * cos).abs();
    (direction, length)
}

fn safe_size(size: Vec2) -> Vec2 {
    size.max(Vec2::ONE)
}
