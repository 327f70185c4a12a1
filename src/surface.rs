//! The drawing capability the simulation paints onto.
//!
//! [`DrawSurface`] is a minimal immediate-mode 2D API in the style of an
//! HTML canvas context: state setters (fill colour, stroke colour, line
//! width, global alpha) followed by primitives that use the current state.
//! Coordinates are surface pixels with the origin at the top-left.
//!
//! [`RecordingSurface`] keeps every call in order and is what tests and
//! benchmarks draw onto. The GPU renderer has its own implementation in
//! `gpu::FrameBatch`.

use glam::Vec2;

use crate::color::Color;

/// Pixel size of the drawing surface. These are the bounce boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceDimensions {
    pub width: u32,
    pub height: u32,
}

impl SurfaceDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-sized surface is treated as not yet available.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl From<(u32, u32)> for SurfaceDimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Minimal 2D immediate-mode drawing target.
pub trait DrawSurface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    /// Opacity multiplier applied to every subsequent primitive.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Filled circle using the current fill colour and global alpha.
    fn fill_circle(&mut self, center: Vec2, radius: f32);

    /// Straight line using the current stroke colour, line width and global alpha.
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f32),
    SetGlobalAlpha(f32),
    FillCircle { center: Vec2, radius: f32 },
    StrokeLine { from: Vec2, to: Vec2 },
}

/// A circle as it was painted, with the state that applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintedCircle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alpha: f32,
}

/// A line as it was painted, with the state that applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintedLine {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
    pub alpha: f32,
}

/// A [`DrawSurface`] that records calls instead of rasterizing them.
///
/// `clear()` is recorded too but does not drop earlier commands; use
/// [`since_last_clear`](Self::since_last_clear) to look at a single frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands recorded after the most recent `clear()`.
    pub fn since_last_clear(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Drop all recorded commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear))
            .count()
    }

    /// Circles since the last clear, with the state in effect for each.
    pub fn circles(&self) -> Vec<PaintedCircle> {
        let mut circles = Vec::new();
        replay(self.since_last_clear(), |state, cmd| {
            if let DrawCommand::FillCircle { center, radius } = *cmd {
                circles.push(PaintedCircle {
                    center,
                    radius,
                    color: state.fill,
                    alpha: state.alpha,
                });
            }
        });
        circles
    }

    /// Lines since the last clear, with the state in effect for each.
    pub fn lines(&self) -> Vec<PaintedLine> {
        let mut lines = Vec::new();
        replay(self.since_last_clear(), |state, cmd| {
            if let DrawCommand::StrokeLine { from, to } = *cmd {
                lines.push(PaintedLine {
                    from,
                    to,
                    width: state.line_width,
                    color: state.stroke,
                    alpha: state.alpha,
                });
            }
        });
        lines
    }

    /// Global alpha in effect after the last recorded command.
    pub fn current_alpha(&self) -> f32 {
        let mut alpha = 1.0;
        replay(&self.commands, |state, _| alpha = state.alpha);
        alpha
    }
}

struct ReplayState {
    fill: Color,
    stroke: Color,
    line_width: f32,
    alpha: f32,
}

/// Walk commands, calling `visit` with the state as it stands after each one.
fn replay(commands: &[DrawCommand], mut visit: impl FnMut(&ReplayState, &DrawCommand)) {
    let mut state = ReplayState {
        fill: Color::BLACK,
        stroke: Color::BLACK,
        line_width: 1.0,
        alpha: 1.0,
    };
    for cmd in commands {
        match *cmd {
            DrawCommand::SetFillColor(c) => state.fill = c,
            DrawCommand::SetStrokeColor(c) => state.stroke = c,
            DrawCommand::SetLineWidth(w) => state.line_width = w,
            DrawCommand::SetGlobalAlpha(a) => state.alpha = a,
            DrawCommand::Clear | DrawCommand::FillCircle { .. } | DrawCommand::StrokeLine { .. } => {}
        }
        visit(&state, cmd);
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetGlobalAlpha(alpha));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::StrokeLine { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_state_per_primitive() {
        let mut surface = RecordingSurface::new();
        surface.set_fill_color(Color::WHITE);
        surface.fill_circle(Vec2::new(1.0, 2.0), 3.0);
        surface.set_stroke_color(Color::BLACK);
        surface.set_line_width(2.0);
        surface.set_global_alpha(0.25);
        surface.stroke_line(Vec2::ZERO, Vec2::ONE);
        surface.set_global_alpha(1.0);

        let circles = surface.circles();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].color, Color::WHITE);
        assert_eq!(circles[0].alpha, 1.0);

        let lines = surface.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 2.0);
        assert_eq!(lines[0].alpha, 0.25);
        assert_eq!(surface.current_alpha(), 1.0);
    }

    #[test]
    fn test_dimensions_emptiness() {
        assert!(SurfaceDimensions::default().is_empty());
        assert!(SurfaceDimensions::new(0, 600).is_empty());
        assert!(!SurfaceDimensions::new(800, 600).is_empty());
        assert_eq!(SurfaceDimensions::from((3, 4)).as_vec2(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_since_last_clear() {
        let mut surface = RecordingSurface::new();
        surface.fill_circle(Vec2::ZERO, 1.0);
        surface.clear();
        surface.fill_circle(Vec2::ONE, 1.0);
        surface.fill_circle(Vec2::ONE, 2.0);

        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.since_last_clear().len(), 2);
        assert_eq!(surface.circles().len(), 2);
        assert_eq!(surface.commands().len(), 4);

        surface.reset();
        assert!(surface.commands().is_empty());
    }
}
