//! Dot and connecting-line rendering.
//!
//! Each particle paints its own dot and then a line to every other
//! particle closer than the proximity threshold. Pairs are not
//! deduplicated: A draws to B and B draws to A. That doubles the line work
//! (O(n²) per frame), which is fine for a few hundred particles.

use glam::Vec2;

use crate::config::ParticleConfig;
use crate::surface::DrawSurface;

/// Opacity of a line between two points `distance` apart.
///
/// Falls linearly from 1 when touching to 0 at `threshold`. Returns `None`
/// when no line should be drawn: at or beyond the threshold, or when the
/// threshold is not positive (lines disabled).
#[inline]
pub fn line_opacity(distance: f32, threshold: f32) -> Option<f32> {
    if threshold <= 0.0 || distance >= threshold {
        return None;
    }
    Some(1.0 - distance / threshold)
}

/// Paint one particle's dot and its outgoing proximity lines.
///
/// `others` may contain the particle itself; the entry at `skip` is never
/// connected to. Global alpha is restored to 1 after every line so the next
/// dot is painted fully opaque.
pub fn draw_particle<S: DrawSurface + ?Sized>(
    surface: &mut S,
    position: Vec2,
    skip: Option<usize>,
    others: impl IntoIterator<Item = Vec2>,
    config: &ParticleConfig,
) {
    surface.set_fill_color(config.dot_color);
    surface.fill_circle(position, config.particle_radius);

    if !config.lines_enabled() {
        return;
    }

    surface.set_stroke_color(config.line_color);
    surface.set_line_width(config.line_width);

    for (i, other) in others.into_iter().enumerate() {
        if Some(i) == skip {
            continue;
        }
        if let Some(opacity) = line_opacity(position.distance(other), config.proximity_threshold) {
            surface.set_global_alpha(opacity);
            surface.stroke_line(position, other);
            surface.set_global_alpha(1.0);
        }
    }
}
