//! A single moving dot.
//!
//! Units are surface pixels and frames: velocity is pixels per frame, and
//! one [`Particle::update`] call advances one frame. There is no delta time.
//! The field is meant to move at the display's refresh rate.

use glam::Vec2;

use crate::config::ParticleConfig;
use crate::proximity;
use crate::spawn::{Spawner, CLICK_SCATTER_RADIUS};
use crate::surface::DrawSurface;

/// Velocity multiplier applied after every integration step.
pub const FRICTION: f32 = 0.99;

/// Impulse scale for pointer repulsion at zero distance.
pub const REPULSION_STRENGTH: f32 = 5.0;

/// Below this speed a particle counts as stopped and is exempt from the
/// minimum-speed floor.
pub const STOPPED_SPEED: f32 = 0.01;

/// Velocity multiplier for particles spawned by a click.
pub const CLICK_SPEED_FACTOR: f32 = 2.0;

/// Position and velocity of one dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Create a particle for a `surface` sized field.
    ///
    /// Without a spawn point, the position is uniform over the surface.
    /// With one, the particle lands within 50px of it and moves twice as
    /// fast, which is how clicks produce a small burst. Either way the
    /// direction is uniform and the base speed lies in
    /// `[min_speed, max_speed]`.
    pub fn create(
        surface: Vec2,
        config: &ParticleConfig,
        spawn_point: Option<Vec2>,
        spawner: &mut Spawner,
    ) -> Self {
        match spawn_point {
            Some(point) => {
                let position = spawner.point_in_disc(point, CLICK_SCATTER_RADIUS);
                let speed = spawner.speed_between(config.min_speed, config.max_speed);
                let direction = spawner.direction();
                Self::new(position, direction * speed * CLICK_SPEED_FACTOR)
            }
            None => {
                let position = spawner.point_in_rect(surface);
                let speed = spawner.speed_between(config.min_speed, config.max_speed);
                let direction = spawner.direction();
                Self::new(position, direction * speed)
            }
        }
    }

    /// Current speed in pixels per frame.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Advance one frame inside a `bounds` sized surface.
    ///
    /// Order matters: repulsion, speed clamp, integrate, friction, bounce,
    /// then a final clamp to `max_speed` only. The minimum is deliberately
    /// not re-applied after the bounce, so friction can pull a particle
    /// just under `min_speed` until the next frame's clamp.
    pub fn update(&mut self, pointer: Option<Vec2>, config: &ParticleConfig, bounds: Vec2) {
        if let Some(pointer) = pointer {
            self.apply_repulsion(pointer, config.repulse_radius);
        }

        let speed = self.speed();
        if speed > config.max_speed {
            self.velocity *= config.max_speed / speed;
        } else if speed < config.min_speed && speed > STOPPED_SPEED {
            self.velocity *= config.min_speed / speed;
        }

        self.position += self.velocity;
        self.velocity *= FRICTION;

        self.bounce(bounds);

        let speed = self.speed();
        if speed > config.max_speed {
            self.velocity *= config.max_speed / speed;
        }
    }

    /// Push away from `pointer` when it is closer than `radius`.
    ///
    /// The impulse is `5 * (radius - d) / radius` along the outward
    /// direction. A particle exactly on the pointer is pushed along +x.
    pub fn apply_repulsion(&mut self, pointer: Vec2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let delta = self.position - pointer;
        let distance = delta.length();
        if distance < radius {
            let force = (radius - distance) / radius;
            let angle = delta.y.atan2(delta.x);
            self.velocity += Vec2::new(angle.cos(), angle.sin()) * force * REPULSION_STRENGTH;
        }
    }

    /// Clamp into `[0, bounds]` on each axis and point the velocity back in.
    ///
    /// The sign is forced, not flipped, so a particle that was pushed
    /// outward while already past the edge cannot stay stuck there.
    pub fn bounce(&mut self, bounds: Vec2) {
        if self.position.x > bounds.x {
            self.position.x = bounds.x;
            self.velocity.x = -self.velocity.x.abs();
        } else if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = self.velocity.x.abs();
        }

        if self.position.y > bounds.y {
            self.position.y = bounds.y;
            self.velocity.y = -self.velocity.y.abs();
        } else if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = self.velocity.y.abs();
        }
    }

    /// Paint this particle's dot and its lines to nearby members of `all`.
    ///
    /// `all` is normally the whole particle set including `self`; `self` is
    /// recognised by identity and never connected to.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, all: &[Particle], config: &ParticleConfig) {
        let skip = all.iter().position(|p| std::ptr::eq(p, self));
        proximity::draw_particle(surface, self.position, skip, all.iter().map(|p| p.position), config);
    }

    /// Whether the position lies inside `[0, bounds]` on both axes.
    pub fn is_within(&self, bounds: Vec2) -> bool {
        (0.0..=bounds.x).contains(&self.position.x) && (0.0..=bounds.y).contains(&self.position.y)
    }
}
