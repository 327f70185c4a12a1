//! Particle field configuration.
//!
//! A [`ParticleConfig`] is an immutable snapshot: the simulation holds it
//! behind an `Arc` and any change is made by building a new value and
//! handing it over wholesale. Changes to anything but the background
//! rebuild the particle set.
//!
//! Configurations can be written as JSON. Missing fields take their
//! defaults, so a file only needs the values it changes:
//!
//! ```json
//! {
//!   "particle_count": 80,
//!   "dot_color": "#ffffff",
//!   "repulse_radius": 120.0
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::color::{Background, Color};
use crate::error::ConfigError;

/// Everything the simulation and renderer need to know.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles created on each (re)initialize.
    pub particle_count: usize,
    /// Fill colour of the dots.
    pub dot_color: Color,
    /// Stroke colour of the connecting lines.
    pub line_color: Color,
    /// Dot radius in surface pixels.
    pub particle_radius: f32,
    /// Connecting line width in surface pixels.
    pub line_width: f32,
    /// Maximum distance at which two particles are joined. `0` disables lines.
    pub proximity_threshold: f32,
    /// Lower speed bound in pixels per frame.
    pub min_speed: f32,
    /// Upper speed bound in pixels per frame.
    pub max_speed: f32,
    /// Particles added around each click. `0` disables click spawning.
    pub spawn_on_click_count: usize,
    /// Radius of pointer repulsion. `0` disables repulsion.
    pub repulse_radius: f32,
    /// Painted behind the particles by the renderer.
    pub background: Background,
    /// Optional ceiling on the total particle count reachable through clicks.
    pub max_particles: Option<usize>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        let teal = Color::from_rgb8(0x5c, 0xbd, 0xaa);
        Self {
            particle_count: 150,
            dot_color: teal,
            line_color: teal,
            particle_radius: 3.0,
            line_width: 0.7,
            proximity_threshold: 150.0,
            min_speed: 0.6,
            max_speed: 0.6,
            spawn_on_click_count: 0,
            repulse_radius: 0.0,
            background: Background::default(),
            max_particles: None,
        }
    }
}

impl ParticleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The settings the interactive demo starts with: faster particles,
    /// five particles per click and a 100px repulsion radius.
    pub fn interactive() -> Self {
        Self {
            max_speed: 2.0,
            spawn_on_click_count: 5,
            repulse_radius: 100.0,
            ..Self::default()
        }
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_dot_color(mut self, color: Color) -> Self {
        self.dot_color = color;
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    pub fn with_particle_radius(mut self, radius: f32) -> Self {
        self.particle_radius = radius;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_proximity_threshold(mut self, threshold: f32) -> Self {
        self.proximity_threshold = threshold;
        self
    }

    /// Set both speed bounds as given. No reconciliation is applied.
    pub fn with_speed_range(mut self, min_speed: f32, max_speed: f32) -> Self {
        self.min_speed = min_speed;
        self.max_speed = max_speed;
        self
    }

    pub fn with_spawn_on_click(mut self, count: usize) -> Self {
        self.spawn_on_click_count = count;
        self
    }

    pub fn with_repulse_radius(mut self, radius: f32) -> Self {
        self.repulse_radius = radius;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_max_particles(mut self, cap: Option<usize>) -> Self {
        self.max_particles = cap;
        self
    }

    /// Set the minimum speed, raising the maximum if it would fall below.
    ///
    /// This is the policy settings UIs use to keep `min_speed <= max_speed`.
    /// The simulation itself never reconciles.
    pub fn set_min_speed(&mut self, value: f32) {
        self.min_speed = value;
        if value > self.max_speed {
            self.max_speed = value;
        }
    }

    /// Set the maximum speed, lowering the minimum if it would rise above.
    pub fn set_max_speed(&mut self, value: f32) {
        self.max_speed = value;
        if value < self.min_speed {
            self.min_speed = value;
        }
    }

    /// Whether pointer repulsion is active.
    /// Whether `other` leaves the particle field itself unchanged, i.e. the
    /// two differ at most in `background`.
    pub fn same_field(&self, other: &ParticleConfig) -> bool {
        let masked = ParticleConfig {
            background: other.background,
            ..self.clone()
        };
        masked == *other
    }

    pub fn repulsion_enabled(&self) -> bool {
        self.repulse_radius > 0.0
    }

    /// Whether proximity lines are drawn at all.
    pub fn lines_enabled(&self) -> bool {
        self.proximity_threshold > 0.0
    }

    /// Human-readable warnings for values outside their documented ranges.
    ///
    /// Nothing is clamped; callers decide what to do with the list.
    pub fn check(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.min_speed > self.max_speed {
            warnings.push(format!(
                "min_speed ({}) exceeds max_speed ({})",
                self.min_speed, self.max_speed
            ));
        }
        if self.min_speed < 0.0 {
            warnings.push(format!("min_speed ({}) is negative", self.min_speed));
        }
        if self.particle_radius <= 0.0 {
            warnings.push(format!("particle_radius ({}) should be positive", self.particle_radius));
        }
        if self.line_width < 0.0 {
            warnings.push(format!("line_width ({}) is negative", self.line_width));
        }
        if self.proximity_threshold < 0.0 {
            warnings.push(format!(
                "proximity_threshold ({}) is negative",
                self.proximity_threshold
            ));
        }
        if self.repulse_radius < 0.0 {
            warnings.push(format!("repulse_radius ({}) is negative", self.repulse_radius));
        }
        warnings
    }

    /// Log every [`check`](Self::check) warning.
    pub fn log_warnings(&self) {
        for warning in self.check() {
            log::warn!("particle config: {}", warning);
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
