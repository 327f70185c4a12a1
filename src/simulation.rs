//! The particle field: particle set, per-frame stepping, click spawning.

use std::sync::Arc;

use glam::Vec2;

use crate::config::ParticleConfig;
use crate::particle::Particle;
use crate::pointer::SharedPointer;
use crate::spawn::Spawner;
use crate::surface::{DrawSurface, SurfaceDimensions};

/// How [`Simulation::step`] interleaves updating and drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepOrder {
    /// Update particle `i`, draw it, then move on to `i + 1`.
    ///
    /// Lines drawn by particle `i` see already-moved positions for earlier
    /// particles and last frame's positions for later ones. This is how the
    /// field has always looked.
    #[default]
    Interleaved,
    /// Update every particle, then draw every particle. Lines always join
    /// this frame's positions.
    UpdateThenDraw,
}

/// Owns the particle set and advances it one frame at a time.
///
/// The configuration is held as an immutable snapshot; replacing it
/// rebuilds the whole set, discarding click-spawned particles too.
///
/// ```
/// use particlebg::prelude::*;
///
/// let mut sim = Simulation::new(ParticleConfig::default().with_particle_count(20))
///     .with_seed(1);
/// sim.resize(640, 480);
///
/// let mut surface = RecordingSurface::new();
/// sim.step(&mut surface);
/// assert_eq!(surface.circles().len(), 20);
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: Arc<ParticleConfig>,
    particles: Vec<Particle>,
    dimensions: SurfaceDimensions,
    pointer: SharedPointer,
    spawner: Spawner,
    order: StepOrder,
    frame: u64,
}

impl Simulation {
    /// A simulation with no surface yet. Call [`initialize`](Self::initialize)
    /// or [`resize`](Self::resize) before stepping.
    pub fn new(config: ParticleConfig) -> Self {
        config.log_warnings();
        Self {
            config: Arc::new(config),
            particles: Vec::new(),
            dimensions: SurfaceDimensions::default(),
            pointer: SharedPointer::new(),
            spawner: Spawner::from_entropy(),
            order: StepOrder::default(),
            frame: 0,
        }
    }

    /// Use a deterministic random sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.spawner = Spawner::from_seed(seed);
        self
    }

    pub fn with_step_order(mut self, order: StepOrder) -> Self {
        self.order = order;
        self
    }

    /// Read pointer positions from an existing shared cell instead of a
    /// private one.
    pub fn with_pointer(mut self, pointer: SharedPointer) -> Self {
        self.pointer = pointer;
        self
    }

    /// Rebuild the particle set for a `width` x `height` surface.
    ///
    /// All existing particles are dropped, then `particle_count` new ones
    /// are scattered over the surface. On a zero-sized surface the set is
    /// left empty.
    pub fn initialize(&mut self, width: u32, height: u32, config: impl Into<Arc<ParticleConfig>>) {
        self.config = config.into();
        self.dimensions = SurfaceDimensions::new(width, height);
        self.particles.clear();

        if self.dimensions.is_empty() {
            log::debug!("surface {}x{} not available; no particles created", width, height);
            return;
        }

        let size = self.dimensions.as_vec2();
        let config = &self.config;
        let spawner = &mut self.spawner;
        self.particles
            .extend((0..config.particle_count).map(|_| Particle::create(size, config, None, spawner)));

        log::debug!(
            "initialized {} particles on {}x{} surface",
            self.particles.len(),
            width,
            height
        );
    }

    /// Rebuild for new dimensions with the current configuration.
    pub fn resize(&mut self, width: u32, height: u32) {
        let config = Arc::clone(&self.config);
        self.initialize(width, height, config);
    }

    /// Replace the configuration and rebuild on the current surface.
    ///
    /// Returns whether the particle set was rebuilt. A configuration that
    /// differs only in `background` is swapped in and the particles are
    /// kept, since the field never reads it.
    pub fn set_config(&mut self, config: ParticleConfig) -> bool {
        if self.config.same_field(&config) {
            if *self.config != config {
                log::debug!("background replaced; particle set kept");
                self.config = Arc::new(config);
            }
            return false;
        }
        config.log_warnings();
        log::debug!("configuration replaced; rebuilding particle set");
        let SurfaceDimensions { width, height } = self.dimensions;
        self.initialize(width, height, config);
        true
    }

    /// Record the pointer position in surface-local coordinates.
    pub fn on_pointer_move(&self, x: f32, y: f32) {
        self.pointer.set(Vec2::new(x, y));
    }

    /// Spawn `spawn_on_click_count` particles around `(x, y)`.
    ///
    /// New particles are appended; existing ones are untouched. They are
    /// never removed automatically, so repeated clicking grows the set
    /// unless `max_particles` caps it. Returns how many were added.
    pub fn on_click(&mut self, x: f32, y: f32) -> usize {
        if self.dimensions.is_empty() || self.config.spawn_on_click_count == 0 {
            return 0;
        }

        let room = match self.config.max_particles {
            Some(cap) => cap.saturating_sub(self.particles.len()),
            None => usize::MAX,
        };
        let count = self.config.spawn_on_click_count.min(room);

        let size = self.dimensions.as_vec2();
        let point = Vec2::new(x, y);
        let config = &self.config;
        let spawner = &mut self.spawner;
        self.particles
            .extend((0..count).map(|_| Particle::create(size, config, Some(point), spawner)));

        log::debug!(
            "spawned {} particles at ({:.1}, {:.1}); {} total",
            count,
            x,
            y,
            self.particles.len()
        );
        count
    }

    /// Render one frame: clear the surface, then update and draw every
    /// particle in order.
    ///
    /// Does nothing until the simulation has a non-empty surface.
    pub fn step<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.dimensions.is_empty() {
            return;
        }

        let config = Arc::clone(&self.config);
        let pointer = self.pointer.get();
        let bounds = self.dimensions.as_vec2();

        surface.clear();

        match self.order {
            StepOrder::Interleaved => {
                for i in 0..self.particles.len() {
                    self.particles[i].update(pointer, &config, bounds);
                    self.particles[i].draw(surface, &self.particles, &config);
                }
            }
            StepOrder::UpdateThenDraw => {
                for particle in &mut self.particles {
                    particle.update(pointer, &config, bounds);
                }
                for particle in &self.particles {
                    particle.draw(surface, &self.particles, &config);
                }
            }
        }

        self.frame += 1;
        log::trace!("frame {}: {} particles", self.frame, self.particles.len());
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> &Arc<ParticleConfig> {
        &self.config
    }

    pub fn dimensions(&self) -> SurfaceDimensions {
        self.dimensions
    }

    /// Whether a non-empty surface has been provided.
    pub fn is_ready(&self) -> bool {
        !self.dimensions.is_empty()
    }

    /// Handle to the shared pointer cell, for input listeners on other threads.
    pub fn pointer(&self) -> &SharedPointer {
        &self.pointer
    }

    /// Frames stepped since creation.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
