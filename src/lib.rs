//! # particlebg - animated particle-field background
//!
//! A field of dots drifting across a surface, bouncing off its edges and
//! joined by faint lines whenever two of them come close. The pointer can
//! push dots away and clicks can scatter new ones.
//!
//! ## Quick Start
//!
//! ```no_run
//! use particlebg::prelude::*;
//!
//! fn main() -> Result<(), particlebg::AppError> {
//!     particlebg::run(ParticleConfig::interactive())
//! }
//! ```
//!
//! ## Without a window
//!
//! The simulation only needs something implementing [`DrawSurface`]. Tests
//! and benchmarks use [`RecordingSurface`]:
//!
//! ```
//! use particlebg::prelude::*;
//!
//! let mut sim = Simulation::new(ParticleConfig::default()).with_seed(7);
//! sim.resize(800, 600);
//!
//! let mut surface = RecordingSurface::new();
//! sim.step(&mut surface);
//!
//! assert_eq!(surface.circles().len(), 150);
//! ```
//!
//! ## Hosting
//!
//! [`SurfaceController`] owns the lifecycle around a simulation: sizing from
//! a [`Viewport`], one frame request at a time through a [`FrameScheduler`],
//! debounced rebuilds on resize through a [`TimerService`], and a teardown
//! that leaves nothing scheduled. [`run`] wires it to a winit window and a
//! wgpu renderer.
//!
//! ## Configuration
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `particle_count` | 150 | particles created per (re)initialize |
//! | `dot_color` / `line_color` | `#5cbdaa` | dot fill, proximity line stroke |
//! | `particle_radius` | 3 | dot radius in pixels |
//! | `line_width` | 0.7 | proximity line width in pixels |
//! | `proximity_threshold` | 150 | max distance for a line; 0 disables lines |
//! | `min_speed` / `max_speed` | 0.6 / 0.6 | speed floor and ceiling, px per frame |
//! | `spawn_on_click_count` | 0 | particles added per click |
//! | `repulse_radius` | 0 | pointer repulsion radius; 0 disables it |
//! | `background` | 135° gradient | painted by the renderer only |
//! | `max_particles` | none | optional cap on click growth |

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod gpu;
pub mod input;
pub mod particle;
pub mod pointer;
pub mod proximity;
pub mod scheduler;
pub mod simulation;
pub mod spawn;
pub mod surface;
pub mod time;
#[cfg(feature = "egui")]
pub mod ui;
mod window;

pub use color::{Background, Color};
pub use config::ParticleConfig;
pub use controller::{FixedViewport, SurfaceController, Viewport, RESIZE_DEBOUNCE};
pub use error::{AppError, ColorParseError, ConfigError, GpuError};
pub use glam::Vec2;
pub use particle::Particle;
pub use pointer::SharedPointer;
pub use scheduler::{FrameId, FrameQueue, FrameScheduler, TimerId, TimerQueue, TimerService};
pub use simulation::{Simulation, StepOrder};
pub use surface::{DrawSurface, RecordingSurface, SurfaceDimensions};
pub use window::{run, App};

/// Convenient re-exports for common usage.
///
/// ```
/// use particlebg::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Background, Color};
    pub use crate::config::ParticleConfig;
    pub use crate::controller::{FixedViewport, SurfaceController, Viewport};
    pub use crate::scheduler::{FrameQueue, FrameScheduler, TimerQueue, TimerService};
    pub use crate::simulation::{Simulation, StepOrder};
    pub use crate::surface::{DrawSurface, RecordingSurface, SurfaceDimensions};
    pub use crate::Vec2;
}
