//! Surface lifecycle: sizing, the frame loop, resize debouncing, teardown.
//!
//! [`SurfaceController`] sits between a host and a [`Simulation`]. The host
//! supplies three capabilities (a [`FrameScheduler`], a [`TimerService`],
//! and a [`Viewport`]) and forwards their callbacks and input events.
//! The controller keeps at most one frame request and one resize timer
//! outstanding, and tears all of it down on [`teardown`](SurfaceController::teardown)
//! or drop.
//!
//! # Example
//!
//! ```
//! use particlebg::prelude::*;
//!
//! let sim = Simulation::new(ParticleConfig::default()).with_seed(1);
//! let viewport = FixedViewport::new(800, 600);
//! let mut controller = SurfaceController::new(sim, FrameQueue::new(), TimerQueue::new(), viewport);
//! controller.start();
//!
//! let mut surface = RecordingSurface::new();
//! for id in controller.frames_mut().take_pending() {
//!     controller.on_frame(id, &mut surface);
//! }
//! assert_eq!(surface.circles().len(), 150);
//!
//! controller.teardown();
//! assert!(!controller.frames().has_pending());
//! ```

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;

use crate::config::ParticleConfig;
use crate::input::InputEvent;
use crate::scheduler::{FrameId, FrameScheduler, TimerId, TimerService};
use crate::simulation::Simulation;
use crate::surface::{DrawSurface, SurfaceDimensions};

/// Quiet period after the last resize signal before the field is rebuilt.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Where the drawing surface sits and how big it should be.
pub trait Viewport {
    /// Size the surface should take on the next (re)initialize.
    fn size(&self) -> SurfaceDimensions;

    /// Offset of the surface's top-left corner in the coordinate space
    /// pointer events arrive in.
    fn origin(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// A viewport with a size and origin set by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    pub size: SurfaceDimensions,
    pub origin: Vec2,
}

impl FixedViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceDimensions::new(width, height),
            origin: Vec2::ZERO,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.size = SurfaceDimensions::new(width, height);
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> SurfaceDimensions {
        self.size
    }

    fn origin(&self) -> Vec2 {
        self.origin
    }
}

/// Input sources the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    Resize,
    PointerMove,
    Click,
}

#[derive(Debug, Clone, Copy, Default)]
struct Listeners {
    resize: bool,
    pointer_move: bool,
    click: bool,
}

impl Listeners {
    fn register_all(&mut self) {
        *self = Listeners {
            resize: true,
            pointer_move: true,
            click: true,
        };
    }

    fn deregister_all(&mut self) {
        *self = Listeners::default();
    }

    fn is_registered(&self, listener: Listener) -> bool {
        match listener {
            Listener::Resize => self.resize,
            Listener::PointerMove => self.pointer_move,
            Listener::Click => self.click,
        }
    }
}

/// Drives a [`Simulation`] on a host-provided frame loop.
pub struct SurfaceController<F, T, V>
where
    F: FrameScheduler,
    T: TimerService,
    V: Viewport,
{
    simulation: Simulation,
    frames: F,
    timers: T,
    viewport: V,
    frame: Option<FrameId>,
    resize_timer: Option<TimerId>,
    listeners: Listeners,
    running: bool,
    paused: bool,
    debounce: Duration,
    reinit_count: u64,
}

impl<F, T, V> SurfaceController<F, T, V>
where
    F: FrameScheduler,
    T: TimerService,
    V: Viewport,
{
    pub fn new(simulation: Simulation, frames: F, timers: T, viewport: V) -> Self {
        Self {
            simulation,
            frames,
            timers,
            viewport,
            frame: None,
            resize_timer: None,
            listeners: Listeners::default(),
            running: false,
            paused: false,
            debounce: RESIZE_DEBOUNCE,
            reinit_count: 0,
        }
    }

    /// Override the resize quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Register input listeners, size the surface and start the frame loop.
    pub fn start(&mut self) {
        self.listeners.register_all();
        self.running = true;
        self.reinitialize();
        log::debug!("surface controller started");
    }

    /// Size the surface to the viewport and rebuild the particle set.
    ///
    /// Any outstanding frame request is cancelled first, so frames for the
    /// old particle set can never run after the new one exists.
    pub fn reinitialize(&mut self) {
        let config = Arc::clone(self.simulation.config());
        self.rebuild(config);
    }

    /// Rebuild at the viewport size with `config`. A pending resize timer is
    /// dropped, since the new set already matches the viewport.
    fn rebuild(&mut self, config: Arc<ParticleConfig>) {
        if let Some(id) = self.frame.take() {
            self.frames.cancel_frame(id);
        }
        if let Some(id) = self.resize_timer.take() {
            self.timers.clear_timeout(id);
        }

        let SurfaceDimensions { width, height } = self.viewport.size();
        self.simulation.initialize(width, height, config);
        self.reinit_count += 1;

        if self.running {
            self.frame = Some(self.frames.request_frame());
        }
    }

    /// Frame callback. Steps the simulation onto `surface` and schedules
    /// the next frame.
    ///
    /// Stale ids (cancelled, superseded, or delivered after teardown) are
    /// ignored. Returns whether a step was drawn.
    pub fn on_frame<S: DrawSurface + ?Sized>(&mut self, id: FrameId, surface: &mut S) -> bool {
        if !self.running || self.frame != Some(id) {
            log::trace!("ignoring stale frame {:?}", id);
            return false;
        }
        self.frame = None;

        let stepped = !self.paused;
        if stepped {
            self.simulation.step(surface);
        }

        self.frame = Some(self.frames.request_frame());
        stepped
    }

    /// Resize signal. Restarts the debounce timer; the rebuild happens once
    /// signals stop for the debounce period.
    pub fn on_resize(&mut self) {
        if !self.listeners.is_registered(Listener::Resize) {
            return;
        }
        if let Some(id) = self.resize_timer.take() {
            self.timers.clear_timeout(id);
        }
        self.resize_timer = Some(self.timers.set_timeout(self.debounce));
        log::debug!("resize signalled; rebuilding in {:?}", self.debounce);
    }

    /// Timer callback. Returns whether it was the resize timer and the
    /// field was rebuilt.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.resize_timer != Some(id) {
            return false;
        }
        self.resize_timer = None;
        self.reinitialize();
        true
    }

    /// Pointer moved to `(x, y)` in viewport coordinates.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !self.listeners.is_registered(Listener::PointerMove) {
            return;
        }
        let local = self.to_local(x, y);
        self.simulation.on_pointer_move(local.x, local.y);
    }

    /// Click at `(x, y)` in viewport coordinates. Returns particles spawned.
    pub fn on_click(&mut self, x: f32, y: f32) -> usize {
        if !self.listeners.is_registered(Listener::Click) {
            return 0;
        }
        let local = self.to_local(x, y);
        self.simulation.on_click(local.x, local.y)
    }

    /// Dispatch a translated input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.on_pointer_move(x, y),
            InputEvent::Clicked { x, y } => {
                self.on_click(x, y);
            }
            InputEvent::Resized => self.on_resize(),
        }
    }

    /// Replace the configuration.
    ///
    /// While running, a change to the field resizes to the viewport and
    /// rebuilds, as a fresh start would. A background-only change never
    /// rebuilds. Returns whether the particle set was rebuilt.
    pub fn set_config(&mut self, config: ParticleConfig) -> bool {
        if !self.running || self.simulation.config().same_field(&config) {
            return self.simulation.set_config(config);
        }
        config.log_warnings();
        self.rebuild(Arc::new(config));
        true
    }

    /// Stop the frame loop, cancel the resize timer and drop all input
    /// listeners. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(id) = self.frame.take() {
            self.frames.cancel_frame(id);
        }
        if let Some(id) = self.resize_timer.take() {
            self.timers.clear_timeout(id);
        }
        self.listeners.deregister_all();
        if self.running {
            log::debug!("surface controller torn down");
        }
        self.running = false;
    }

    /// While paused, frames keep being scheduled but nothing is stepped.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.is_registered(listener)
    }

    /// Outstanding frame request, if any.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.frame
    }

    /// Outstanding resize timer, if any.
    pub fn pending_resize(&self) -> Option<TimerId> {
        self.resize_timer
    }

    /// Number of times the particle set has been rebuilt.
    pub fn reinit_count(&self) -> u64 {
        self.reinit_count
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    fn to_local(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) - self.viewport.origin()
    }
}

impl<F, T, V> Drop for SurfaceController<F, T, V>
where
    F: FrameScheduler,
    T: TimerService,
    V: Viewport,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Background, Color};
    use crate::scheduler::{FrameQueue, TimerQueue};
    use crate::surface::RecordingSurface;

    type TestController = SurfaceController<FrameQueue, TimerQueue, FixedViewport>;

    fn controller(config: ParticleConfig) -> TestController {
        let sim = Simulation::new(config).with_seed(21);
        SurfaceController::new(sim, FrameQueue::new(), TimerQueue::new(), FixedViewport::new(640, 480))
    }

    fn run_frame(c: &mut TestController, surface: &mut RecordingSurface) -> usize {
        let ids = c.frames_mut().take_pending();
        ids.into_iter().filter(|&id| c.on_frame(id, surface)).count()
    }

    #[test]
    fn test_start_sizes_and_schedules() {
        let mut c = controller(ParticleConfig::default().with_particle_count(12));
        assert!(!c.is_running());
        c.start();

        assert!(c.is_running());
        assert_eq!(c.simulation().dimensions(), SurfaceDimensions::new(640, 480));
        assert_eq!(c.simulation().len(), 12);
        assert_eq!(c.frames().pending_count(), 1);
        assert_eq!(c.reinit_count(), 1);
    }

    #[test]
    fn test_each_frame_schedules_exactly_one_more() {
        let mut c = controller(ParticleConfig::default().with_particle_count(3));
        c.start();
        let mut surface = RecordingSurface::new();
        for _ in 0..5 {
            assert_eq!(run_frame(&mut c, &mut surface), 1);
            assert_eq!(c.frames().pending_count(), 1);
        }
        assert_eq!(c.simulation().frame_count(), 5);
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let mut c = controller(ParticleConfig::default().with_particle_count(3));
        c.start();
        let old = c.pending_frame().unwrap();
        c.reinitialize();

        let mut surface = RecordingSurface::new();
        assert!(!c.on_frame(old, &mut surface));
        assert!(surface.commands().is_empty());
        assert_eq!(c.frames().pending_count(), 1);
    }

    #[test]
    fn test_pause_skips_stepping_but_keeps_loop() {
        let mut c = controller(ParticleConfig::default().with_particle_count(3));
        c.start();
        c.set_paused(true);

        let mut surface = RecordingSurface::new();
        assert_eq!(run_frame(&mut c, &mut surface), 0);
        assert!(c.frames().has_pending());
        assert_eq!(c.simulation().frame_count(), 0);

        c.toggle_pause();
        assert_eq!(run_frame(&mut c, &mut surface), 1);
    }

    #[test]
    fn test_pointer_translated_by_origin() {
        let sim = Simulation::new(ParticleConfig::default()).with_seed(1);
        let viewport = FixedViewport::new(100, 100).with_origin(Vec2::new(20.0, 30.0));
        let mut c = SurfaceController::new(sim, FrameQueue::new(), TimerQueue::new(), viewport);
        c.start();

        c.on_pointer_move(25.0, 40.0);
        assert_eq!(c.simulation().pointer().get(), Some(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_click_translated_by_origin() {
        let config = ParticleConfig::default().with_particle_count(0).with_spawn_on_click(4);
        let sim = Simulation::new(config).with_seed(1);
        let viewport = FixedViewport::new(400, 400).with_origin(Vec2::new(100.0, 100.0));
        let mut c = SurfaceController::new(sim, FrameQueue::new(), TimerQueue::new(), viewport);
        c.start();

        assert_eq!(c.on_click(300.0, 300.0), 4);
        let click = Vec2::new(200.0, 200.0);
        assert!(c
            .simulation()
            .particles()
            .iter()
            .all(|p| p.position.distance(click) < 50.0 + 1e-3));
    }

    #[test]
    fn test_input_before_start_is_ignored() {
        let mut c = controller(ParticleConfig::default().with_spawn_on_click(5));
        c.on_resize();
        c.on_pointer_move(1.0, 1.0);
        assert_eq!(c.on_click(1.0, 1.0), 0);
        assert!(c.pending_resize().is_none());
        assert!(c.simulation().pointer().get().is_none());
    }

    #[test]
    fn test_set_config_while_running_resizes_to_viewport() {
        let mut c = controller(ParticleConfig::default().with_particle_count(5));
        c.start();
        c.viewport_mut().set_size(300, 200);

        assert!(c.set_config(ParticleConfig::default().with_particle_count(9)));
        assert_eq!(c.simulation().len(), 9);
        assert_eq!(c.simulation().dimensions(), SurfaceDimensions::new(300, 200));
        assert_eq!(c.frames().pending_count(), 1);

        assert!(!c.set_config(ParticleConfig::default().with_particle_count(9)));
    }

    #[test]
    fn test_background_change_while_running_keeps_particles() {
        let mut c = controller(ParticleConfig::interactive().with_particle_count(20));
        c.start();
        let before = c.simulation().particles().to_vec();
        let frame = c.pending_frame();

        let repainted = ParticleConfig::interactive()
            .with_particle_count(20)
            .with_background(Background::solid(Color::BLACK));
        assert!(!c.set_config(repainted.clone()));

        assert_eq!(c.simulation().particles(), &before[..]);
        assert_eq!(**c.simulation().config(), repainted);
        assert_eq!(c.pending_frame(), frame);
        assert_eq!(c.reinit_count(), 1);
    }

    #[test]
    fn test_config_rebuild_drops_pending_resize() {
        let mut c = controller(ParticleConfig::default().with_particle_count(5));
        c.start();
        c.on_resize();
        assert!(c.pending_resize().is_some());

        assert!(c.set_config(ParticleConfig::default().with_particle_count(7)));
        assert!(c.pending_resize().is_none());
        assert_eq!(c.timers().pending_count(), 0);
        assert_eq!(c.reinit_count(), 2);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut c = controller(ParticleConfig::default());
        c.start();
        c.on_resize();
        let frame = c.pending_frame().unwrap();
        assert!(c.pending_resize().is_some());

        c.teardown();

        assert!(!c.is_running());
        assert!(!c.frames().has_pending());
        assert_eq!(c.timers().pending_count(), 0);
        assert!(!c.is_listening(Listener::Resize));
        assert!(!c.is_listening(Listener::PointerMove));
        assert!(!c.is_listening(Listener::Click));

        let mut surface = RecordingSurface::new();
        assert!(!c.on_frame(frame, &mut surface));
        assert!(c.timers_mut().advance_by(Duration::from_secs(5)).is_empty());

        // Idempotent.
        c.teardown();
    }
}
